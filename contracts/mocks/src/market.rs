use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env};

/// Fixed-point scale of the exchange rate (underlying per market share).
pub const RATE_SCALE: i128 = 1_000_000_000;

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Underlying,
    RewardToken,
    ExchangeRate,
    TotalShares,
    LiquidityCap,
    Shares(Address),
    Rewards(Address),
}

/// Lending market with a manually driven exchange rate.
///
/// Interest is simulated by raising the exchange rate with
/// `set_exchange_rate` and minting the matching underlying to the market.
#[contract]
pub struct MockYieldMarket;

#[contractimpl]
impl MockYieldMarket {
    pub fn initialize(env: Env, underlying: Address, reward_token: Address, exchange_rate: i128) {
        assert!(!env.storage().instance().has(&DataKey::Underlying), "already initialized");
        assert!(exchange_rate > 0, "rate must be positive");
        env.storage().instance().set(&DataKey::Underlying, &underlying);
        env.storage().instance().set(&DataKey::RewardToken, &reward_token);
        env.storage().instance().set(&DataKey::ExchangeRate, &exchange_rate);
        env.storage().instance().set(&DataKey::TotalShares, &0_i128);
    }

    pub fn set_exchange_rate(env: Env, exchange_rate: i128) {
        assert!(exchange_rate > 0, "rate must be positive");
        env.storage().instance().set(&DataKey::ExchangeRate, &exchange_rate);
    }

    /// Caps what `get_cash` reports, simulating borrowed-out liquidity.
    pub fn set_liquidity_cap(env: Env, cap: Option<i128>) {
        match cap {
            Some(cap) => env.storage().instance().set(&DataKey::LiquidityCap, &cap),
            None => env.storage().instance().remove(&DataKey::LiquidityCap),
        }
    }

    /// Books reward tokens for `holder`. The market must hold them already.
    pub fn accrue_rewards(env: Env, holder: Address, amount: i128) {
        let key = DataKey::Rewards(holder);
        let current: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        env.storage().persistent().set(&key, &(current + amount));
    }

    pub fn underlying(env: Env) -> Address {
        env.storage().instance().get(&DataKey::Underlying).unwrap()
    }

    pub fn reward_token(env: Env) -> Address {
        env.storage().instance().get(&DataKey::RewardToken).unwrap()
    }

    pub fn exchange_rate(env: Env) -> i128 {
        env.storage().instance().get(&DataKey::ExchangeRate).unwrap()
    }

    pub fn total_shares(env: Env) -> i128 {
        env.storage().instance().get(&DataKey::TotalShares).unwrap_or(0)
    }

    pub fn supply(env: Env, from: Address, amount: i128) -> i128 {
        from.require_auth();
        assert!(amount > 0, "amount must be positive");

        let shares = amount * RATE_SCALE / Self::exchange_rate(env.clone());
        assert!(shares > 0, "amount too small");

        token::Client::new(&env, &Self::underlying(env.clone()))
            .transfer(&from, &env.current_contract_address(), &amount);
        Self::credit_shares(&env, &from, shares);
        shares
    }

    pub fn redeem_underlying(env: Env, to: Address, amount: i128) -> i128 {
        to.require_auth();
        assert!(amount > 0, "amount must be positive");

        let rate = Self::exchange_rate(env.clone());
        let shares = (amount * RATE_SCALE + rate - 1) / rate;
        Self::pay_out(&env, &to, shares, amount);
        shares
    }

    pub fn redeem(env: Env, to: Address, shares: i128) -> i128 {
        to.require_auth();
        assert!(shares > 0, "shares must be positive");

        let amount = shares * Self::exchange_rate(env.clone()) / RATE_SCALE;
        Self::pay_out(&env, &to, shares, amount);
        amount
    }

    pub fn balance_of(env: Env, holder: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Shares(holder))
            .unwrap_or(0)
    }

    pub fn balance_of_underlying(env: Env, holder: Address) -> i128 {
        Self::balance_of(env.clone(), holder) * Self::exchange_rate(env) / RATE_SCALE
    }

    pub fn get_cash(env: Env) -> i128 {
        let balance = token::Client::new(&env, &Self::underlying(env.clone()))
            .balance(&env.current_contract_address());
        match env.storage().instance().get::<_, i128>(&DataKey::LiquidityCap) {
            Some(cap) => balance.min(cap),
            None => balance,
        }
    }

    pub fn rewards_accrued(env: Env, holder: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Rewards(holder))
            .unwrap_or(0)
    }

    pub fn claim_rewards(env: Env, holder: Address) -> i128 {
        let key = DataKey::Rewards(holder.clone());
        let amount: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        if amount > 0 {
            env.storage().persistent().set(&key, &0_i128);
            token::Client::new(&env, &Self::reward_token(env.clone()))
                .transfer(&env.current_contract_address(), &holder, &amount);
        }
        amount
    }

    fn pay_out(env: &Env, to: &Address, shares: i128, amount: i128) {
        let balance = Self::balance_of(env.clone(), to.clone());
        assert!(shares <= balance, "insufficient market shares");
        assert!(amount <= Self::get_cash(env.clone()), "insufficient cash");

        env.storage()
            .persistent()
            .set(&DataKey::Shares(to.clone()), &(balance - shares));
        let total = Self::total_shares(env.clone());
        env.storage().instance().set(&DataKey::TotalShares, &(total - shares));

        token::Client::new(env, &Self::underlying(env.clone()))
            .transfer(&env.current_contract_address(), to, &amount);
    }

    fn credit_shares(env: &Env, holder: &Address, shares: i128) {
        let balance = Self::balance_of(env.clone(), holder.clone());
        env.storage()
            .persistent()
            .set(&DataKey::Shares(holder.clone()), &(balance + shares));
        let total = Self::total_shares(env.clone());
        env.storage().instance().set(&DataKey::TotalShares, &(total + shares));
    }
}
