use harvest_interfaces::{Liquidation, ReportOutcome, VaultClient};
use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env};

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Vault,
    Want,
    LiquidityCap,
}

/// Strategy that just holds want. Lets vault tests drive `report` with
/// arbitrary figures and cap what `withdraw` can hand back.
#[contract]
pub struct MockStrategy;

#[contractimpl]
impl MockStrategy {
    pub fn initialize(env: Env, vault: Address, want: Address) {
        env.storage().instance().set(&DataKey::Vault, &vault);
        env.storage().instance().set(&DataKey::Want, &want);
    }

    pub fn want(env: Env) -> Address {
        env.storage().instance().get(&DataKey::Want).unwrap()
    }

    pub fn vault(env: Env) -> Address {
        env.storage().instance().get(&DataKey::Vault).unwrap()
    }

    /// Limits how much a single `withdraw` call can return.
    pub fn set_liquidity_cap(env: Env, cap: i128) {
        env.storage().instance().set(&DataKey::LiquidityCap, &cap);
    }

    pub fn withdraw(env: Env, amount_needed: i128) -> Liquidation {
        let vault = Self::vault(env.clone());
        vault.require_auth();

        let want = token::Client::new(&env, &Self::want(env.clone()));
        let mut available = want.balance(&env.current_contract_address());
        if let Some(cap) = env.storage().instance().get::<_, i128>(&DataKey::LiquidityCap) {
            available = available.min(cap);
        }
        let liquidated = amount_needed.min(available);
        if liquidated > 0 {
            want.transfer(&env.current_contract_address(), &vault, &liquidated);
        }
        Liquidation {
            liquidated,
            shortfall: amount_needed - liquidated,
        }
    }

    pub fn migrate(env: Env, new_strategy: Address) {
        Self::vault(env.clone()).require_auth();
        let want = token::Client::new(&env, &Self::want(env.clone()));
        let balance = want.balance(&env.current_contract_address());
        if balance > 0 {
            want.transfer(&env.current_contract_address(), &new_strategy, &balance);
        }
    }

    /// Sends `gain + debt_payment` to the vault and reports.
    pub fn report(env: Env, gain: i128, loss: i128, debt_payment: i128) -> ReportOutcome {
        let vault = Self::vault(env.clone());
        let owed = gain + debt_payment;
        if owed > 0 {
            token::Client::new(&env, &Self::want(env.clone()))
                .transfer(&env.current_contract_address(), &vault, &owed);
        }
        VaultClient::new(&env, &vault).report(&env.current_contract_address(), &gain, &loss, &debt_payment)
    }
}
