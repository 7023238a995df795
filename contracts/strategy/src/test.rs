#![cfg(test)]

use super::*;
use harvest_mocks::{
    MockSwapRouter, MockSwapRouterClient, MockYieldMarket, MockYieldMarketClient, PRICE_SCALE,
    RATE_SCALE,
};
use harvest_vault::{VaultError, YieldVault, YieldVaultClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

const E18: i128 = 1_000_000_000_000_000_000;
/// 0.02 underlying per market share.
const INITIAL_RATE: i128 = 20_000_000;

struct Setup<'a> {
    env: Env,
    vault: YieldVaultClient<'a>,
    strategy: CompoundStrategyClient<'a>,
    market: MockYieldMarketClient<'a>,
    router: MockSwapRouterClient<'a>,
    want: token::Client<'a>,
    want_admin: token::StellarAssetClient<'a>,
    reward: token::Client<'a>,
    reward_admin: token::StellarAssetClient<'a>,
    governance: Address,
    strategist: Address,
    keeper: Address,
}

fn setup<'a>(performance_fee: u32) -> Setup<'a> {
    let env = Env::default();
    env.mock_all_auths();

    let governance = Address::generate(&env);
    let strategist = Address::generate(&env);
    let keeper = Address::generate(&env);
    let issuer = Address::generate(&env);

    let want_sac = env.register_stellar_asset_contract_v2(issuer.clone());
    let reward_sac = env.register_stellar_asset_contract_v2(issuer);
    let want = token::Client::new(&env, &want_sac.address());
    let want_admin = token::StellarAssetClient::new(&env, &want_sac.address());
    let reward = token::Client::new(&env, &reward_sac.address());
    let reward_admin = token::StellarAssetClient::new(&env, &reward_sac.address());

    let vault = YieldVaultClient::new(&env, &env.register_contract(None, YieldVault));
    vault.initialize(&governance, &want.address, &performance_fee);

    let market = MockYieldMarketClient::new(&env, &env.register_contract(None, MockYieldMarket));
    market.initialize(&want.address, &reward.address, &INITIAL_RATE);

    let router = MockSwapRouterClient::new(&env, &env.register_contract(None, MockSwapRouter));

    let strategy =
        CompoundStrategyClient::new(&env, &env.register_contract(None, CompoundStrategy));
    strategy.initialize(
        &vault.address,
        &market.address,
        &router.address,
        &strategist,
        &keeper,
    );

    Setup {
        env,
        vault,
        strategy,
        market,
        router,
        want,
        want_admin,
        reward,
        reward_admin,
        governance,
        strategist,
        keeper,
    }
}

impl<'a> Setup<'a> {
    fn deposit(&self, amount: i128) -> Address {
        let user = Address::generate(&self.env);
        self.want_admin.mint(&user, &amount);
        self.vault.deposit(&user, &amount, &user);
        user
    }

    /// Deposits `amount`, registers the strategy at `debt_ratio` and runs a
    /// first governance harvest so the credit is invested.
    fn invested(&self, amount: i128, debt_ratio: u32) -> Address {
        let user = self.deposit(amount);
        self.vault.add_strategy(&self.strategy.address, &debt_ratio);
        self.strategy.harvest(&self.governance);
        user
    }

    fn another_strategy(&self) -> CompoundStrategyClient<'a> {
        let strategy = CompoundStrategyClient::new(
            &self.env,
            &self.env.register_contract(None, CompoundStrategy),
        );
        strategy.initialize(
            &self.vault.address,
            &self.market.address,
            &self.router.address,
            &self.strategist,
            &self.keeper,
        );
        strategy
    }

    /// Moves the market's exchange rate, funding or stranding the interest.
    fn set_rate(&self, rate: i128) {
        let shares = self.market.total_shares();
        let before = shares * self.market.exchange_rate() / RATE_SCALE;
        let after = shares * rate / RATE_SCALE;
        if after > before {
            self.want_admin.mint(&self.market.address, &(after - before));
        }
        self.market.set_exchange_rate(&rate);
    }

    /// Books `amount` reward tokens for the strategy and prices them at two
    /// want each.
    fn accrue_rewards(&self, amount: i128) {
        self.reward_admin.mint(&self.market.address, &amount);
        self.market.accrue_rewards(&self.strategy.address, &amount);
        self.router
            .set_price(&self.reward.address, &self.want.address, &(2 * PRICE_SCALE));
        self.want_admin.mint(&self.router.address, &(4 * amount));
    }

    fn advance(&self, seconds: u64) {
        self.env.ledger().with_mut(|li| li.timestamp += seconds);
    }
}

// ============================================================================
// INITIALIZATION
// ============================================================================

#[test]
fn test_initialize_reads_want_and_reward_token() {
    let s = setup(0);

    assert_eq!(s.strategy.want(), s.want.address);
    assert_eq!(s.strategy.vault(), s.vault.address);
    assert_eq!(s.strategy.reward_token(), s.reward.address);
    assert_eq!(s.strategy.strategist(), s.strategist);
    assert_eq!(s.strategy.keeper(), s.keeper);
    assert_eq!(s.strategy.report_delay(), DEFAULT_REPORT_DELAY);
    assert_eq!(s.strategy.max_slippage(), DEFAULT_MAX_SLIPPAGE);
    assert!(!s.strategy.is_paused());
    assert!(!s.strategy.emergency_exit());

    assert_eq!(
        s.strategy.try_initialize(
            &s.vault.address,
            &s.market.address,
            &s.router.address,
            &s.strategist,
            &s.keeper
        ),
        Err(Ok(StrategyError::AlreadyInitialized))
    );
}

#[test]
fn test_initialize_rejects_market_for_other_asset() {
    let s = setup(0);
    let foreign = MockYieldMarketClient::new(&s.env, &s.env.register_contract(None, MockYieldMarket));
    foreign.initialize(&s.reward.address, &s.reward.address, &INITIAL_RATE);

    let strategy =
        CompoundStrategyClient::new(&s.env, &s.env.register_contract(None, CompoundStrategy));
    assert_eq!(
        strategy.try_initialize(
            &s.vault.address,
            &foreign.address,
            &s.router.address,
            &s.strategist,
            &s.keeper
        ),
        Err(Ok(StrategyError::MarketMismatch))
    );
}

// ============================================================================
// HARVEST
// ============================================================================

#[test]
fn test_harvest_with_zero_debt_ratio_holds_funds_idle() {
    let s = setup(0);
    s.deposit(10_000 * E18);
    s.vault.add_strategy(&s.strategy.address, &0);

    let report = s.strategy.harvest(&s.governance);

    assert_eq!(report.total_debt, 10_000 * E18);
    assert_eq!(report.debt_outstanding, 0);
    assert_eq!(s.strategy.want_balance(), 10_000 * E18);
    assert_eq!(s.strategy.market_balance(), 0);
    assert_eq!(s.vault.total_idle(), 0);

    s.strategy.adjust_position(&s.keeper);
    assert_eq!(s.strategy.want_balance(), 10_000 * E18);
    assert_eq!(s.strategy.market_balance(), 0);
}

#[test]
fn test_dropping_debt_ratio_to_zero_pulls_position_out_of_market() {
    let s = setup(0);
    s.invested(1_000 * E18, 100);
    assert_eq!(s.strategy.market_balance(), 500 * E18);

    s.vault.update_strategy_debt_ratio(&s.strategy.address, &0);
    s.strategy.adjust_position(&s.strategist);

    assert_eq!(s.strategy.market_balance(), 0);
    assert_eq!(s.strategy.want_balance(), 10 * E18);

    // the remainder of the vault follows on the next harvest
    let report = s.strategy.harvest(&s.governance);
    assert_eq!(report.total_debt, 1_000 * E18);
    assert_eq!(s.strategy.want_balance(), 1_000 * E18);
    assert_eq!(s.strategy.market_balance(), 0);
}

#[test]
fn test_harvest_invests_credit_in_market() {
    let s = setup(0);
    s.deposit(1_000 * E18);
    s.vault.add_strategy(&s.strategy.address, &100);

    let report = s.strategy.harvest(&s.governance);

    assert_eq!(report.total_debt, 10 * E18);
    assert_eq!(report.profit, 0);
    assert_eq!(s.strategy.want_balance(), 0);
    // 10e18 underlying at 0.02 per share
    assert_eq!(s.strategy.market_balance(), 500 * E18);
    assert_eq!(s.strategy.estimated_total_assets(), 10 * E18);

    s.strategy.adjust_position(&s.keeper);
    assert_eq!(s.strategy.market_balance(), 500 * E18);
    assert_eq!(s.strategy.want_balance(), 0);
}

#[test]
fn test_harvest_reports_profit_and_charges_fee() {
    let s = setup(1_000);
    s.invested(1_000 * E18, 5_000);
    s.set_rate(22_000_000);
    assert_eq!(s.strategy.estimated_total_assets(), 550 * E18);

    let report = s.strategy.harvest(&s.governance);

    assert_eq!(report.profit, 50 * E18);
    assert_eq!(report.loss, 0);
    assert_eq!(report.debt_payment, 0);
    assert_eq!(report.total_debt, 525 * E18);
    assert_eq!(s.vault.total_assets(), 1_050 * E18);
    assert!(s.vault.balance(&s.governance) > 0);
    assert_eq!(s.vault.strategy_params(&s.strategy.address).total_gain, 50 * E18);
    assert_eq!(s.strategy.want_balance(), 0);
}

#[test]
fn test_harvest_reports_loss() {
    let s = setup(1_000);
    s.invested(1_000 * E18, 5_000);
    s.set_rate(18_000_000);

    let report = s.strategy.harvest(&s.governance);

    assert_eq!(report.profit, 0);
    assert_eq!(report.loss, 50 * E18);
    assert_eq!(report.total_debt, 475 * E18);
    assert_eq!(s.vault.total_assets(), 950 * E18);
    assert_eq!(s.vault.balance(&s.governance), 0);
    assert_eq!(s.vault.strategy_params(&s.strategy.address).total_loss, 50 * E18);
}

#[test]
fn test_harvest_swaps_rewards_into_profit() {
    let s = setup(0);
    s.invested(1_000 * E18, 5_000);
    s.accrue_rewards(10 * E18);

    let report = s.strategy.harvest(&s.governance);

    assert_eq!(report.profit, 20 * E18);
    assert_eq!(s.reward.balance(&s.strategy.address), 0);
    assert_eq!(s.vault.total_assets(), 1_020 * E18);
}

#[test]
fn test_rewards_below_minimum_are_kept() {
    let s = setup(0);
    s.invested(1_000 * E18, 5_000);
    s.strategy.set_min_reward_to_sell(&s.strategist, &(50 * E18));
    s.accrue_rewards(10 * E18);

    let report = s.strategy.harvest(&s.governance);

    assert_eq!(report.profit, 0);
    assert_eq!(s.reward.balance(&s.strategy.address), 10 * E18);
}

#[test]
fn test_keeper_harvest_waits_for_report_delay() {
    let s = setup(0);
    s.deposit(1_000 * E18);
    s.vault.add_strategy(&s.strategy.address, &1_000);

    assert_eq!(
        s.strategy.try_harvest(&s.keeper),
        Err(Ok(StrategyError::ReportDelayNotElapsed))
    );
    s.strategy.harvest(&s.governance);
    s.strategy.harvest(&s.strategist);

    s.advance(DEFAULT_REPORT_DELAY - 1);
    assert_eq!(
        s.strategy.try_harvest(&s.keeper),
        Err(Ok(StrategyError::ReportDelayNotElapsed))
    );

    s.advance(1);
    s.strategy.harvest(&s.keeper);
    assert_eq!(s.strategy.last_report(), DEFAULT_REPORT_DELAY);
}

#[test]
fn test_pause_blocks_harvest_until_unpaused() {
    let s = setup(0);
    s.invested(1_000 * E18, 1_000);

    s.strategy.pause_work(&s.strategist);
    assert!(s.strategy.is_paused());
    assert_eq!(s.strategy.try_harvest(&s.governance), Err(Ok(StrategyError::Paused)));
    assert_eq!(s.strategy.try_harvest(&s.strategist), Err(Ok(StrategyError::Paused)));

    s.strategy.unpause_work(&s.governance);
    s.strategy.harvest(&s.governance);
}

#[test]
fn test_harvest_rejects_strangers() {
    let s = setup(0);
    s.vault.add_strategy(&s.strategy.address, &1_000);
    let stranger = Address::generate(&s.env);

    assert_eq!(
        s.strategy.try_harvest(&stranger),
        Err(Ok(StrategyError::Unauthorized))
    );
}

// ============================================================================
// EMERGENCY EXIT
// ============================================================================

#[test]
fn test_emergency_exit_liquidates_whole_position() {
    let s = setup(0);
    s.invested(1_000 * E18, 100);
    assert_eq!(s.strategy.want_balance(), 0);

    s.accrue_rewards(10 * E18);
    assert_eq!(s.strategy.unclaimed_rewards(), 10 * E18);

    s.strategy.set_emergency_exit(&s.strategist);
    s.advance(DEFAULT_REPORT_DELAY + 1);
    s.strategy.harvest(&s.keeper);

    assert!(s.strategy.emergency_exit());
    assert_eq!(s.strategy.want_balance(), 10 * E18);
    assert_eq!(s.strategy.market_balance(), 0);
    // claimed but not sold
    assert_eq!(s.strategy.unclaimed_rewards(), 0);
    assert_eq!(s.reward.balance(&s.strategy.address), 10 * E18);

    // funds stay idle on later harvests
    s.strategy.harvest(&s.governance);
    assert_eq!(s.strategy.market_balance(), 0);
}

#[test]
fn test_emergency_exit_with_revoked_strategy_repays_vault() {
    let s = setup(0);
    s.invested(1_000 * E18, 100);

    s.strategy.set_emergency_exit(&s.governance);
    s.vault.revoke_strategy(&s.governance, &s.strategy.address);
    let report = s.strategy.harvest(&s.governance);

    assert_eq!(report.debt_payment, 10 * E18);
    assert_eq!(report.total_debt, 0);
    assert_eq!(s.strategy.want_balance(), 0);
    assert_eq!(s.vault.total_idle(), 1_000 * E18);
    assert_eq!(s.vault.total_debt(), 0);
}

// ============================================================================
// LIQUIDATION AND VAULT WITHDRAWALS
// ============================================================================

#[test]
fn test_liquidate_position_reports_shortfall() {
    let s = setup(0);
    s.invested(1_000 * E18, 5_000);
    s.market.set_liquidity_cap(&Some(100 * E18));

    let result = s.strategy.liquidate_position(&s.governance, &(300 * E18));

    assert_eq!(result.liquidated, 100 * E18);
    assert_eq!(result.shortfall, 200 * E18);
    assert_eq!(s.strategy.want_balance(), 100 * E18);
}

#[test]
fn test_liquidate_all_positions_exits_market() {
    let s = setup(0);
    s.invested(1_000 * E18, 5_000);

    let freed = s.strategy.liquidate_all_positions(&s.strategist);

    assert_eq!(freed, 500 * E18);
    assert_eq!(s.strategy.market_balance(), 0);
    assert_eq!(
        s.strategy.try_liquidate_all_positions(&s.keeper),
        Err(Ok(StrategyError::Unauthorized))
    );
}

#[test]
fn test_vault_withdraw_pulls_from_market() {
    let s = setup(0);
    let user = s.invested(1_000 * E18, 5_000);

    s.vault.withdraw(&user, &(800 * E18), &user, &user);

    assert_eq!(s.want.balance(&user), 800 * E18);
    assert_eq!(s.vault.strategy_params(&s.strategy.address).total_debt, 200 * E18);
    assert_eq!(s.strategy.estimated_total_assets(), 200 * E18);
    assert_eq!(s.vault.total_assets(), 200 * E18);
}

#[test]
fn test_vault_withdraw_fails_when_market_is_illiquid() {
    let s = setup(0);
    let user = s.invested(1_000 * E18, 5_000);
    s.market.set_liquidity_cap(&Some(100 * E18));

    assert_eq!(
        s.vault.try_withdraw(&user, &(800 * E18), &user, &user),
        Err(Ok(VaultError::InsufficientLiquidity))
    );
    s.vault.withdraw(&user, &(600 * E18), &user, &user);
    assert_eq!(s.want.balance(&user), 600 * E18);
}

#[test]
fn test_migration_moves_position_to_new_strategy() {
    let s = setup(0);
    s.invested(1_000 * E18, 5_000);
    let replacement = s.another_strategy();

    s.vault.migrate_strategy(&s.strategy.address, &replacement.address);

    assert_eq!(s.strategy.market_balance(), 0);
    assert_eq!(s.strategy.want_balance(), 0);
    assert_eq!(replacement.want_balance(), 500 * E18);
    assert_eq!(s.vault.strategy_params(&replacement.address).total_debt, 500 * E18);

    let report = replacement.harvest(&s.governance);
    assert_eq!(report.profit, 0);
    assert_eq!(replacement.want_balance(), 0);
    assert_eq!(replacement.market_balance(), 25_000 * E18);
}

// ============================================================================
// REWARD SWAPS
// ============================================================================

#[test]
fn test_swap_respects_max_slippage() {
    let s = setup(0);
    s.invested(1_000 * E18, 5_000);
    s.accrue_rewards(10 * E18);
    assert_eq!(s.strategy.get_rewards(&s.keeper), 10 * E18);

    s.router.set_execution_slippage(&200);
    assert!(s.strategy.try_swap_rewards_to_want(&s.keeper).is_err());
    assert_eq!(s.reward.balance(&s.strategy.address), 10 * E18);

    s.strategy.set_max_slippage(&s.strategist, &300);
    let received = s.strategy.swap_rewards_to_want(&s.keeper);

    assert_eq!(received, 19_600_000_000_000_000_000);
    assert_eq!(s.strategy.want_balance(), received);
    assert_eq!(s.reward.balance(&s.strategy.address), 0);
}

#[test]
fn test_swap_without_rewards_is_a_no_op() {
    let s = setup(0);
    assert_eq!(s.strategy.swap_rewards_to_want(&s.strategist), 0);
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn test_setters_require_governance_or_strategist() {
    let s = setup(0);
    let stranger = Address::generate(&s.env);

    assert_eq!(
        s.strategy.try_set_keeper(&stranger, &stranger),
        Err(Ok(StrategyError::Unauthorized))
    );
    assert_eq!(
        s.strategy.try_set_report_delay(&s.keeper, &1),
        Err(Ok(StrategyError::Unauthorized))
    );
    assert_eq!(
        s.strategy.try_set_emergency_exit(&s.keeper),
        Err(Ok(StrategyError::Unauthorized))
    );

    let new_keeper = Address::generate(&s.env);
    s.strategy.set_keeper(&s.governance, &new_keeper);
    assert_eq!(s.strategy.keeper(), new_keeper);

    let new_strategist = Address::generate(&s.env);
    s.strategy.set_strategist(&s.strategist, &new_strategist);
    assert_eq!(s.strategy.strategist(), new_strategist);
    assert_eq!(
        s.strategy.try_set_report_delay(&s.strategist, &1),
        Err(Ok(StrategyError::Unauthorized))
    );

    s.strategy.set_report_delay(&s.governance, &3_600);
    assert_eq!(s.strategy.report_delay(), 3_600);
}

#[test]
fn test_setters_validate_values() {
    let s = setup(0);

    assert_eq!(
        s.strategy.try_set_max_slippage(&s.governance, &(MAX_BPS + 1)),
        Err(Ok(StrategyError::InvalidSlippage))
    );
    assert_eq!(
        s.strategy.try_set_min_reward_to_sell(&s.governance, &-1),
        Err(Ok(StrategyError::NegativeAmount))
    );

    s.strategy.set_max_slippage(&s.governance, &MAX_BPS);
    assert_eq!(s.strategy.max_slippage(), MAX_BPS);
}
