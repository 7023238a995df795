#![cfg(test)]

use super::*;
use harvest_mocks::{MockAutomation, MockAutomationClient, MockYieldMarket, MockYieldMarketClient};
use harvest_strategy::{CompoundStrategy, CompoundStrategyClient, DEFAULT_REPORT_DELAY};
use harvest_vault::{YieldVault, YieldVaultClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

const E18: i128 = 1_000_000_000_000_000_000;

struct Setup<'a> {
    env: Env,
    vault: YieldVaultClient<'a>,
    strategy: CompoundStrategyClient<'a>,
    automation: MockAutomationClient<'a>,
    resolver: StrategyResolverClient<'a>,
    admin: Address,
    governance: Address,
    strategist: Address,
}

/// Vault holding 1_000 want with the strategy at a 10% debt ratio. The
/// automation platform is the strategy's keeper.
fn setup<'a>() -> Setup<'a> {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let governance = Address::generate(&env);
    let strategist = Address::generate(&env);
    let issuer = Address::generate(&env);

    let want_sac = env.register_stellar_asset_contract_v2(issuer.clone());
    let reward_sac = env.register_stellar_asset_contract_v2(issuer);
    let want_admin = token::StellarAssetClient::new(&env, &want_sac.address());

    let vault = YieldVaultClient::new(&env, &env.register_contract(None, YieldVault));
    vault.initialize(&governance, &want_sac.address(), &0);

    let market = MockYieldMarketClient::new(&env, &env.register_contract(None, MockYieldMarket));
    market.initialize(&want_sac.address(), &reward_sac.address(), &20_000_000);

    let automation = MockAutomationClient::new(&env, &env.register_contract(None, MockAutomation));
    let router = Address::generate(&env);

    let strategy =
        CompoundStrategyClient::new(&env, &env.register_contract(None, CompoundStrategy));
    strategy.initialize(
        &vault.address,
        &market.address,
        &router,
        &strategist,
        &automation.address,
    );

    let user = Address::generate(&env);
    want_admin.mint(&user, &(1_000 * E18));
    vault.deposit(&user, &(1_000 * E18), &user);
    vault.add_strategy(&strategy.address, &1_000);

    let resolver = StrategyResolverClient::new(&env, &env.register_contract(None, StrategyResolver));
    resolver.initialize(&admin, &strategy.address, &automation.address);

    Setup {
        env,
        vault,
        strategy,
        automation,
        resolver,
        admin,
        governance,
        strategist,
    }
}

impl<'a> Setup<'a> {
    fn advance(&self, seconds: u64) {
        self.env.ledger().with_mut(|li| li.timestamp += seconds);
    }

    fn can_exec(&self) -> bool {
        self.resolver.checker().0
    }
}

#[test]
fn test_initialize_twice_fails() {
    let s = setup();
    assert_eq!(s.resolver.admin(), s.admin);
    assert_eq!(s.resolver.strategy(), s.strategy.address);
    assert_eq!(s.resolver.automation(), s.automation.address);
    assert_eq!(
        s.resolver
            .try_initialize(&s.admin, &s.strategy.address, &s.automation.address),
        Err(Ok(ResolverError::AlreadyInitialized))
    );
}

#[test]
fn test_start_task_registers_harvest_once() {
    let s = setup();

    let task_id = s.resolver.start_task();

    assert!(s
        .env
        .auths()
        .iter()
        .any(|(address, _)| *address == s.admin));
    assert_eq!(s.resolver.task_id(), Some(task_id));

    let task = s.automation.task(&task_id);
    assert_eq!(task.creator, s.resolver.address);
    assert_eq!(task.exec_target, s.strategy.address);
    assert_eq!(task.exec_function, symbol_short!("harvest"));
    assert_eq!(task.resolver, s.resolver.address);
    assert_eq!(s.automation.task_ids_by_user(&s.resolver.address).len(), 1);

    assert_eq!(
        s.resolver.try_start_task(),
        Err(Ok(ResolverError::TaskAlreadyActive))
    );
}

#[test]
fn test_cancel_task_allows_a_new_one() {
    let s = setup();
    let first = s.resolver.start_task();

    s.resolver.cancel_task();

    assert_eq!(s.resolver.task_id(), None);
    assert_eq!(s.automation.task_ids_by_user(&s.resolver.address).len(), 0);
    assert_eq!(s.resolver.try_cancel_task(), Err(Ok(ResolverError::NoActiveTask)));

    let second = s.resolver.start_task();
    assert_ne!(first, second);
}

#[test]
fn test_checker_waits_for_report_delay() {
    let s = setup();

    let (can_exec, payload) = s.resolver.checker();
    assert!(!can_exec);
    assert_eq!(payload.target, s.strategy.address);
    assert_eq!(payload.function, symbol_short!("harvest"));
    assert_eq!(payload.args.len(), 1);

    s.advance(DEFAULT_REPORT_DELAY - 1);
    assert!(!s.can_exec());
    s.advance(1);
    assert!(s.can_exec());
}

#[test]
fn test_exec_relays_harvest_through_keeper_path() {
    let s = setup();
    let task_id = s.resolver.start_task();

    assert!(!s.automation.exec(&task_id));
    assert_eq!(s.strategy.market_balance(), 0);

    s.advance(DEFAULT_REPORT_DELAY);
    assert!(s.automation.exec(&task_id));

    assert_eq!(s.strategy.estimated_total_assets(), 100 * E18);
    assert_eq!(s.strategy.last_report(), DEFAULT_REPORT_DELAY);
    assert_eq!(s.vault.total_debt(), 100 * E18);

    // just reported, so not due again
    assert!(!s.automation.exec(&task_id));
}

#[test]
fn test_checker_is_false_while_paused() {
    let s = setup();
    s.advance(DEFAULT_REPORT_DELAY);
    assert!(s.can_exec());

    s.strategy.pause_work(&s.strategist);
    assert!(!s.can_exec());

    s.strategy.unpause_work(&s.strategist);
    assert!(s.can_exec());
}

#[test]
fn test_checker_is_false_once_emergency_exit_is_settled() {
    let s = setup();
    let task_id = s.resolver.start_task();
    s.strategy.harvest(&s.governance);

    s.strategy.set_emergency_exit(&s.strategist);
    s.vault.revoke_strategy(&s.governance, &s.strategy.address);
    s.advance(DEFAULT_REPORT_DELAY);

    // still holds funds, so the exit harvest is due
    assert!(s.can_exec());
    assert!(s.automation.exec(&task_id));
    assert_eq!(s.strategy.estimated_total_assets(), 0);
    assert_eq!(s.vault.total_debt(), 0);

    s.advance(DEFAULT_REPORT_DELAY);
    assert!(!s.can_exec());
}

#[test]
fn test_checker_goes_quiet_after_emergency_exit_without_revoke() {
    let s = setup();
    let task_id = s.resolver.start_task();
    s.strategy.harvest(&s.governance);
    assert!(s.strategy.market_balance() > 0);

    s.strategy.set_emergency_exit(&s.strategist);
    s.advance(DEFAULT_REPORT_DELAY + 1);
    assert!(s.can_exec());
    assert!(s.automation.exec(&task_id));

    // the freed want stays idle in the strategy
    assert_eq!(s.strategy.market_balance(), 0);
    assert_eq!(s.strategy.estimated_total_assets(), 100 * E18);
    s.advance(DEFAULT_REPORT_DELAY);
    assert!(!s.can_exec());
    assert!(!s.automation.exec(&task_id));

    // repayment becomes due once the vault revokes the strategy
    s.vault.revoke_strategy(&s.governance, &s.strategy.address);
    assert!(s.can_exec());
    assert!(s.automation.exec(&task_id));
    assert_eq!(s.strategy.estimated_total_assets(), 0);
    assert_eq!(s.vault.total_debt(), 0);
    s.advance(DEFAULT_REPORT_DELAY);
    assert!(!s.can_exec());
}
