//! # Harvest Task Resolver
//!
//! Glue between one strategy and an external keeper automation platform.
//! The platform polls `checker`; when it answers `true` the platform relays
//! the returned payload, a call to `strategy.harvest(automation)`. The
//! strategy must therefore list the automation contract as its keeper.
//!
//! The resolver never moves funds. Its only state besides configuration is
//! the id of the task it registered.

#![no_std]

mod error;
mod events;
mod storage;

pub use error::ResolverError;
pub use events::TaskEvent;

use harvest_interfaces::{AutomationClient, ExecPayload, StrategyClient, VaultClient};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, IntoVal, Symbol, Val, Vec};

fn harvest_fn() -> Symbol {
    symbol_short!("harvest")
}

#[contract]
pub struct StrategyResolver;

#[contractimpl]
impl StrategyResolver {
    /// Binds the resolver to one strategy and one automation platform.
    ///
    /// # Arguments
    /// * `admin` - May start and cancel the task
    /// * `strategy` - Strategy to harvest; must list `automation` as its keeper
    /// * `automation` - Platform that polls `checker` and relays the payload
    ///
    /// # Errors
    /// - `AlreadyInitialized` on a second call
    pub fn initialize(
        env: Env,
        admin: Address,
        strategy: Address,
        automation: Address,
    ) -> Result<(), ResolverError> {
        if storage::is_initialized(&env) {
            return Err(ResolverError::AlreadyInitialized);
        }
        storage::initialize(&env, &admin, &strategy, &automation);
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    /// Registers the harvest task with the automation platform, with this
    /// contract as creator and resolver.
    ///
    /// # Errors
    /// - `TaskAlreadyActive` while a previous task is still registered
    ///
    /// # Events
    /// Emits `TaskEvent` under `task_new`.
    pub fn start_task(env: Env) -> Result<u64, ResolverError> {
        storage::admin(&env)?.require_auth();
        storage::extend_instance_ttl(&env);
        if storage::task_id(&env).is_some() {
            return Err(ResolverError::TaskAlreadyActive);
        }

        let this = env.current_contract_address();
        let strategy = storage::strategy(&env)?;
        let task_id = AutomationClient::new(&env, &storage::automation(&env)?).create_task(
            &this,
            &strategy,
            &harvest_fn(),
            &this,
        );
        storage::set_task_id(&env, task_id);

        env.events()
            .publish((symbol_short!("task_new"),), TaskEvent { task_id, strategy });
        Ok(task_id)
    }

    /// Cancels the registered task so the platform stops polling.
    ///
    /// # Errors
    /// - `NoActiveTask` if no task is registered
    ///
    /// # Events
    /// Emits `TaskEvent` under `task_end`.
    ///
    /// # Security
    /// Admin only.
    pub fn cancel_task(env: Env) -> Result<(), ResolverError> {
        storage::admin(&env)?.require_auth();
        let task_id = storage::task_id(&env).ok_or(ResolverError::NoActiveTask)?;

        AutomationClient::new(&env, &storage::automation(&env)?)
            .cancel_task(&env.current_contract_address(), &task_id);
        storage::clear_task_id(&env);

        env.events().publish(
            (symbol_short!("task_end"),),
            TaskEvent {
                task_id,
                strategy: storage::strategy(&env)?,
            },
        );
        Ok(())
    }

    /// Whether the strategy is due for a harvest, plus the call to make.
    ///
    /// # Returns
    /// `(can_exec, payload)`, where `payload` is always the keeper call
    /// `strategy.harvest(automation)`. `can_exec` is false:
    /// - while the strategy is paused
    /// - once an emergency exit is settled: no market position, no unclaimed
    ///   rewards and no debt the vault wants back
    /// - before `report_delay` has passed since the last report
    pub fn checker(env: Env) -> Result<(bool, ExecPayload), ResolverError> {
        let target = storage::strategy(&env)?;
        let args: Vec<Val> = (storage::automation(&env)?,).into_val(&env);
        let strategy = StrategyClient::new(&env, &target);
        let payload = ExecPayload {
            target,
            function: harvest_fn(),
            args,
        };

        if strategy.is_paused() {
            return Ok((false, payload));
        }
        if strategy.emergency_exit() && Self::exit_settled(&env, &strategy) {
            return Ok((false, payload));
        }
        let due = strategy
            .last_report()
            .saturating_add(strategy.report_delay());
        Ok((env.ledger().timestamp() >= due, payload))
    }

    /// Id of the registered task, if any.
    pub fn task_id(env: Env) -> Option<u64> {
        storage::task_id(&env)
    }

    pub fn strategy(env: Env) -> Result<Address, ResolverError> {
        storage::strategy(&env)
    }

    pub fn automation(env: Env) -> Result<Address, ResolverError> {
        storage::automation(&env)
    }

    pub fn admin(env: Env) -> Result<Address, ResolverError> {
        storage::admin(&env)
    }

    /// An exited strategy has nothing left for a harvest to do once the
    /// market is empty and the vault is not waiting on repayment.
    fn exit_settled(env: &Env, strategy: &StrategyClient<'_>) -> bool {
        if strategy.market_balance() > 0 || strategy.unclaimed_rewards() > 0 {
            return false;
        }
        let vault = VaultClient::new(env, &strategy.vault());
        vault.debt_outstanding(&strategy.address) == 0
    }
}

#[cfg(test)]
mod test;
