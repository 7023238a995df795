//! # Harvest Interfaces
//!
//! Cross-contract surface shared by the vault, the strategy and the task
//! resolver, plus the client traits for the external collaborators they
//! drive (yield market, swap router, automation platform).
//!
//! Every trait here is turned into a typed client by `#[contractclient]`.
//! Return types are the success types of the implementing contract; a
//! contract error on the far side aborts the calling invocation.

#![no_std]

mod external;
mod types;

pub use external::*;
pub use types::*;

use soroban_sdk::{contractclient, Address, Env};

/// Basis-point denominator used for debt ratios, fees and slippage.
pub const MAX_BPS: u32 = 10_000;

/// Surface of the vault that strategies and resolvers call into.
#[contractclient(name = "VaultClient")]
pub trait VaultInterface {
    fn asset(env: Env) -> Address;

    fn governance(env: Env) -> Address;

    fn strategy_params(env: Env, strategy: Address) -> StrategyParams;

    /// Amount the strategy holds above its debt limit.
    fn debt_outstanding(env: Env, strategy: Address) -> i128;

    /// Records the outcome of a harvest. The caller must have transferred
    /// `gain + debt_payment` of the asset to the vault beforehand.
    fn report(env: Env, strategy: Address, gain: i128, loss: i128, debt_payment: i128)
        -> ReportOutcome;
}

/// Surface of a strategy as seen by the vault and the task resolver.
#[contractclient(name = "StrategyClient")]
pub trait StrategyInterface {
    fn want(env: Env) -> Address;

    fn vault(env: Env) -> Address;

    /// Vault-only. Frees up to `amount_needed` of want and sends it to the vault.
    fn withdraw(env: Env, amount_needed: i128) -> Liquidation;

    /// Vault-only. Moves the whole position to `new_strategy`.
    fn migrate(env: Env, new_strategy: Address);

    fn is_paused(env: Env) -> bool;

    fn emergency_exit(env: Env) -> bool;

    fn report_delay(env: Env) -> u64;

    fn last_report(env: Env) -> u64;

    fn estimated_total_assets(env: Env) -> i128;

    /// Market shares held by the strategy.
    fn market_balance(env: Env) -> i128;

    /// Reward tokens the market has accrued to the strategy but not paid out.
    fn unclaimed_rewards(env: Env) -> i128;
}
