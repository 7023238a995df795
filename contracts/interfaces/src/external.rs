//! Clients for contracts this workspace does not own.

use soroban_sdk::{contractclient, Address, Env, Symbol, Vec};

/// Compound-style lending market holding a single underlying asset.
///
/// Market shares accrue value through the market's exchange rate; the
/// strategy only ever reads positions in underlying terms.
#[contractclient(name = "YieldMarketClient")]
pub trait YieldMarketInterface {
    fn underlying(env: Env) -> Address;

    fn reward_token(env: Env) -> Address;

    /// Pulls `amount` underlying from `from` and mints market shares to it.
    /// Returns the shares minted.
    fn supply(env: Env, from: Address, amount: i128) -> i128;

    /// Burns enough shares of `to` to pay out exactly `amount` underlying.
    /// Returns the shares burned.
    fn redeem_underlying(env: Env, to: Address, amount: i128) -> i128;

    /// Burns `shares` of `to` and pays out their underlying value.
    fn redeem(env: Env, to: Address, shares: i128) -> i128;

    fn balance_of(env: Env, holder: Address) -> i128;

    /// Accrues interest, then returns the underlying value of `holder`'s shares.
    fn balance_of_underlying(env: Env, holder: Address) -> i128;

    /// Underlying the market can pay out right now.
    fn get_cash(env: Env) -> i128;

    /// Reward tokens accrued to `holder` and not yet claimed.
    fn rewards_accrued(env: Env, holder: Address) -> i128;

    /// Sends `holder` its accrued reward tokens and returns the amount.
    fn claim_rewards(env: Env, holder: Address) -> i128;
}

/// Path-based AMM router. Each returned vector holds the realized amount for
/// every hop of `path`; the last element is the final output.
#[contractclient(name = "SwapRouterClient")]
pub trait SwapRouterInterface {
    fn swap_exact_tokens_for_tokens(
        env: Env,
        amount_in: i128,
        amount_out_min: i128,
        path: Vec<Address>,
        to: Address,
        deadline: u64,
    ) -> Vec<i128>;

    fn router_get_amounts_out(env: Env, amount_in: i128, path: Vec<Address>) -> Vec<i128>;
}

/// Off-chain keeper network. A task binds an execution target to a resolver
/// whose `checker` decides when the target is called.
#[contractclient(name = "AutomationClient")]
pub trait AutomationInterface {
    fn create_task(
        env: Env,
        creator: Address,
        exec_target: Address,
        exec_function: Symbol,
        resolver: Address,
    ) -> u64;

    fn cancel_task(env: Env, creator: Address, task_id: u64);
}
