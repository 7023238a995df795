use soroban_sdk::{contracttype, Address, Env};

use crate::constants::{
    DEFAULT_MAX_SLIPPAGE, DEFAULT_REPORT_DELAY, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD,
};
use crate::error::StrategyError;

/// All strategy state is small and contract-wide, so it lives in instance
/// storage. The market position itself is never stored; it is read live.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Vault,
    /// Underlying asset, fixed at initialization from `vault.asset()`.
    Want,
    Market,
    Router,
    RewardToken,
    Strategist,
    Keeper,
    /// Seconds the keeper must wait between harvests.
    ReportDelay,
    /// Reward balance below which harvest does not bother swapping.
    MinRewardToSell,
    /// Tolerated swap slippage, in bps.
    MaxSlippage,
    EmergencyExit,
    Paused,
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Vault)
}

fn address(env: &Env, key: &DataKey) -> Result<Address, StrategyError> {
    env.storage()
        .instance()
        .get(key)
        .ok_or(StrategyError::NotInitialized)
}

fn set_address(env: &Env, key: &DataKey, value: &Address) {
    env.storage().instance().set(key, value);
}

pub fn vault(env: &Env) -> Result<Address, StrategyError> {
    address(env, &DataKey::Vault)
}

pub fn set_vault(env: &Env, vault: &Address) {
    set_address(env, &DataKey::Vault, vault);
}

pub fn want(env: &Env) -> Result<Address, StrategyError> {
    address(env, &DataKey::Want)
}

pub fn set_want(env: &Env, want: &Address) {
    set_address(env, &DataKey::Want, want);
}

pub fn market(env: &Env) -> Result<Address, StrategyError> {
    address(env, &DataKey::Market)
}

pub fn set_market(env: &Env, market: &Address) {
    set_address(env, &DataKey::Market, market);
}

pub fn router(env: &Env) -> Result<Address, StrategyError> {
    address(env, &DataKey::Router)
}

pub fn set_router(env: &Env, router: &Address) {
    set_address(env, &DataKey::Router, router);
}

pub fn reward_token(env: &Env) -> Result<Address, StrategyError> {
    address(env, &DataKey::RewardToken)
}

pub fn set_reward_token(env: &Env, token: &Address) {
    set_address(env, &DataKey::RewardToken, token);
}

pub fn strategist(env: &Env) -> Result<Address, StrategyError> {
    address(env, &DataKey::Strategist)
}

pub fn set_strategist(env: &Env, strategist: &Address) {
    set_address(env, &DataKey::Strategist, strategist);
}

pub fn keeper(env: &Env) -> Result<Address, StrategyError> {
    address(env, &DataKey::Keeper)
}

pub fn set_keeper(env: &Env, keeper: &Address) {
    set_address(env, &DataKey::Keeper, keeper);
}

pub fn report_delay(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ReportDelay)
        .unwrap_or(DEFAULT_REPORT_DELAY)
}

pub fn set_report_delay(env: &Env, delay: u64) {
    env.storage().instance().set(&DataKey::ReportDelay, &delay);
}

pub fn min_reward_to_sell(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::MinRewardToSell)
        .unwrap_or(0)
}

pub fn set_min_reward_to_sell(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::MinRewardToSell, &amount);
}

pub fn max_slippage(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::MaxSlippage)
        .unwrap_or(DEFAULT_MAX_SLIPPAGE)
}

pub fn set_max_slippage(env: &Env, bps: u32) {
    env.storage().instance().set(&DataKey::MaxSlippage, &bps);
}

pub fn emergency_exit(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::EmergencyExit)
        .unwrap_or(false)
}

pub fn set_emergency_exit(env: &Env) {
    env.storage().instance().set(&DataKey::EmergencyExit, &true);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}
