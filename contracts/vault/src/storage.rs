use harvest_interfaces::StrategyParams;
use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::constants::{
    BALANCE_BUMP_AMOUNT, BALANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT,
    INSTANCE_LIFETIME_THRESHOLD,
};
use crate::error::VaultError;

/// Storage keys for vault state.
///
/// Contract-wide configuration and running totals live in instance storage.
/// Share balances, allowances and strategy records live in persistent storage.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Admin of the vault; receives performance fees.
    Governance,
    /// The underlying token accepted by the vault.
    Asset,
    /// Default performance fee for newly added strategies, in bps.
    PerformanceFee,
    TotalSupply,
    /// Asset held by the vault itself, as accounted (donations are ignored).
    TotalIdle,
    /// Sum of `total_debt` over all strategies.
    TotalDebt,
    /// Sum of `debt_ratio` over all strategies.
    DebtRatio,
    WithdrawalQueue,
    LastReport,
    Balance(Address),
    Allowance(Address, Address),
    Strategy(Address),
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Asset)
}

pub fn governance(env: &Env) -> Result<Address, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Governance)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_governance(env: &Env, governance: &Address) {
    env.storage().instance().set(&DataKey::Governance, governance);
}

pub fn asset(env: &Env) -> Result<Address, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Asset)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_asset(env: &Env, asset: &Address) {
    env.storage().instance().set(&DataKey::Asset, asset);
}

pub fn performance_fee(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::PerformanceFee)
        .unwrap_or(0)
}

pub fn set_performance_fee(env: &Env, fee: u32) {
    env.storage().instance().set(&DataKey::PerformanceFee, &fee);
}

fn read_i128(env: &Env, key: &DataKey) -> i128 {
    env.storage().instance().get(key).unwrap_or(0)
}

pub fn total_supply(env: &Env) -> i128 {
    read_i128(env, &DataKey::TotalSupply)
}

pub fn set_total_supply(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &amount);
}

pub fn total_idle(env: &Env) -> i128 {
    read_i128(env, &DataKey::TotalIdle)
}

pub fn set_total_idle(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalIdle, &amount);
}

pub fn total_debt(env: &Env) -> i128 {
    read_i128(env, &DataKey::TotalDebt)
}

pub fn set_total_debt(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalDebt, &amount);
}

pub fn debt_ratio(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::DebtRatio)
        .unwrap_or(0)
}

pub fn set_debt_ratio(env: &Env, ratio: u32) {
    env.storage().instance().set(&DataKey::DebtRatio, &ratio);
}

pub fn last_report(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::LastReport)
        .unwrap_or(0)
}

pub fn set_last_report(env: &Env, timestamp: u64) {
    env.storage().instance().set(&DataKey::LastReport, &timestamp);
}

pub fn withdrawal_queue(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::WithdrawalQueue)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn set_withdrawal_queue(env: &Env, queue: &Vec<Address>) {
    env.storage().instance().set(&DataKey::WithdrawalQueue, queue);
}

// ---------------------------------------------------------------------------
// Persistent entries
// ---------------------------------------------------------------------------

fn read_persistent<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
    }
    value
}

fn write_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

pub fn balance(env: &Env, id: &Address) -> i128 {
    read_persistent(env, &DataKey::Balance(id.clone())).unwrap_or(0)
}

pub fn set_balance(env: &Env, id: &Address, amount: i128) {
    write_persistent(env, &DataKey::Balance(id.clone()), &amount);
}

pub fn allowance(env: &Env, owner: &Address, spender: &Address) -> i128 {
    read_persistent(env, &DataKey::Allowance(owner.clone(), spender.clone())).unwrap_or(0)
}

pub fn set_allowance(env: &Env, owner: &Address, spender: &Address, amount: i128) {
    write_persistent(env, &DataKey::Allowance(owner.clone(), spender.clone()), &amount);
}

pub fn strategy(env: &Env, strategy: &Address) -> Option<StrategyParams> {
    read_persistent(env, &DataKey::Strategy(strategy.clone()))
}

pub fn set_strategy(env: &Env, strategy: &Address, params: &StrategyParams) {
    write_persistent(env, &DataKey::Strategy(strategy.clone()), params);
}

pub fn remove_strategy(env: &Env, strategy: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Strategy(strategy.clone()));
}
