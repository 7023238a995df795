use soroban_sdk::{contracttype, Address, Env};

use crate::error::ResolverError;

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Strategy,
    Automation,
    /// Present only while a task is registered with the platform.
    TaskId,
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

fn address(env: &Env, key: &DataKey) -> Result<Address, ResolverError> {
    env.storage()
        .instance()
        .get(key)
        .ok_or(ResolverError::NotInitialized)
}

pub fn admin(env: &Env) -> Result<Address, ResolverError> {
    address(env, &DataKey::Admin)
}

pub fn strategy(env: &Env) -> Result<Address, ResolverError> {
    address(env, &DataKey::Strategy)
}

pub fn automation(env: &Env) -> Result<Address, ResolverError> {
    address(env, &DataKey::Automation)
}

pub fn initialize(env: &Env, admin: &Address, strategy: &Address, automation: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    env.storage().instance().set(&DataKey::Strategy, strategy);
    env.storage().instance().set(&DataKey::Automation, automation);
}

pub fn task_id(env: &Env) -> Option<u64> {
    env.storage().instance().get(&DataKey::TaskId)
}

pub fn set_task_id(env: &Env, task_id: u64) {
    env.storage().instance().set(&DataKey::TaskId, &task_id);
}

pub fn clear_task_id(env: &Env) {
    env.storage().instance().remove(&DataKey::TaskId);
}
