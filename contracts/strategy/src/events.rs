//! Event payloads. `harvested` publishes the `HarvestReport` itself.

use soroban_sdk::{contracttype, Address};

/// # Topics
/// - `SymbolShort("swapped")`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsSwappedEvent {
    pub amount_in: i128,
    pub amount_out: i128,
}

/// # Topics
/// - `SymbolShort("emergency")`
/// - `SymbolShort("paused")`
/// - `SymbolShort("unpaused")`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StateChangedEvent {
    pub caller: Address,
}

/// # Topics
/// - `SymbolShort("set_strat")`
/// - `SymbolShort("set_keep")`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub old_holder: Address,
    pub new_holder: Address,
}

/// # Topics
/// - `SymbolShort("config")`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub report_delay: u64,
    pub min_reward_to_sell: i128,
    pub max_slippage: u32,
}
