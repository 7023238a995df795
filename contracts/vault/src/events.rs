use soroban_sdk::{contracttype, Address};

/// Emitted on `deposit` and `mint`.
///
/// # Topics
/// - `SymbolShort("deposit")`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub caller: Address,
    pub receiver: Address,
    pub assets: i128,
    pub shares: i128,
}

/// Emitted on `withdraw` and `redeem`.
///
/// # Topics
/// - `SymbolShort("withdraw")`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub caller: Address,
    pub receiver: Address,
    pub owner: Address,
    pub assets: i128,
    pub shares: i128,
}

/// # Topics
/// - `SymbolShort("approve")`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApprovalEvent {
    pub owner: Address,
    pub spender: Address,
    pub amount: i128,
}

/// Share movements through `transfer` and `transfer_from`.
///
/// # Topics
/// - `SymbolShort("transfer")`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
}

/// # Topics
/// - `SymbolShort("strat_add")` when a strategy joins the queue
/// - `SymbolShort("strat_upd")` when its debt ratio or fee changes
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrategyConfigEvent {
    pub strategy: Address,
    pub debt_ratio: u32,
    pub performance_fee: u32,
}

/// # Topics
/// - `SymbolShort("strat_rev")` when the debt ratio is forced to zero
/// - `SymbolShort("strat_rm")` when the strategy leaves the queue
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrategyRemovedEvent {
    pub strategy: Address,
}

/// # Topics
/// - `SymbolShort("migrated")`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrategyMigratedEvent {
    pub old_strategy: Address,
    pub new_strategy: Address,
    pub total_debt: i128,
}

/// # Topics
/// - `SymbolShort("report")`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrategyReportedEvent {
    pub strategy: Address,
    pub gain: i128,
    pub loss: i128,
    pub debt_payment: i128,
    pub credit: i128,
    pub total_debt: i128,
    pub fee_shares: i128,
}

/// # Topics
/// - `SymbolShort("gov_set")`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GovernanceEvent {
    pub old_governance: Address,
    pub new_governance: Address,
}
