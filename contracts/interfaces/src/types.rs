use soroban_sdk::{contracttype, Address, Symbol, Val, Vec};

/// Vault-side accounting record for one registered strategy.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrategyParams {
    /// Share of reported gains taken as fee, in basis points.
    pub performance_fee: u32,
    /// Ledger timestamp at which the strategy was added.
    pub activation: u64,
    /// Target share of vault assets, in basis points. Zero means the strategy
    /// holds the vault's unallocated remainder without investing it.
    pub debt_ratio: u32,
    /// Set by `revoke_strategy`; a revoked strategy owes back its whole debt.
    pub revoked: bool,
    /// Assets currently lent to the strategy.
    pub total_debt: i128,
    pub total_gain: i128,
    pub total_loss: i128,
    /// Ledger timestamp of the last `report`.
    pub last_report: u64,
}

/// Returned by `Vault::report` so the strategy can settle without reading events.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportOutcome {
    pub gain: i128,
    pub loss: i128,
    /// Debt actually repaid by this report.
    pub debt_payment: i128,
    /// Fresh funds pushed to the strategy by this report.
    pub credit: i128,
    /// Debt the strategy still holds above its limit after this report.
    pub debt_outstanding: i128,
    pub total_debt: i128,
    /// Shares minted to governance as performance fee.
    pub fee_shares: i128,
}

/// Result of a partial-tolerant liquidation. `liquidated + shortfall` equals
/// the amount that was asked for.
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Liquidation {
    pub liquidated: i128,
    pub shortfall: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestReport {
    pub profit: i128,
    pub loss: i128,
    pub debt_payment: i128,
    pub debt_outstanding: i128,
    pub total_debt: i128,
}

/// Call the automation platform relays when a resolver says it can execute.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecPayload {
    pub target: Address,
    pub function: Symbol,
    pub args: Vec<Val>,
}
