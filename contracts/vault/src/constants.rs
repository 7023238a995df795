pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;

pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub(crate) const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const BALANCE_LIFETIME_THRESHOLD: u32 = BALANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Upper bound on the withdrawal queue length.
pub const MAX_STRATEGIES: u32 = 20;

/// Ceiling for any performance fee, in basis points.
pub const MAX_PERFORMANCE_FEE: u32 = 5_000;

/// Allowance value that is never decremented.
pub const UNLIMITED_ALLOWANCE: i128 = i128::MAX;
