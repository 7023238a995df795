pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;

pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Minimum seconds between keeper-triggered harvests unless reconfigured.
pub const DEFAULT_REPORT_DELAY: u64 = 86_400;

/// Default tolerated gap between a swap quote and its execution, in bps.
pub const DEFAULT_MAX_SLIPPAGE: u32 = 100;

/// Seconds a reward swap stays valid after it is submitted.
pub const SWAP_DEADLINE: u64 = 300;
