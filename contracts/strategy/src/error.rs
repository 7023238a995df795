use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum StrategyError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,

    // harvest gates
    Paused = 10,
    ReportDelayNotElapsed = 11,

    // market and swaps
    MarketMismatch = 20,
    NegativeAmount = 21,
    InvalidQuote = 22,
    SwapFailed = 23,
    SlippageExceeded = 24,
    InvalidSlippage = 25,

    ArithmeticError = 70,
}
