use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,

    // amounts and ledger
    NegativeAmount = 10,
    ZeroAmount = 11,
    ZeroShares = 12,
    ZeroAssets = 13,
    InsufficientBalance = 14,
    InsufficientAllowance = 15,
    TransferFailed = 16,
    ExceedsMaxWithdraw = 17,
    ExceedsMaxRedeem = 18,
    InsufficientLiquidity = 19,

    // strategy registry
    QueueFull = 30,
    DebtRatioLimit = 31,
    StrategyAlreadyActive = 32,
    StrategyNotActive = 33,
    StrategyMismatch = 34,
    StrategyHasDebt = 35,
    IndexOutOfRange = 36,
    InvalidFee = 37,

    // reporting
    ReportNotFunded = 50,
    LossExceedsDebt = 51,
    DebtPaymentExceedsDebt = 52,

    ArithmeticError = 70,
    DivisionByZero = 71,
}
