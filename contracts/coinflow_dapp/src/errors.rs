use soroban_sdk::contracterror;

/// Error codes returned by the CoinFlow ledger contract.
///
/// Codes start at 100 so they never collide with the investment pool's 2xx range.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CoinflowError {
    Unauthorized = 100,
    NotFound = 101,
    InvalidAmount = 102,
    InvalidCategory = 103,
    InsufficientBalance = 104,
    InvalidTransactionType = 105,
    DuplicateEntry = 106,
    ContractPaused = 107,
    InvalidInput = 108,
    CategoryExists = 109,
    UserNotRegistered = 110,
    InvalidBudgetPeriod = 111,
    LimitExceeded = 112,
    AlreadyInitialized = 113,
    NotInitialized = 114,
}
