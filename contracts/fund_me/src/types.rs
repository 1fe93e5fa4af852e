use soroban_sdk::{contracterror, contracttype, Address};

/// Deployment parameters fixed at initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundMeConfig {
    /// The only address allowed to withdraw
    pub owner: Address,
    /// Token contract holding the native currency
    pub token: Address,
    /// Price feed aggregator quoting the token in USD
    pub price_feed: Address,
    /// Smallest accepted contribution in USD, scaled by 10^18
    pub minimum_usd: i128,
}

/// Round as reported by the price feed aggregator.
///
/// Decoded from the feed's return value by field name, so the field names
/// and types must stay identical to the aggregator's `RoundData`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundData {
    pub round_id: u64,
    /// Price of one whole token unit in USD, scaled by `10^decimals` of the feed
    pub answer: i128,
    /// Ledger timestamp when the round opened
    pub started_at: u64,
    /// Ledger timestamp of the last answer in the round
    pub updated_at: u64,
    pub answered_in_round: u64,
}

/// Data keys for storage
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// FundMeConfig
    Config,
    /// Funder at a position in the list, one entry per `fund` call
    Funder(u32),
    /// Length of the funder list
    FunderCount,
    /// Cumulative amount funded by an address
    AmountFunded(Address),
}

/// Errors that can occur in the contract
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum FundMeError {
    /// Contract not initialized
    NotInitialized = 1,
    /// Already initialized
    AlreadyInitialized = 2,
    /// Payment worth less than the USD minimum
    InsufficientPayment = 3,
    /// Caller is not the owner
    NotOwner = 4,
    /// Payout to the owner failed
    TransferFailed = 5,
    /// Funder index past the end of the list
    IndexOutOfRange = 6,
    /// Price feed unavailable or reported a non-positive answer
    InvalidPrice = 7,
    /// Conversion overflowed i128
    ArithmeticOverflow = 8,
    /// Negative USD minimum
    InvalidMinimum = 9,
}
