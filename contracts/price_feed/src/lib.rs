//! Price Feed Aggregator Contract
//!
//! Admin-controlled price aggregator. Every update opens a new round; the
//! latest round is what consumers read through `latest_round_data`.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, log, symbol_short, Address, Env, String,
    Symbol,
};

// ──────────────────────────────────────────────────────────
// ERRORS
// ──────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum PriceFeedError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    RoundNotFound = 4,
    InvalidDecimals = 5,
}

// ──────────────────────────────────────────────────────────
// DATA STRUCTURES
// ──────────────────────────────────────────────────────────

/// One price observation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundData {
    pub round_id: u64,
    /// Price of one whole unit of the base asset, scaled by `10^decimals`
    pub answer: i128,
    pub started_at: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeedConfig {
    pub admin: Address,
    pub decimals: u32,
}

#[contracttype]
pub enum DataKey {
    Config,      // FeedConfig
    LatestRound, // u64
    Round(u64),  // RoundData
}

// ──────────────────────────────────────────────────────────
// CONSTANTS & EVENTS
// ──────────────────────────────────────────────────────────

const VERSION: u32 = 0;
const DESCRIPTION: &str = "FundMe price feed aggregator";
const MAX_DECIMALS: u32 = 36;

const EVT_ANSWER: Symbol = symbol_short!("answer");

// ──────────────────────────────────────────────────────────
// CONTRACT
// ──────────────────────────────────────────────────────────

#[contract]
pub struct PriceFeedAggregator;

#[contractimpl]
impl PriceFeedAggregator {
    /// Initialize the feed and publish `initial_answer` as round 1
    pub fn initialize(
        env: Env,
        admin: Address,
        decimals: u32,
        initial_answer: i128,
    ) -> Result<(), PriceFeedError> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(PriceFeedError::AlreadyInitialized);
        }
        if decimals > MAX_DECIMALS {
            return Err(PriceFeedError::InvalidDecimals);
        }

        let config = FeedConfig {
            admin: admin.clone(),
            decimals,
        };
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage().instance().set(&DataKey::LatestRound, &0u64);

        Self::push_round(&env, initial_answer);

        log!(&env, "PriceFeed: initialized with admin {} decimals {}", admin, decimals);
        Ok(())
    }

    /// Publish a new answer as the next round (admin only)
    pub fn update_answer(env: Env, admin: Address, answer: i128) -> Result<u64, PriceFeedError> {
        Self::require_admin(&env, &admin)?;
        Ok(Self::push_round(&env, answer))
    }

    /// Overwrite a specific round and make it the latest (admin only)
    pub fn update_round_data(
        env: Env,
        admin: Address,
        round_id: u64,
        answer: i128,
        timestamp: u64,
        started_at: u64,
    ) -> Result<(), PriceFeedError> {
        Self::require_admin(&env, &admin)?;

        let round = RoundData {
            round_id,
            answer,
            started_at,
            updated_at: timestamp,
            answered_in_round: round_id,
        };
        env.storage().persistent().set(&DataKey::Round(round_id), &round);
        env.storage().instance().set(&DataKey::LatestRound, &round_id);

        env.events().publish((EVT_ANSWER, round_id), answer);
        Ok(())
    }

    // ── Views ─────────────────────────────────────────────

    pub fn latest_round_data(env: Env) -> Result<RoundData, PriceFeedError> {
        let round_id = Self::latest_round(env.clone())?;
        Self::get_round_data(env, round_id)
    }

    pub fn get_round_data(env: Env, round_id: u64) -> Result<RoundData, PriceFeedError> {
        env.storage()
            .persistent()
            .get(&DataKey::Round(round_id))
            .ok_or(PriceFeedError::RoundNotFound)
    }

    pub fn latest_answer(env: Env) -> Result<i128, PriceFeedError> {
        Ok(Self::latest_round_data(env)?.answer)
    }

    pub fn latest_round(env: Env) -> Result<u64, PriceFeedError> {
        env.storage()
            .instance()
            .get(&DataKey::LatestRound)
            .ok_or(PriceFeedError::NotInitialized)
    }

    pub fn decimals(env: Env) -> Result<u32, PriceFeedError> {
        Ok(Self::load_config(&env)?.decimals)
    }

    pub fn version(_env: Env) -> u32 {
        VERSION
    }

    pub fn description(env: Env) -> String {
        String::from_str(&env, DESCRIPTION)
    }

    pub fn admin(env: Env) -> Result<Address, PriceFeedError> {
        Ok(Self::load_config(&env)?.admin)
    }

    // ──────────────────────────────────────────────────────────
    // INTERNAL HELPERS
    // ──────────────────────────────────────────────────────────

    fn load_config(env: &Env) -> Result<FeedConfig, PriceFeedError> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(PriceFeedError::NotInitialized)
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), PriceFeedError> {
        caller.require_auth();
        let config = Self::load_config(env)?;
        if *caller != config.admin {
            return Err(PriceFeedError::Unauthorized);
        }
        Ok(())
    }

    fn push_round(env: &Env, answer: i128) -> u64 {
        let latest: u64 = env
            .storage()
            .instance()
            .get(&DataKey::LatestRound)
            .unwrap_or(0);
        let round_id = latest + 1;
        let now = env.ledger().timestamp();

        let round = RoundData {
            round_id,
            answer,
            started_at: now,
            updated_at: now,
            answered_in_round: round_id,
        };
        env.storage().persistent().set(&DataKey::Round(round_id), &round);
        env.storage().instance().set(&DataKey::LatestRound, &round_id);

        env.events().publish((EVT_ANSWER, round_id), answer);
        log!(env, "PriceFeed: round {} answer {}", round_id, answer);
        round_id
    }
}
