//! USD valuation of native-currency amounts through the price feed.
//!
//! All USD figures are fixed point with 18 decimals.

use soroban_sdk::{contractclient, token, Address, Env, I256};

use crate::types::{FundMeError, RoundData};

/// Decimals of every USD figure handled by the contract
pub const USD_DECIMALS: u32 = 18;

/// Largest token precision accepted for conversion; 10^38 still fits i128
const MAX_TOKEN_DECIMALS: u32 = 38;

/// Interface of the price feed aggregator
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    fn latest_round_data(env: Env) -> RoundData;
    fn decimals(env: Env) -> u32;
    fn version(env: Env) -> u32;
}

/// Latest price of one whole token unit in USD.
pub fn get_price(env: &Env, price_feed: &Address) -> Result<i128, FundMeError> {
    let feed = PriceFeedClient::new(env, price_feed);

    let round = match feed.try_latest_round_data() {
        Ok(Ok(round)) => round,
        _ => return Err(FundMeError::InvalidPrice),
    };
    let feed_decimals = match feed.try_decimals() {
        Ok(Ok(decimals)) => decimals,
        _ => return Err(FundMeError::InvalidPrice),
    };

    if round.answer <= 0 {
        return Err(FundMeError::InvalidPrice);
    }

    rescale(round.answer, feed_decimals, USD_DECIMALS)
}

/// USD value of `amount` smallest token units. Rounds down.
pub fn get_conversion_rate(
    env: &Env,
    price_feed: &Address,
    token: &Address,
    amount: i128,
) -> Result<i128, FundMeError> {
    let price = get_price(env, price_feed)?;
    let token_decimals = token::Client::new(env, token).decimals();

    usd_value(env, amount, price, token_decimals)
}

pub fn get_version(env: &Env, price_feed: &Address) -> Result<u32, FundMeError> {
    match PriceFeedClient::new(env, price_feed).try_version() {
        Ok(Ok(version)) => Ok(version),
        _ => Err(FundMeError::InvalidPrice),
    }
}

// The product of two i128 values always fits in 256 bits.
fn usd_value(env: &Env, amount: i128, price: i128, token_decimals: u32) -> Result<i128, FundMeError> {
    if token_decimals > MAX_TOKEN_DECIMALS {
        return Err(FundMeError::ArithmeticOverflow);
    }
    let unit = I256::from_i128(env, pow10(token_decimals)?);

    I256::from_i128(env, amount)
        .mul(&I256::from_i128(env, price))
        .div(&unit)
        .to_i128()
        .ok_or(FundMeError::ArithmeticOverflow)
}

fn rescale(value: i128, from: u32, to: u32) -> Result<i128, FundMeError> {
    if from <= to {
        value
            .checked_mul(pow10(to - from)?)
            .ok_or(FundMeError::ArithmeticOverflow)
    } else {
        Ok(value / pow10(from - to)?)
    }
}

fn pow10(exp: u32) -> Result<i128, FundMeError> {
    10i128.checked_pow(exp).ok_or(FundMeError::ArithmeticOverflow)
}
