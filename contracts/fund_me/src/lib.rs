//! FundMe Contract
//!
//! Crowdfunding ledger with a USD-denominated minimum contribution and
//! owner-only withdrawal of the whole balance.

#![no_std]
use soroban_sdk::{contract, contractimpl, log, symbol_short, token, Address, Env, Symbol};

pub mod price_converter;
mod storage;
pub mod types;

use crate::storage::*;
use crate::types::*;

/// Default minimum contribution: 50 USD with 18 decimals
pub const DEFAULT_MINIMUM_USD: i128 = 50 * 1_000_000_000_000_000_000;

// Event symbols
const FUNDED: Symbol = symbol_short!("funded");
const WITHDRAWN: Symbol = symbol_short!("withdrawn");

#[contract]
pub struct FundMe;

#[contractimpl]
impl FundMe {
    // ==================== INITIALIZATION ====================

    /// Initialize with the owner, the native token and its USD price feed
    pub fn initialize(
        env: Env,
        owner: Address,
        token: Address,
        price_feed: Address,
        minimum_usd: i128,
    ) -> Result<(), FundMeError> {
        if has_config(&env) {
            return Err(FundMeError::AlreadyInitialized);
        }
        if minimum_usd < 0 {
            return Err(FundMeError::InvalidMinimum);
        }

        owner.require_auth();

        let config = FundMeConfig {
            owner: owner.clone(),
            token,
            price_feed,
            minimum_usd,
        };
        set_config(&env, &config);

        log!(&env, "FundMe: initialized with owner {}", owner);
        Ok(())
    }

    // ==================== FUNDING ====================

    /// Contribute `amount` of the native token. The payment must be worth at
    /// least the configured USD minimum at the current feed price.
    pub fn fund(env: Env, funder: Address, amount: i128) -> Result<(), FundMeError> {
        funder.require_auth();

        let config = Self::load_config(&env)?;

        if amount <= 0 {
            return Err(FundMeError::InsufficientPayment);
        }
        let usd_value = price_converter::get_conversion_rate(
            &env,
            &config.price_feed,
            &config.token,
            amount,
        )?;
        if usd_value < config.minimum_usd {
            return Err(FundMeError::InsufficientPayment);
        }

        let total = get_amount_funded(&env, &funder)
            .checked_add(amount)
            .ok_or(FundMeError::ArithmeticOverflow)?;

        let token_client = token::Client::new(&env, &config.token);
        token_client.transfer(&funder, &env.current_contract_address(), &amount);

        set_amount_funded(&env, &funder, total);
        push_funder(&env, &funder);

        env.events().publish((FUNDED, funder.clone()), amount);
        log!(&env, "FundMe: {} funded {} (usd value {})", funder, amount, usd_value);
        Ok(())
    }

    // ==================== WITHDRAWAL ====================

    /// Send the whole balance to the owner and reset the ledger (owner only)
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, FundMeError> {
        let config = Self::require_owner(&env, &caller)?;

        let mut index = 0;
        while index < get_funder_count(&env) {
            if let Some(funder) = get_funder_at(&env, index) {
                set_amount_funded(&env, &funder, 0);
            }
            remove_funder_at(&env, index);
            index += 1;
        }
        set_funder_count(&env, 0);

        Self::payout(&env, &config)
    }

    /// Same outcome as `withdraw`. Reads the list length once and drops
    /// each funder's ledger entry only the first time the funder is seen.
    pub fn cheaper_withdraw(env: Env, caller: Address) -> Result<i128, FundMeError> {
        let config = Self::require_owner(&env, &caller)?;

        let count = get_funder_count(&env);
        for index in 0..count {
            if let Some(funder) = take_funder_at(&env, index) {
                if has_amount_funded(&env, &funder) {
                    remove_amount_funded(&env, &funder);
                }
            }
        }
        set_funder_count(&env, 0);

        Self::payout(&env, &config)
    }

    // ==================== PRICE ====================

    /// Latest USD price of one whole token unit, 18 decimals
    pub fn get_price(env: Env) -> Result<i128, FundMeError> {
        let config = Self::load_config(&env)?;
        price_converter::get_price(&env, &config.price_feed)
    }

    /// USD value of `amount` smallest token units, 18 decimals
    pub fn get_conversion_rate(env: Env, amount: i128) -> Result<i128, FundMeError> {
        let config = Self::load_config(&env)?;
        price_converter::get_conversion_rate(&env, &config.price_feed, &config.token, amount)
    }

    pub fn get_version(env: Env) -> Result<u32, FundMeError> {
        let config = Self::load_config(&env)?;
        price_converter::get_version(&env, &config.price_feed)
    }

    // ==================== QUERIES ====================

    pub fn get_address_to_amount_funded(env: Env, funder: Address) -> i128 {
        get_amount_funded(&env, &funder)
    }

    pub fn get_funder(env: Env, index: u32) -> Result<Address, FundMeError> {
        get_funder_at(&env, index).ok_or(FundMeError::IndexOutOfRange)
    }

    pub fn get_funders_count(env: Env) -> u32 {
        get_funder_count(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, FundMeError> {
        Ok(Self::load_config(&env)?.owner)
    }

    pub fn get_price_feed(env: Env) -> Result<Address, FundMeError> {
        Ok(Self::load_config(&env)?.price_feed)
    }

    pub fn get_token(env: Env) -> Result<Address, FundMeError> {
        Ok(Self::load_config(&env)?.token)
    }

    pub fn get_minimum_usd(env: Env) -> Result<i128, FundMeError> {
        Ok(Self::load_config(&env)?.minimum_usd)
    }

    /// Token balance currently held by the contract
    pub fn get_balance(env: Env) -> Result<i128, FundMeError> {
        let config = Self::load_config(&env)?;
        Ok(token::Client::new(&env, &config.token).balance(&env.current_contract_address()))
    }

    pub fn get_config(env: Env) -> Result<FundMeConfig, FundMeError> {
        Self::load_config(&env)
    }

    // ==================== INTERNAL HELPERS ====================

    fn load_config(env: &Env) -> Result<FundMeConfig, FundMeError> {
        get_config(env).ok_or(FundMeError::NotInitialized)
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<FundMeConfig, FundMeError> {
        caller.require_auth();
        let config = Self::load_config(env)?;
        if *caller != config.owner {
            return Err(FundMeError::NotOwner);
        }
        Ok(config)
    }

    // An error here reverts the ledger reset done by the caller.
    fn payout(env: &Env, config: &FundMeConfig) -> Result<i128, FundMeError> {
        let token_client = token::Client::new(env, &config.token);
        let contract = env.current_contract_address();
        let balance = token_client.balance(&contract);

        if balance > 0 {
            match token_client.try_transfer(&contract, &config.owner, &balance) {
                Ok(Ok(())) => {}
                _ => return Err(FundMeError::TransferFailed),
            }
        }

        env.events().publish((WITHDRAWN, config.owner.clone()), balance);
        log!(env, "FundMe: withdrew {} to {}", balance, config.owner);
        Ok(balance)
    }
}
