use soroban_sdk::{Address, Env};
use crate::types::{DataKey, FundMeConfig};

/// Store contract configuration
pub fn set_config(env: &Env, config: &FundMeConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

/// Get contract configuration
pub fn get_config(env: &Env) -> Option<FundMeConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

/// Number of entries in the funder list
pub fn get_funder_count(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::FunderCount).unwrap_or(0)
}

pub fn set_funder_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::FunderCount, &count);
}

/// Get the funder at `index`, if the list is that long
pub fn get_funder_at(env: &Env, index: u32) -> Option<Address> {
    if index >= get_funder_count(env) {
        return None;
    }
    env.storage().persistent().get(&DataKey::Funder(index))
}

/// Append a funder to the list
pub fn push_funder(env: &Env, funder: &Address) {
    let index = get_funder_count(env);
    env.storage().persistent().set(&DataKey::Funder(index), funder);
    set_funder_count(env, index + 1);
}

/// Remove and return the entry at `index` without checking the list length
pub fn take_funder_at(env: &Env, index: u32) -> Option<Address> {
    let key = DataKey::Funder(index);
    let funder = env.storage().persistent().get(&key);
    if funder.is_some() {
        env.storage().persistent().remove(&key);
    }
    funder
}

pub fn remove_funder_at(env: &Env, index: u32) {
    env.storage().persistent().remove(&DataKey::Funder(index));
}

/// Get the cumulative amount funded by an address
pub fn get_amount_funded(env: &Env, funder: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::AmountFunded(funder.clone()))
        .unwrap_or(0)
}

/// Store the cumulative amount funded by an address
pub fn set_amount_funded(env: &Env, funder: &Address, amount: i128) {
    env.storage().persistent().set(&DataKey::AmountFunded(funder.clone()), &amount);
}

pub fn has_amount_funded(env: &Env, funder: &Address) -> bool {
    env.storage().persistent().has(&DataKey::AmountFunded(funder.clone()))
}

/// Drop the ledger entry of an address
pub fn remove_amount_funded(env: &Env, funder: &Address) {
    env.storage().persistent().remove(&DataKey::AmountFunded(funder.clone()));
}
