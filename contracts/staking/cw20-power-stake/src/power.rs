use cosmwasm_std::{Addr, Storage, Uint128};

use crate::state::CHECKPOINTS;
use crate::ContractError;

/// Staked units per unit of voting power.
pub const VOTING_POWER_SCALAR: u128 = 1;
/// Staked units per unit of reward power.
pub const REWARD_POWER_SCALAR: u128 = 1;

fn scale(amount: Uint128, scalar: u128) -> Result<Uint128, ContractError> {
    Ok(amount.checked_div(Uint128::new(scalar))?)
}

fn ensure_past(timepoint: u64, now: u64) -> Result<(), ContractError> {
    if timepoint >= now {
        return Err(ContractError::FutureOrPresentTimepointLookup { timepoint, now });
    }
    Ok(())
}

pub fn get_votes(storage: &dyn Storage, account: &Addr) -> Result<Uint128, ContractError> {
    let point = CHECKPOINTS.latest_user_point(storage, account)?;
    scale(point.voting_amount, VOTING_POWER_SCALAR)
}

pub fn get_rewards(storage: &dyn Storage, account: &Addr) -> Result<Uint128, ContractError> {
    let point = CHECKPOINTS.latest_user_point(storage, account)?;
    scale(point.reward_amount, REWARD_POWER_SCALAR)
}

pub fn get_past_votes(
    storage: &dyn Storage,
    account: &Addr,
    timepoint: u64,
    now: u64,
) -> Result<Uint128, ContractError> {
    ensure_past(timepoint, now)?;
    let point = CHECKPOINTS.user_point_at(storage, account, timepoint)?;
    scale(point.voting_amount, VOTING_POWER_SCALAR)
}

pub fn get_past_rewards(
    storage: &dyn Storage,
    account: &Addr,
    timepoint: u64,
    now: u64,
) -> Result<Uint128, ContractError> {
    ensure_past(timepoint, now)?;
    let point = CHECKPOINTS.user_point_at(storage, account, timepoint)?;
    scale(point.reward_amount, REWARD_POWER_SCALAR)
}

pub fn get_total_votes(storage: &dyn Storage) -> Result<Uint128, ContractError> {
    let point = CHECKPOINTS.latest_global_point(storage)?;
    scale(point.voting_amount, VOTING_POWER_SCALAR)
}

pub fn get_total_rewards(storage: &dyn Storage) -> Result<Uint128, ContractError> {
    let point = CHECKPOINTS.latest_global_point(storage)?;
    scale(point.reward_amount, REWARD_POWER_SCALAR)
}

pub fn get_past_total_supply(
    storage: &dyn Storage,
    timepoint: u64,
    now: u64,
) -> Result<Uint128, ContractError> {
    ensure_past(timepoint, now)?;
    let point = CHECKPOINTS.global_point_at(storage, timepoint)?;
    scale(point.voting_amount, VOTING_POWER_SCALAR)
}

pub fn get_past_total_rewards(
    storage: &dyn Storage,
    timepoint: u64,
    now: u64,
) -> Result<Uint128, ContractError> {
    ensure_past(timepoint, now)?;
    let point = CHECKPOINTS.global_point_at(storage, timepoint)?;
    scale(point.reward_amount, REWARD_POWER_SCALAR)
}
