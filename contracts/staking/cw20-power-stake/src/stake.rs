//! Transitions of a single stake position:
//! `None -> Active -> Withdrawing -> None`.
//!
//! Every function here is a pure check over a snapshot of the position
//! and returns the state that should be written back, or the reason the
//! transition is illegal. Nothing is written to storage.

use cosmwasm_std::Uint128;
use cw_power_checkpoints::StakeInfo;

use crate::ContractError;

/// 30 days.
pub const DEFAULT_WITHDRAWAL_PERIOD: u64 = 30 * 24 * 60 * 60;

pub fn create_stake(
    existing: Option<&StakeInfo>,
    amount: Uint128,
) -> Result<StakeInfo, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    if existing.is_some() {
        return Err(ContractError::UserAlreadyHasActivePosition {});
    }
    Ok(StakeInfo {
        amount,
        withdrawal_requested_at: 0,
    })
}

pub fn add_to_stake(
    stake: Option<&StakeInfo>,
    amount: Uint128,
) -> Result<StakeInfo, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    let stake = stake.ok_or(ContractError::NoActivePosition {})?;
    if stake.is_withdrawing() {
        return Err(ContractError::CannotAddToWithdrawingPosition {});
    }
    Ok(StakeInfo {
        amount: stake.amount.checked_add(amount)?,
        withdrawal_requested_at: 0,
    })
}

pub fn initiate_withdrawal(
    stake: Option<&StakeInfo>,
    now: u64,
) -> Result<StakeInfo, ContractError> {
    let stake = stake.ok_or(ContractError::NoActivePosition {})?;
    if stake.is_withdrawing() {
        return Err(ContractError::WithdrawalAlreadyInitiated {});
    }
    // A zero request time reads as "not withdrawing".
    if now == 0 {
        return Err(ContractError::ZeroWithdrawalTime {});
    }
    Ok(StakeInfo {
        amount: stake.amount,
        withdrawal_requested_at: now,
    })
}

/// The time at which a withdrawing position may be completed.
pub fn withdrawal_available_at(stake: &StakeInfo, withdrawal_period: u64) -> u64 {
    stake
        .withdrawal_requested_at
        .saturating_add(withdrawal_period)
}

pub fn can_complete_withdrawal(stake: &StakeInfo, now: u64, withdrawal_period: u64) -> bool {
    stake.is_withdrawing() && now >= withdrawal_available_at(stake, withdrawal_period)
}

/// Validates closing the position and returns the principal to release.
pub fn complete_withdrawal(
    stake: Option<&StakeInfo>,
    now: u64,
    withdrawal_period: u64,
) -> Result<Uint128, ContractError> {
    let stake = stake.ok_or(ContractError::NoActivePosition {})?;
    if !stake.is_withdrawing() {
        return Err(ContractError::WithdrawalNotInitiated {});
    }
    if !can_complete_withdrawal(stake, now, withdrawal_period) {
        return Err(ContractError::WithdrawalPeriodNotComplete {
            available_at: withdrawal_available_at(stake, withdrawal_period),
        });
    }
    Ok(stake.amount)
}
