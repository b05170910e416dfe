use cosmwasm_std::{Addr, StdResult, Storage};
use cw_power_checkpoints::{PowerDelta, StakeInfo};
use cw_storage_plus::Map;

use crate::state::{load_position, CHECKPOINTS, REWARD_DELEGATES, VOTE_DELEGATES};
use crate::ContractError;

/// The two kinds of power that can be delegated independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerKind {
    Votes,
    Rewards,
}

impl PowerKind {
    fn delegates(self) -> Map<'static, &'static Addr, Addr> {
        match self {
            PowerKind::Votes => VOTE_DELEGATES,
            PowerKind::Rewards => REWARD_DELEGATES,
        }
    }

    fn checkpoint(
        self,
        storage: &mut dyn Storage,
        account: &Addr,
        delta: PowerDelta,
        now: u64,
    ) -> StdResult<()> {
        match self {
            PowerKind::Votes => {
                CHECKPOINTS.checkpoint_vote_delegation(storage, account, delta, now)?;
            }
            PowerKind::Rewards => {
                CHECKPOINTS.checkpoint_reward_delegation(storage, account, delta, now)?;
            }
        }
        Ok(())
    }
}

/// The account `account`'s power of `kind` is attributed to.
pub fn delegate_of(storage: &dyn Storage, account: &Addr, kind: PowerKind) -> StdResult<Addr> {
    Ok(kind
        .delegates()
        .may_load(storage, account)?
        .unwrap_or_else(|| account.clone()))
}

pub fn vote_delegate(storage: &dyn Storage, account: &Addr) -> StdResult<Addr> {
    delegate_of(storage, account, PowerKind::Votes)
}

pub fn reward_delegate(storage: &dyn Storage, account: &Addr) -> StdResult<Addr> {
    delegate_of(storage, account, PowerKind::Rewards)
}

/// Records the change of `owner`'s position from `old` to `new`.
/// Power kinds `owner` has delegated are credited to or debited from
/// the delegatee instead of `owner`. The global totals always move by
/// the change in effective amount.
pub fn checkpoint_stake_change(
    storage: &mut dyn Storage,
    owner: &Addr,
    old: &StakeInfo,
    new: &StakeInfo,
    now: u64,
) -> StdResult<()> {
    let vote_delegatee = vote_delegate(storage, owner)?;
    let reward_delegatee = reward_delegate(storage, owner)?;

    let (voting, reward) = CHECKPOINTS.checkpoint_with_delegation(
        storage,
        owner,
        old,
        new,
        vote_delegatee != *owner,
        reward_delegatee != *owner,
        now,
    )?;
    if !voting.is_zero() {
        PowerKind::Votes.checkpoint(storage, &vote_delegatee, voting, now)?;
    }
    if !reward.is_zero() {
        PowerKind::Rewards.checkpoint(storage, &reward_delegatee, reward, now)?;
    }

    CHECKPOINTS.update_global_checkpoint(storage, old, new, now)
}

/// Attributes `account`'s power of `kind` to `delegatee`, moving the
/// account's current effective amount away from whoever held it
/// before. The position itself is not modified. Returns the previous
/// delegatee.
pub fn change_delegate(
    storage: &mut dyn Storage,
    account: &Addr,
    delegatee: &Addr,
    kind: PowerKind,
    now: u64,
) -> Result<Addr, ContractError> {
    let previous = delegate_of(storage, account, kind)?;
    if previous == *delegatee {
        return Ok(previous);
    }

    if delegatee == account {
        kind.delegates().remove(storage, account);
    } else {
        kind.delegates().save(storage, account, delegatee)?;
    }

    let amount = load_position(storage, account)?
        .map(|(_, stake)| stake.effective_amount())
        .unwrap_or_default();
    if !amount.is_zero() {
        kind.checkpoint(storage, &previous, PowerDelta::Decrease(amount), now)?;
        kind.checkpoint(storage, delegatee, PowerDelta::Increase(amount), now)?;
    }

    Ok(previous)
}
