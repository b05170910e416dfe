use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdError, StdResult, Uint128};

/// Power held by a key, effective from `updated_at` until a later
/// point for the same key supersedes it.
#[cw_serde]
#[derive(Default)]
pub struct Point {
    pub voting_amount: Uint128,
    pub reward_amount: Uint128,
    /// Block time in seconds.
    pub updated_at: u64,
}

/// The amount staked in a single position and whether a withdrawal
/// has been requested for it.
#[cw_serde]
#[derive(Default)]
pub struct StakeInfo {
    pub amount: Uint128,
    /// Zero while the position is active. Otherwise the block time, in
    /// seconds, at which withdrawal was requested.
    pub withdrawal_requested_at: u64,
}

impl StakeInfo {
    pub fn is_withdrawing(&self) -> bool {
        self.withdrawal_requested_at != 0
    }

    /// The amount this position contributes to voting and reward
    /// power. A withdrawing position contributes nothing.
    pub fn effective_amount(&self) -> Uint128 {
        if self.is_withdrawing() {
            Uint128::zero()
        } else {
            self.amount
        }
    }
}

/// A signed change to an unsigned power amount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerDelta {
    #[default]
    Zero,
    Increase(Uint128),
    Decrease(Uint128),
}

impl PowerDelta {
    /// The delta that takes `old` to `new`.
    pub fn between(old: Uint128, new: Uint128) -> Self {
        if new > old {
            PowerDelta::Increase(new - old)
        } else if old > new {
            PowerDelta::Decrease(old - new)
        } else {
            PowerDelta::Zero
        }
    }

    /// The delta between the effective amounts of two stake states.
    pub fn effective(old: &StakeInfo, new: &StakeInfo) -> Self {
        Self::between(old.effective_amount(), new.effective_amount())
    }

    pub fn negate(self) -> Self {
        match self {
            PowerDelta::Zero => PowerDelta::Zero,
            PowerDelta::Increase(a) => PowerDelta::Decrease(a),
            PowerDelta::Decrease(a) => PowerDelta::Increase(a),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            PowerDelta::Zero => true,
            PowerDelta::Increase(a) | PowerDelta::Decrease(a) => a.is_zero(),
        }
    }

    /// Applies the delta to `amount`. Removing more than `amount`
    /// holds is an overflow error.
    pub fn apply(self, amount: Uint128) -> StdResult<Uint128> {
        match self {
            PowerDelta::Zero => Ok(amount),
            PowerDelta::Increase(a) => amount.checked_add(a).map_err(StdError::overflow),
            PowerDelta::Decrease(a) => amount.checked_sub(a).map_err(StdError::overflow),
        }
    }
}

impl From<Uint128> for PowerDelta {
    fn from(amount: Uint128) -> Self {
        Self::between(Uint128::zero(), amount)
    }
}
