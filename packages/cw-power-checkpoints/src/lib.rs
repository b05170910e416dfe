#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

use cosmwasm_std::{Addr, StdResult, Storage};
use cw_storage_plus::{Item, Map};

mod point;

pub use point::{Point, PowerDelta, StakeInfo};


/// Per-account and global histories of voting and reward power.
///
/// Epoch `n` of an account is its `n`-th distinct-instant change;
/// epoch 0 is never written for an account and reads as an all-zero
/// point. The global history holds a genesis point at epoch 0 written
/// by [`PowerCheckpoints::initialize`].
pub struct PowerCheckpoints<'a> {
    user_points: Map<'a, (Addr, u64), Point>,
    user_epochs: Map<'a, Addr, u64>,
    global_points: Map<'a, u64, Point>,
    global_epoch: Item<'a, u64>,
}

impl<'a> PowerCheckpoints<'a> {
    pub const fn new(
        user_points_key: &'a str,
        user_epochs_key: &'a str,
        global_points_key: &'a str,
        global_epoch_key: &'a str,
    ) -> Self {
        Self {
            user_points: Map::new(user_points_key),
            user_epochs: Map::new(user_epochs_key),
            global_points: Map::new(global_points_key),
            global_epoch: Item::new(global_epoch_key),
        }
    }

    /// Writes the all-zero genesis point of the global history.
    pub fn initialize(&self, store: &mut dyn Storage, now: u64) -> StdResult<()> {
        self.global_points.save(
            store,
            0,
            &Point {
                updated_at: now,
                ..Point::default()
            },
        )?;
        self.global_epoch.save(store, &0)
    }

    pub fn user_epoch(&self, store: &dyn Storage, account: &Addr) -> StdResult<u64> {
        Ok(self
            .user_epochs
            .may_load(store, account.clone())?
            .unwrap_or_default())
    }

    pub fn global_epoch(&self, store: &dyn Storage) -> StdResult<u64> {
        Ok(self.global_epoch.may_load(store)?.unwrap_or_default())
    }

    pub fn user_point(&self, store: &dyn Storage, account: &Addr, epoch: u64) -> StdResult<Point> {
        Ok(self
            .user_points
            .may_load(store, (account.clone(), epoch))?
            .unwrap_or_default())
    }

    pub fn global_point(&self, store: &dyn Storage, epoch: u64) -> StdResult<Point> {
        Ok(self
            .global_points
            .may_load(store, epoch)?
            .unwrap_or_default())
    }

    pub fn latest_user_point(&self, store: &dyn Storage, account: &Addr) -> StdResult<Point> {
        let epoch = self.user_epoch(store, account)?;
        self.user_point(store, account, epoch)
    }

    pub fn latest_global_point(&self, store: &dyn Storage) -> StdResult<Point> {
        let epoch = self.global_epoch(store)?;
        self.global_point(store, epoch)
    }

    /// The greatest epoch of `account` whose point was written at or
    /// before `t`, or 0 if there is none.
    pub fn find_user_timestamp_epoch(
        &self,
        store: &dyn Storage,
        account: &Addr,
        t: u64,
    ) -> StdResult<u64> {
        let max_epoch = self.user_epoch(store, account)?;
        search_epoch(max_epoch, t, |epoch| self.user_point(store, account, epoch))
    }

    /// The greatest global epoch whose point was written at or before
    /// `t`, or 0 if there is none.
    pub fn find_timestamp_epoch(&self, store: &dyn Storage, t: u64) -> StdResult<u64> {
        let max_epoch = self.global_epoch(store)?;
        search_epoch(max_epoch, t, |epoch| self.global_point(store, epoch))
    }

    /// The point in effect for `account` at time `t`.
    pub fn user_point_at(&self, store: &dyn Storage, account: &Addr, t: u64) -> StdResult<Point> {
        let epoch = self.find_user_timestamp_epoch(store, account, t)?;
        let point = self.user_point(store, account, epoch)?;
        // epoch 0 is also returned when t precedes the first write.
        if point.updated_at > t {
            return Ok(Point::default());
        }
        Ok(point)
    }

    /// The global point in effect at time `t`.
    pub fn global_point_at(&self, store: &dyn Storage, t: u64) -> StdResult<Point> {
        let epoch = self.find_timestamp_epoch(store, t)?;
        let point = self.global_point(store, epoch)?;
        if point.updated_at > t {
            return Ok(Point::default());
        }
        Ok(point)
    }

    /// Applies `voting` and `reward` to the latest point of `account`
    /// and records the result at `now`, merging with the latest point
    /// if it was also written at `now`.
    pub fn checkpoint_delta(
        &self,
        store: &mut dyn Storage,
        account: &Addr,
        voting: PowerDelta,
        reward: PowerDelta,
        now: u64,
    ) -> StdResult<Point> {
        let epoch = self.user_epoch(store, account)?;
        let last = self.user_point(store, account, epoch)?;
        let point = Point {
            voting_amount: voting.apply(last.voting_amount)?,
            reward_amount: reward.apply(last.reward_amount)?,
            updated_at: now,
        };

        // epoch 0 is never written, so the first change always lands
        // at epoch 1 even if it happens at time 0.
        let epoch = if epoch != 0 && last.updated_at == now {
            epoch
        } else {
            epoch + 1
        };
        self.user_points
            .save(store, (account.clone(), epoch), &point)?;
        self.user_epochs.save(store, account.clone(), &epoch)?;

        Ok(point)
    }

    /// Changes only the voting amount of `account`, used when delegated
    /// voting power arrives or leaves.
    pub fn checkpoint_vote_delegation(
        &self,
        store: &mut dyn Storage,
        account: &Addr,
        delta: PowerDelta,
        now: u64,
    ) -> StdResult<Point> {
        self.checkpoint_delta(store, account, delta, PowerDelta::Zero, now)
    }

    /// Changes only the reward amount of `account`, used when delegated
    /// reward power arrives or leaves.
    pub fn checkpoint_reward_delegation(
        &self,
        store: &mut dyn Storage,
        account: &Addr,
        delta: PowerDelta,
        now: u64,
    ) -> StdResult<Point> {
        self.checkpoint_delta(store, account, PowerDelta::Zero, delta, now)
    }

    /// Records the change from `old` to `new` for the owner of a
    /// position. Power kinds that are not delegated are applied to the
    /// owner's history. The deltas of delegated kinds are returned as
    /// `(voting, reward)` so the caller can apply them to the
    /// delegatee.
    #[allow(clippy::too_many_arguments)]
    pub fn checkpoint_with_delegation(
        &self,
        store: &mut dyn Storage,
        account: &Addr,
        old: &StakeInfo,
        new: &StakeInfo,
        vote_is_delegated: bool,
        reward_is_delegated: bool,
        now: u64,
    ) -> StdResult<(PowerDelta, PowerDelta)> {
        let delta = PowerDelta::effective(old, new);

        let (local_voting, forward_voting) = if vote_is_delegated {
            (PowerDelta::Zero, delta)
        } else {
            (delta, PowerDelta::Zero)
        };
        let (local_reward, forward_reward) = if reward_is_delegated {
            (PowerDelta::Zero, delta)
        } else {
            (delta, PowerDelta::Zero)
        };

        if !local_voting.is_zero() || !local_reward.is_zero() {
            self.checkpoint_delta(store, account, local_voting, local_reward, now)?;
        }

        Ok((forward_voting, forward_reward))
    }

    /// Applies the change in effective amount between `old` and `new`
    /// to the global history. Nothing is written when the effective
    /// amount is unchanged.
    pub fn update_global_checkpoint(
        &self,
        store: &mut dyn Storage,
        old: &StakeInfo,
        new: &StakeInfo,
        now: u64,
    ) -> StdResult<()> {
        let delta = PowerDelta::effective(old, new);
        if delta.is_zero() {
            return Ok(());
        }
        self.checkpoint_global(store, delta, delta, now).map(|_| ())
    }

    fn checkpoint_global(
        &self,
        store: &mut dyn Storage,
        voting: PowerDelta,
        reward: PowerDelta,
        now: u64,
    ) -> StdResult<Point> {
        let epoch = self.global_epoch(store)?;
        let last = self.global_point(store, epoch)?;
        let point = Point {
            voting_amount: voting.apply(last.voting_amount)?,
            reward_amount: reward.apply(last.reward_amount)?,
            updated_at: now,
        };

        let epoch = if last.updated_at == now {
            epoch
        } else {
            epoch + 1
        };
        self.global_points.save(store, epoch, &point)?;
        self.global_epoch.save(store, &epoch)?;

        Ok(point)
    }
}

/// Binary search over `[0, max_epoch]` for the greatest epoch whose
/// point was written at or before `t`. Points must be ordered by
/// `updated_at`.
fn search_epoch(
    max_epoch: u64,
    t: u64,
    load: impl Fn(u64) -> StdResult<Point>,
) -> StdResult<u64> {
    let mut min = 0;
    let mut max = max_epoch;
    while min < max {
        let mid = (min + max + 1) / 2;
        if load(mid)?.updated_at <= t {
            min = mid;
        } else {
            max = mid - 1;
        }
    }
    Ok(min)
}
