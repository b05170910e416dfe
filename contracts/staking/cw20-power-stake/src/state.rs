use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage};
use cw_power_checkpoints::{PowerCheckpoints, StakeInfo};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// The cw20 token that is staked.
    pub token_address: Addr,
    /// The cw721 contract issuing position certificates. This contract
    /// is its minter.
    pub position_nft: Addr,
    /// Seconds between requesting a withdrawal and being able to
    /// complete it.
    pub withdrawal_period: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Voting and reward power history, per account and in total.
pub const CHECKPOINTS: PowerCheckpoints = PowerCheckpoints::new(
    "user_points",
    "user_epochs",
    "global_points",
    "global_epoch",
);

/// Stake of every position that has not been completed, by position ID.
pub const STAKES: Map<u64, StakeInfo> = Map::new("stakes");

/// The position currently held by an account.
pub const ACTIVE_POSITIONS: Map<&Addr, u64> = Map::new("active_positions");

/// The ID the next position will receive. Starts at 1.
pub const NEXT_POSITION_ID: Item<u64> = Item::new("next_position_id");

/// Accounts whose voting power is attributed to someone else. Absent
/// means self.
pub const VOTE_DELEGATES: Map<&Addr, Addr> = Map::new("vote_delegates");

/// Accounts whose reward power is attributed to someone else. Absent
/// means self.
pub const REWARD_DELEGATES: Map<&Addr, Addr> = Map::new("reward_delegates");

/// Loads the position held by `account` and its stake, if any.
pub fn load_position(
    storage: &dyn Storage,
    account: &Addr,
) -> StdResult<Option<(u64, StakeInfo)>> {
    ACTIVE_POSITIONS
        .may_load(storage, account)?
        .map(|id| -> StdResult<_> { Ok((id, STAKES.load(storage, id)?)) })
        .transpose()
}

/// Reserves a new position ID.
pub fn next_position_id(storage: &mut dyn Storage) -> StdResult<u64> {
    let id = NEXT_POSITION_ID.may_load(storage)?.unwrap_or(1);
    NEXT_POSITION_ID.save(storage, &(id + 1))?;
    Ok(id)
}
