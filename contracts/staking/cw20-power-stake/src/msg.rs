use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw2::ContractVersion;
use cw20::Cw20ReceiveMsg;

// make these types directly available to consumers of this crate
pub use cw_power_checkpoints::{Point, StakeInfo};

#[cw_serde]
pub enum PositionNft {
    Existing {
        /// Address of an already instantiated `cw721-stake-positions`
        /// contract whose minter is this contract.
        address: String,
    },
    New {
        /// Code ID of a `cw721-stake-positions` contract.
        code_id: u64,
        /// Label to use for the instantiated contract.
        label: String,
        name: String,
        symbol: String,
    },
}

#[cw_serde]
pub struct InstantiateMsg {
    /// The cw20 token that may be staked.
    pub token_address: String,
    /// The contract issuing position certificates.
    pub position_nft: PositionNft,
    /// Seconds between initiating and completing an unstake. Defaults
    /// to 30 days.
    pub withdrawal_period: Option<u64>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Stake tokens sent with a cw20 `Send`. The `msg` field must be a
    /// `ReceiveMsg`.
    Receive(Cw20ReceiveMsg),
    /// Opens a new position, pulling `amount` tokens from the sender's
    /// allowance to this contract.
    Stake { amount: Uint128 },
    /// Adds to the sender's active position, pulling `amount` tokens
    /// from the sender's allowance.
    AddToStake { amount: Uint128 },
    /// Adds to `account`'s active position, pulling `amount` tokens
    /// from the sender's allowance.
    AddToStakeFor { account: String, amount: Uint128 },
    /// Starts the withdrawal period of the sender's position. The
    /// position stops contributing power immediately.
    InitiateUnstake {},
    /// Closes the sender's position once the withdrawal period has
    /// elapsed, returning the principal.
    CompleteUnstake {},
    /// Attributes the sender's voting power to `delegatee`. Delegate
    /// to yourself to undo.
    Delegate { delegatee: String },
    /// Attributes the sender's reward power to `delegatee`. Delegate
    /// to yourself to undo.
    DelegateRewards { delegatee: String },
}

#[cw_serde]
pub enum ReceiveMsg {
    Stake {},
    AddToStake {},
    AddToStakeFor { account: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},
    #[returns(InfoResponse)]
    Info {},
    #[returns(Uint128)]
    Votes { address: String },
    #[returns(Uint128)]
    PastVotes {
        address: String,
        timepoint: Timestamp,
    },
    #[returns(Uint128)]
    StakingRewards { address: String },
    #[returns(Uint128)]
    PastRewards {
        address: String,
        timepoint: Timestamp,
    },
    #[returns(Uint128)]
    TotalVotes {},
    #[returns(Uint128)]
    PastTotalSupply { timepoint: Timestamp },
    #[returns(Uint128)]
    TotalRewards {},
    #[returns(Uint128)]
    PastTotalRewards { timepoint: Timestamp },
    #[returns(Addr)]
    VoteDelegate { address: String },
    #[returns(Addr)]
    RewardDelegate { address: String },
    /// The ID of the position (and certificate) held by `address`.
    #[returns(Option<u64>)]
    ActivePosition { address: String },
    #[returns(StakedAmountResponse)]
    StakedAmountAndWithdrawalTime { address: String },
    #[returns(CanCompleteUnstakeResponse)]
    CanCompleteUnstake { address: String },
    #[returns(u64)]
    UserEpoch { address: String },
    #[returns(u64)]
    GlobalEpoch {},
    #[returns(Point)]
    UserPoint { address: String, epoch: u64 },
    #[returns(Point)]
    GlobalPoint { epoch: u64 },
}

#[cw_serde]
pub struct InfoResponse {
    pub info: ContractVersion,
}

#[cw_serde]
pub struct StakedAmountResponse {
    /// Raw staked amount. Non-zero while withdrawing.
    pub amount: Uint128,
    /// Zero unless a withdrawal has been requested.
    pub withdrawal_requested_at: u64,
}

#[cw_serde]
pub struct CanCompleteUnstakeResponse {
    pub can_complete: bool,
    /// When the position may be completed, if a withdrawal is pending.
    pub available_at: Option<u64>,
}
