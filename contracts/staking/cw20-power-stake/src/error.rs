use cosmwasm_std::{Addr, DivideByZeroError, OverflowError, StdError};
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    Overflow(#[from] OverflowError),

    #[error(transparent)]
    DivideByZero(#[from] DivideByZeroError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("Amount must be greater than zero")]
    ZeroAmount {},

    #[error("User already has an active position")]
    UserAlreadyHasActivePosition {},

    #[error("No active position")]
    NoActivePosition {},

    #[error("Can not add to a position that is being withdrawn")]
    CannotAddToWithdrawingPosition {},

    #[error("Withdrawal already initiated")]
    WithdrawalAlreadyInitiated {},

    #[error("Withdrawal not initiated")]
    WithdrawalNotInitiated {},

    #[error("A withdrawal can not be requested at time zero")]
    ZeroWithdrawalTime {},

    #[error("Withdrawal period not complete. Available at {available_at}")]
    WithdrawalPeriodNotComplete { available_at: u64 },

    #[error("Lookup at timepoint {timepoint} is not strictly before the current time {now}")]
    FutureOrPresentTimepointLookup { timepoint: u64, now: u64 },

    #[error("Invalid token. Got ({received}), expected ({expected})")]
    InvalidToken { received: Addr, expected: Addr },

    #[error("Withdrawal period must be greater than zero")]
    InvalidWithdrawalPeriod {},

    #[error("Position certificates must be issued by a {expected} contract. Got ({received})")]
    InvalidPositionNft { received: String, expected: String },

    #[error("Error instantiating position NFT contract")]
    NftInstantiateError {},

    #[error("Got a submessage reply with unknown id: {id}")]
    UnknownReplyId { id: u64 },
}
