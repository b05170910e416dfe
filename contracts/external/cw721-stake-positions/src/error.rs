use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    Base(#[from] cw721_base::ContractError),

    #[error(transparent)]
    Ownable(#[from] cw_ownable::OwnershipError),

    #[error("Stake position certificates can not be transferred or approved")]
    NonTransferable {},
}
