#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdResult};
use cw721_base::Cw721Contract;

use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::ContractError;

pub const CONTRACT_NAME: &str = "crates.io:cw721-stake-positions";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub type PositionNftContract<'a> = Cw721Contract<'a, Empty, Empty, Empty, Empty>;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    PositionNftContract::default().instantiate(deps.branch(), env, info, msg)?;

    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::default()
        .add_attribute("contract_name", CONTRACT_NAME)
        .add_attribute("contract_version", CONTRACT_VERSION))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Burn { token_id } => execute_burn(deps, info, token_id),
        ExecuteMsg::TransferNft { .. }
        | ExecuteMsg::SendNft { .. }
        | ExecuteMsg::Approve { .. }
        | ExecuteMsg::ApproveAll { .. } => Err(ContractError::NonTransferable {}),
        // minting is restricted to the minter by the base contract.
        _ => PositionNftContract::default()
            .execute(deps, env, info, msg)
            .map_err(Into::into),
    }
}

pub fn execute_burn(
    deps: DepsMut,
    info: MessageInfo,
    token_id: String,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    let contract = PositionNftContract::default();
    let token = contract.tokens.load(deps.storage, &token_id)?;
    contract.tokens.remove(deps.storage, &token_id)?;
    contract.decrement_tokens(deps.storage)?;

    Ok(Response::new()
        .add_attribute("action", "burn")
        .add_attribute("sender", info.sender)
        .add_attribute("owner", token.owner)
        .add_attribute("token_id", token_id))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    PositionNftContract::default().query(deps, env, msg)
}
