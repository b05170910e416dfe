#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo,
    QuerierWrapper, Reply, Response, StdResult, SubMsg, Uint128, WasmMsg,
};
use cw2::{get_contract_version, set_contract_version, ContractVersion};
use cw20::{Cw20ExecuteMsg, Cw20ReceiveMsg};
use cw_power_checkpoints::StakeInfo;
use cw_utils::{nonpayable, parse_reply_instantiate_data};

use crate::delegation::{
    change_delegate, checkpoint_stake_change, reward_delegate, vote_delegate, PowerKind,
};
use crate::msg::{
    CanCompleteUnstakeResponse, ExecuteMsg, InfoResponse, InstantiateMsg, PositionNft, QueryMsg,
    ReceiveMsg, StakedAmountResponse,
};
use crate::stake::{self, DEFAULT_WITHDRAWAL_PERIOD};
use crate::state::{
    load_position, next_position_id, Config, ACTIVE_POSITIONS, CHECKPOINTS, CONFIG, STAKES,
};
use crate::{power, ContractError};

pub(crate) const CONTRACT_NAME: &str = "crates.io:cw20-power-stake";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const INSTANTIATE_POSITION_NFT_REPLY_ID: u64 = 0;

/// cw2 name of the certificate contract. Its minter may burn any
/// certificate, which completing an unstake relies on.
pub const POSITION_NFT_CONTRACT_NAME: &str = "crates.io:cw721-stake-positions";

/// How the tokens backing a deposit reach this contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Funding {
    /// Already transferred by a cw20 `Send`.
    Received,
    /// Pulled from the payer's allowance after bookkeeping.
    Allowance,
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let token_address = deps.api.addr_validate(&msg.token_address)?;
    let withdrawal_period = msg.withdrawal_period.unwrap_or(DEFAULT_WITHDRAWAL_PERIOD);
    if withdrawal_period == 0 {
        return Err(ContractError::InvalidWithdrawalPeriod {});
    }

    CHECKPOINTS.initialize(deps.storage, env.block.time.seconds())?;

    match msg.position_nft {
        PositionNft::Existing { address } => {
            let position_nft = deps.api.addr_validate(&address)?;
            assert_position_nft(&deps.querier, &position_nft)?;

            let config = Config {
                token_address: token_address.clone(),
                position_nft,
                withdrawal_period,
            };
            CONFIG.save(deps.storage, &config)?;

            Ok(Response::default()
                .add_attribute("method", "instantiate")
                .add_attribute("token_address", token_address)
                .add_attribute("position_nft", address)
                .add_attribute("withdrawal_period", withdrawal_period.to_string()))
        }
        PositionNft::New {
            code_id,
            label,
            name,
            symbol,
        } => {
            // Saved with an empty certificate address, filled in by the reply.
            let config = Config {
                token_address: token_address.clone(),
                position_nft: Addr::unchecked(""),
                withdrawal_period,
            };
            CONFIG.save(deps.storage, &config)?;

            let instantiate_msg = SubMsg::reply_on_success(
                WasmMsg::Instantiate {
                    code_id,
                    funds: vec![],
                    admin: Some(info.sender.to_string()),
                    label,
                    msg: to_json_binary(&cw721_base::InstantiateMsg {
                        name,
                        symbol,
                        minter: env.contract.address.to_string(),
                    })?,
                },
                INSTANTIATE_POSITION_NFT_REPLY_ID,
            );

            Ok(Response::default()
                .add_submessage(instantiate_msg)
                .add_attribute("method", "instantiate")
                .add_attribute("token_address", token_address)
                .add_attribute("withdrawal_period", withdrawal_period.to_string()))
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Receive(msg) => execute_receive(deps, env, info, msg),
        ExecuteMsg::Stake { amount } => {
            nonpayable(&info)?;
            execute_stake(deps, env, info.sender, amount, Funding::Allowance)
        }
        ExecuteMsg::AddToStake { amount } => {
            nonpayable(&info)?;
            let account = info.sender.clone();
            execute_add_to_stake(deps, env, info.sender, account, amount, Funding::Allowance)
        }
        ExecuteMsg::AddToStakeFor { account, amount } => {
            nonpayable(&info)?;
            let account = deps.api.addr_validate(&account)?;
            execute_add_to_stake(deps, env, info.sender, account, amount, Funding::Allowance)
        }
        ExecuteMsg::InitiateUnstake {} => execute_initiate_unstake(deps, env, info),
        ExecuteMsg::CompleteUnstake {} => execute_complete_unstake(deps, env, info),
        ExecuteMsg::Delegate { delegatee } => {
            execute_delegate(deps, env, info, delegatee, PowerKind::Votes)
        }
        ExecuteMsg::DelegateRewards { delegatee } => {
            execute_delegate(deps, env, info, delegatee, PowerKind::Rewards)
        }
    }
}

pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    wrapper: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.token_address {
        return Err(ContractError::InvalidToken {
            received: info.sender,
            expected: config.token_address,
        });
    }
    let msg: ReceiveMsg = from_json(&wrapper.msg)?;
    let sender = deps.api.addr_validate(&wrapper.sender)?;
    match msg {
        ReceiveMsg::Stake {} => execute_stake(deps, env, sender, wrapper.amount, Funding::Received),
        ReceiveMsg::AddToStake {} => {
            let account = sender.clone();
            execute_add_to_stake(deps, env, sender, account, wrapper.amount, Funding::Received)
        }
        ReceiveMsg::AddToStakeFor { account } => {
            let account = deps.api.addr_validate(&account)?;
            execute_add_to_stake(deps, env, sender, account, wrapper.amount, Funding::Received)
        }
    }
}

/// Errors unless `address` is a `cw721-stake-positions` contract.
fn assert_position_nft(querier: &QuerierWrapper, address: &Addr) -> Result<(), ContractError> {
    let version = querier
        .query_wasm_raw(address, "contract_info".as_bytes())?
        .map(|raw| from_json::<ContractVersion>(&raw))
        .transpose()?;
    match version {
        Some(version) if version.contract == POSITION_NFT_CONTRACT_NAME => Ok(()),
        Some(version) => Err(ContractError::InvalidPositionNft {
            received: version.contract,
            expected: POSITION_NFT_CONTRACT_NAME.to_string(),
        }),
        None => Err(ContractError::InvalidPositionNft {
            received: address.to_string(),
            expected: POSITION_NFT_CONTRACT_NAME.to_string(),
        }),
    }
}

/// Messages that move `amount` tokens from `payer` into this contract.
/// Empty when the tokens have already arrived.
fn deposit_msgs(
    config: &Config,
    env: &Env,
    funding: Funding,
    payer: &Addr,
    amount: Uint128,
) -> StdResult<Vec<WasmMsg>> {
    match funding {
        Funding::Received => Ok(vec![]),
        Funding::Allowance => Ok(vec![WasmMsg::Execute {
            contract_addr: config.token_address.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                owner: payer.to_string(),
                recipient: env.contract.address.to_string(),
                amount,
            })?,
            funds: vec![],
        }]),
    }
}

pub fn execute_stake(
    deps: DepsMut,
    env: Env,
    staker: Addr,
    amount: Uint128,
    funding: Funding,
) -> Result<Response, ContractError> {
    let now = env.block.time.seconds();
    let existing = load_position(deps.storage, &staker)?;
    let new = stake::create_stake(existing.as_ref().map(|(_, stake)| stake), amount)?;

    let position_id = next_position_id(deps.storage)?;
    STAKES.save(deps.storage, position_id, &new)?;
    ACTIVE_POSITIONS.save(deps.storage, &staker, &position_id)?;
    checkpoint_stake_change(deps.storage, &staker, &StakeInfo::default(), &new, now)?;

    let config = CONFIG.load(deps.storage)?;
    let mint_msg = WasmMsg::Execute {
        contract_addr: config.position_nft.to_string(),
        msg: to_json_binary(&cw721_base::ExecuteMsg::<Empty, Empty>::Mint {
            token_id: position_id.to_string(),
            owner: staker.to_string(),
            token_uri: None,
            extension: Empty {},
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_messages(deposit_msgs(&config, &env, funding, &staker, amount)?)
        .add_message(mint_msg)
        .set_data(to_json_binary(&position_id)?)
        .add_attribute("action", "stake")
        .add_attribute("staker", staker)
        .add_attribute("position_id", position_id.to_string())
        .add_attribute("amount", amount))
}

pub fn execute_add_to_stake(
    deps: DepsMut,
    env: Env,
    payer: Addr,
    account: Addr,
    amount: Uint128,
    funding: Funding,
) -> Result<Response, ContractError> {
    let now = env.block.time.seconds();
    let position = load_position(deps.storage, &account)?;
    let new = stake::add_to_stake(position.as_ref().map(|(_, stake)| stake), amount)?;
    let (position_id, old) = position.ok_or(ContractError::NoActivePosition {})?;

    STAKES.save(deps.storage, position_id, &new)?;
    checkpoint_stake_change(deps.storage, &account, &old, &new, now)?;

    let config = CONFIG.load(deps.storage)?;
    Ok(Response::new()
        .add_messages(deposit_msgs(&config, &env, funding, &payer, amount)?)
        .add_attribute("action", "add_to_stake")
        .add_attribute("payer", payer)
        .add_attribute("staker", account)
        .add_attribute("position_id", position_id.to_string())
        .add_attribute("amount", amount)
        .add_attribute("total", new.amount))
}

pub fn execute_initiate_unstake(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let now = env.block.time.seconds();
    let position = load_position(deps.storage, &info.sender)?;
    let new = stake::initiate_withdrawal(position.as_ref().map(|(_, stake)| stake), now)?;
    let (position_id, old) = position.ok_or(ContractError::NoActivePosition {})?;

    STAKES.save(deps.storage, position_id, &new)?;
    checkpoint_stake_change(deps.storage, &info.sender, &old, &new, now)?;

    let config = CONFIG.load(deps.storage)?;
    Ok(Response::new()
        .add_attribute("action", "initiate_unstake")
        .add_attribute("staker", info.sender)
        .add_attribute("position_id", position_id.to_string())
        .add_attribute("amount", new.amount)
        .add_attribute("withdrawal_requested_at", now.to_string())
        .add_attribute(
            "available_at",
            stake::withdrawal_available_at(&new, config.withdrawal_period).to_string(),
        ))
}

pub fn execute_complete_unstake(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let now = env.block.time.seconds();
    let config = CONFIG.load(deps.storage)?;
    let position = load_position(deps.storage, &info.sender)?;
    let principal = stake::complete_withdrawal(
        position.as_ref().map(|(_, stake)| stake),
        now,
        config.withdrawal_period,
    )?;
    let (position_id, old) = position.ok_or(ContractError::NoActivePosition {})?;

    STAKES.remove(deps.storage, position_id);
    ACTIVE_POSITIONS.remove(deps.storage, &info.sender);
    // A withdrawing position has no effective amount left, so this
    // only keeps the bookkeeping uniform.
    checkpoint_stake_change(deps.storage, &info.sender, &old, &StakeInfo::default(), now)?;

    let burn_msg = WasmMsg::Execute {
        contract_addr: config.position_nft.to_string(),
        msg: to_json_binary(&cw721_base::ExecuteMsg::<Empty, Empty>::Burn {
            token_id: position_id.to_string(),
        })?,
        funds: vec![],
    };
    let transfer_msg = WasmMsg::Execute {
        contract_addr: config.token_address.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: info.sender.to_string(),
            amount: principal,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(burn_msg)
        .add_message(transfer_msg)
        .add_attribute("action", "complete_unstake")
        .add_attribute("staker", info.sender)
        .add_attribute("position_id", position_id.to_string())
        .add_attribute("amount", principal))
}

pub fn execute_delegate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    delegatee: String,
    kind: PowerKind,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let delegatee = deps.api.addr_validate(&delegatee)?;
    let previous = change_delegate(
        deps.storage,
        &info.sender,
        &delegatee,
        kind,
        env.block.time.seconds(),
    )?;

    let action = match kind {
        PowerKind::Votes => "delegate",
        PowerKind::Rewards => "delegate_rewards",
    };
    Ok(Response::new()
        .add_attribute("action", action)
        .add_attribute("delegator", info.sender)
        .add_attribute("from_delegate", previous)
        .add_attribute("to_delegate", delegatee))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        INSTANTIATE_POSITION_NFT_REPLY_ID => {
            let res = parse_reply_instantiate_data(msg)
                .map_err(|_| ContractError::NftInstantiateError {})?;
            let position_nft = deps.api.addr_validate(&res.contract_address)?;
            assert_position_nft(&deps.querier, &position_nft)?;

            let mut config = CONFIG.load(deps.storage)?;
            config.position_nft = position_nft.clone();
            CONFIG.save(deps.storage, &config)?;

            Ok(Response::default().add_attribute("position_nft", position_nft))
        }
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let now = env.block.time.seconds();
    let binary = match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?)?,
        QueryMsg::Info {} => to_json_binary(&InfoResponse {
            info: get_contract_version(deps.storage)?,
        })?,
        QueryMsg::Votes { address } => {
            let address = deps.api.addr_validate(&address)?;
            to_json_binary(&power::get_votes(deps.storage, &address)?)?
        }
        QueryMsg::PastVotes { address, timepoint } => {
            let address = deps.api.addr_validate(&address)?;
            to_json_binary(&power::get_past_votes(
                deps.storage,
                &address,
                timepoint.seconds(),
                now,
            )?)?
        }
        QueryMsg::StakingRewards { address } => {
            let address = deps.api.addr_validate(&address)?;
            to_json_binary(&power::get_rewards(deps.storage, &address)?)?
        }
        QueryMsg::PastRewards { address, timepoint } => {
            let address = deps.api.addr_validate(&address)?;
            to_json_binary(&power::get_past_rewards(
                deps.storage,
                &address,
                timepoint.seconds(),
                now,
            )?)?
        }
        QueryMsg::TotalVotes {} => to_json_binary(&power::get_total_votes(deps.storage)?)?,
        QueryMsg::PastTotalSupply { timepoint } => to_json_binary(
            &power::get_past_total_supply(deps.storage, timepoint.seconds(), now)?,
        )?,
        QueryMsg::TotalRewards {} => to_json_binary(&power::get_total_rewards(deps.storage)?)?,
        QueryMsg::PastTotalRewards { timepoint } => to_json_binary(
            &power::get_past_total_rewards(deps.storage, timepoint.seconds(), now)?,
        )?,
        QueryMsg::VoteDelegate { address } => {
            let address = deps.api.addr_validate(&address)?;
            to_json_binary(&vote_delegate(deps.storage, &address)?)?
        }
        QueryMsg::RewardDelegate { address } => {
            let address = deps.api.addr_validate(&address)?;
            to_json_binary(&reward_delegate(deps.storage, &address)?)?
        }
        QueryMsg::ActivePosition { address } => {
            let address = deps.api.addr_validate(&address)?;
            to_json_binary(&ACTIVE_POSITIONS.may_load(deps.storage, &address)?)?
        }
        QueryMsg::StakedAmountAndWithdrawalTime { address } => {
            to_json_binary(&query_staked_amount(deps, address)?)?
        }
        QueryMsg::CanCompleteUnstake { address } => {
            to_json_binary(&query_can_complete_unstake(deps, address, now)?)?
        }
        QueryMsg::UserEpoch { address } => {
            let address = deps.api.addr_validate(&address)?;
            to_json_binary(&CHECKPOINTS.user_epoch(deps.storage, &address)?)?
        }
        QueryMsg::GlobalEpoch {} => to_json_binary(&CHECKPOINTS.global_epoch(deps.storage)?)?,
        QueryMsg::UserPoint { address, epoch } => {
            let address = deps.api.addr_validate(&address)?;
            to_json_binary(&CHECKPOINTS.user_point(deps.storage, &address, epoch)?)?
        }
        QueryMsg::GlobalPoint { epoch } => {
            to_json_binary(&CHECKPOINTS.global_point(deps.storage, epoch)?)?
        }
    };
    Ok(binary)
}

pub fn query_staked_amount(deps: Deps, address: String) -> StdResult<StakedAmountResponse> {
    let address = deps.api.addr_validate(&address)?;
    let stake = load_position(deps.storage, &address)?
        .map(|(_, stake)| stake)
        .unwrap_or_default();
    Ok(StakedAmountResponse {
        amount: stake.amount,
        withdrawal_requested_at: stake.withdrawal_requested_at,
    })
}

pub fn query_can_complete_unstake(
    deps: Deps,
    address: String,
    now: u64,
) -> StdResult<CanCompleteUnstakeResponse> {
    let address = deps.api.addr_validate(&address)?;
    let config = CONFIG.load(deps.storage)?;
    let response = match load_position(deps.storage, &address)? {
        Some((_, stake)) if stake.is_withdrawing() => CanCompleteUnstakeResponse {
            can_complete: stake::can_complete_withdrawal(&stake, now, config.withdrawal_period),
            available_at: Some(stake::withdrawal_available_at(
                &stake,
                config.withdrawal_period,
            )),
        },
        _ => CanCompleteUnstakeResponse {
            can_complete: false,
            available_at: None,
        },
    };
    Ok(response)
}
