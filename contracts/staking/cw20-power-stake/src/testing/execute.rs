use anyhow::Result as AnyResult;
use cosmwasm_std::{to_json_binary, Addr, Uint128};
use cw20::Cw20ExecuteMsg;
use cw_multi_test::{App, AppResponse, Executor};

use crate::msg::{ExecuteMsg, ReceiveMsg};

// Shorthand for an unchecked address.
macro_rules! addr {
    ($x:expr ) => {
        Addr::unchecked($x)
    };
}

pub fn advance_time(app: &mut App, seconds: u64) {
    app.update_block(|block| block.time = block.time.plus_seconds(seconds));
}

pub fn increase_allowance(
    app: &mut App,
    token: &Addr,
    owner: &str,
    spender: &Addr,
    amount: u128,
) -> AnyResult<AppResponse> {
    app.execute_contract(
        addr!(owner),
        token.clone(),
        &Cw20ExecuteMsg::IncreaseAllowance {
            spender: spender.to_string(),
            amount: Uint128::new(amount),
            expires: None,
        },
        &[],
    )
}

pub fn execute_module(
    app: &mut App,
    module: &Addr,
    sender: &str,
    msg: ExecuteMsg,
) -> AnyResult<AppResponse> {
    app.execute_contract(addr!(sender), module.clone(), &msg, &[])
}

/// Approves the module and opens a position.
pub fn stake(
    app: &mut App,
    token: &Addr,
    module: &Addr,
    sender: &str,
    amount: u128,
) -> AnyResult<AppResponse> {
    increase_allowance(app, token, sender, module, amount)?;
    execute_module(
        app,
        module,
        sender,
        ExecuteMsg::Stake {
            amount: Uint128::new(amount),
        },
    )
}

/// Approves the module and adds to the sender's position.
pub fn add_to_stake(
    app: &mut App,
    token: &Addr,
    module: &Addr,
    sender: &str,
    amount: u128,
) -> AnyResult<AppResponse> {
    increase_allowance(app, token, sender, module, amount)?;
    execute_module(
        app,
        module,
        sender,
        ExecuteMsg::AddToStake {
            amount: Uint128::new(amount),
        },
    )
}

/// Approves the module and adds to `account`'s position on the
/// sender's dime.
pub fn add_to_stake_for(
    app: &mut App,
    token: &Addr,
    module: &Addr,
    sender: &str,
    account: &str,
    amount: u128,
) -> AnyResult<AppResponse> {
    increase_allowance(app, token, sender, module, amount)?;
    execute_module(
        app,
        module,
        sender,
        ExecuteMsg::AddToStakeFor {
            account: account.to_string(),
            amount: Uint128::new(amount),
        },
    )
}

/// Funds the module with a cw20 `Send` carrying `msg`.
pub fn send_tokens(
    app: &mut App,
    token: &Addr,
    module: &Addr,
    sender: &str,
    amount: u128,
    msg: ReceiveMsg,
) -> AnyResult<AppResponse> {
    app.execute_contract(
        addr!(sender),
        token.clone(),
        &Cw20ExecuteMsg::Send {
            contract: module.to_string(),
            amount: Uint128::new(amount),
            msg: to_json_binary(&msg)?,
        },
        &[],
    )
}

pub fn initiate_unstake(app: &mut App, module: &Addr, sender: &str) -> AnyResult<AppResponse> {
    execute_module(app, module, sender, ExecuteMsg::InitiateUnstake {})
}

pub fn complete_unstake(app: &mut App, module: &Addr, sender: &str) -> AnyResult<AppResponse> {
    execute_module(app, module, sender, ExecuteMsg::CompleteUnstake {})
}

pub fn delegate(
    app: &mut App,
    module: &Addr,
    sender: &str,
    delegatee: &str,
) -> AnyResult<AppResponse> {
    execute_module(
        app,
        module,
        sender,
        ExecuteMsg::Delegate {
            delegatee: delegatee.to_string(),
        },
    )
}

pub fn delegate_rewards(
    app: &mut App,
    module: &Addr,
    sender: &str,
    delegatee: &str,
) -> AnyResult<AppResponse> {
    execute_module(
        app,
        module,
        sender,
        ExecuteMsg::DelegateRewards {
            delegatee: delegatee.to_string(),
        },
    )
}
