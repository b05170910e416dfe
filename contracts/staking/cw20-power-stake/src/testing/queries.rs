use cosmwasm_std::{Addr, Empty, StdResult, Timestamp, Uint128};
use cw20::{BalanceResponse, Cw20QueryMsg};
use cw721::{NumTokensResponse, OwnerOfResponse};
use cw_multi_test::App;

use crate::msg::{CanCompleteUnstakeResponse, Point, QueryMsg, StakedAmountResponse};
use crate::state::Config;

pub fn query_config(app: &App, module: &Addr) -> Config {
    app.wrap()
        .query_wasm_smart(module, &QueryMsg::Config {})
        .unwrap()
}

pub fn query_votes(app: &App, module: &Addr, address: &str) -> Uint128 {
    app.wrap()
        .query_wasm_smart(
            module,
            &QueryMsg::Votes {
                address: address.to_string(),
            },
        )
        .unwrap()
}

pub fn query_rewards(app: &App, module: &Addr, address: &str) -> Uint128 {
    app.wrap()
        .query_wasm_smart(
            module,
            &QueryMsg::StakingRewards {
                address: address.to_string(),
            },
        )
        .unwrap()
}

pub fn query_past_votes(
    app: &App,
    module: &Addr,
    address: &str,
    timepoint: Timestamp,
) -> StdResult<Uint128> {
    app.wrap().query_wasm_smart(
        module,
        &QueryMsg::PastVotes {
            address: address.to_string(),
            timepoint,
        },
    )
}

pub fn query_past_rewards(
    app: &App,
    module: &Addr,
    address: &str,
    timepoint: Timestamp,
) -> StdResult<Uint128> {
    app.wrap().query_wasm_smart(
        module,
        &QueryMsg::PastRewards {
            address: address.to_string(),
            timepoint,
        },
    )
}

pub fn query_total_votes(app: &App, module: &Addr) -> Uint128 {
    app.wrap()
        .query_wasm_smart(module, &QueryMsg::TotalVotes {})
        .unwrap()
}

pub fn query_total_rewards(app: &App, module: &Addr) -> Uint128 {
    app.wrap()
        .query_wasm_smart(module, &QueryMsg::TotalRewards {})
        .unwrap()
}

pub fn query_past_total_supply(
    app: &App,
    module: &Addr,
    timepoint: Timestamp,
) -> StdResult<Uint128> {
    app.wrap()
        .query_wasm_smart(module, &QueryMsg::PastTotalSupply { timepoint })
}

pub fn query_past_total_rewards(
    app: &App,
    module: &Addr,
    timepoint: Timestamp,
) -> StdResult<Uint128> {
    app.wrap()
        .query_wasm_smart(module, &QueryMsg::PastTotalRewards { timepoint })
}

pub fn query_vote_delegate(app: &App, module: &Addr, address: &str) -> Addr {
    app.wrap()
        .query_wasm_smart(
            module,
            &QueryMsg::VoteDelegate {
                address: address.to_string(),
            },
        )
        .unwrap()
}

pub fn query_reward_delegate(app: &App, module: &Addr, address: &str) -> Addr {
    app.wrap()
        .query_wasm_smart(
            module,
            &QueryMsg::RewardDelegate {
                address: address.to_string(),
            },
        )
        .unwrap()
}

pub fn query_active_position(app: &App, module: &Addr, address: &str) -> Option<u64> {
    app.wrap()
        .query_wasm_smart(
            module,
            &QueryMsg::ActivePosition {
                address: address.to_string(),
            },
        )
        .unwrap()
}

pub fn query_staked_amount(app: &App, module: &Addr, address: &str) -> StakedAmountResponse {
    app.wrap()
        .query_wasm_smart(
            module,
            &QueryMsg::StakedAmountAndWithdrawalTime {
                address: address.to_string(),
            },
        )
        .unwrap()
}

pub fn query_can_complete_unstake(
    app: &App,
    module: &Addr,
    address: &str,
) -> CanCompleteUnstakeResponse {
    app.wrap()
        .query_wasm_smart(
            module,
            &QueryMsg::CanCompleteUnstake {
                address: address.to_string(),
            },
        )
        .unwrap()
}

pub fn query_user_epoch(app: &App, module: &Addr, address: &str) -> u64 {
    app.wrap()
        .query_wasm_smart(
            module,
            &QueryMsg::UserEpoch {
                address: address.to_string(),
            },
        )
        .unwrap()
}

pub fn query_global_epoch(app: &App, module: &Addr) -> u64 {
    app.wrap()
        .query_wasm_smart(module, &QueryMsg::GlobalEpoch {})
        .unwrap()
}

pub fn query_user_point(app: &App, module: &Addr, address: &str, epoch: u64) -> Point {
    app.wrap()
        .query_wasm_smart(
            module,
            &QueryMsg::UserPoint {
                address: address.to_string(),
                epoch,
            },
        )
        .unwrap()
}

pub fn query_global_point(app: &App, module: &Addr, epoch: u64) -> Point {
    app.wrap()
        .query_wasm_smart(module, &QueryMsg::GlobalPoint { epoch })
        .unwrap()
}

pub fn query_balance(app: &App, token: &Addr, address: &str) -> Uint128 {
    let res: BalanceResponse = app
        .wrap()
        .query_wasm_smart(
            token,
            &Cw20QueryMsg::Balance {
                address: address.to_string(),
            },
        )
        .unwrap();
    res.balance
}

pub fn query_nft_owner(app: &App, nft: &Addr, token_id: &str) -> StdResult<String> {
    let res: OwnerOfResponse = app.wrap().query_wasm_smart(
        nft,
        &cw721_base::QueryMsg::<Empty>::OwnerOf {
            token_id: token_id.to_string(),
            include_expired: None,
        },
    )?;
    Ok(res.owner)
}

pub fn query_num_tokens(app: &App, nft: &Addr) -> u64 {
    let res: NumTokensResponse = app
        .wrap()
        .query_wasm_smart(nft, &cw721_base::QueryMsg::<Empty>::NumTokens {})
        .unwrap();
    res.count
}
