mod execute;
mod queries;

use cosmwasm_std::{Addr, Empty, Uint128};
use cw20::Cw20Coin;
use cw_multi_test::{App, Contract, ContractWrapper, Executor};

use crate::msg::{InstantiateMsg, PositionNft};

use self::queries::query_config;

/// Address used as the instantiator of every contract.
pub(crate) const CREATOR_ADDR: &str = "creator";
pub(crate) const ALICE: &str = "alice";
pub(crate) const BOB: &str = "bob";
pub(crate) const CAROL: &str = "carol";

/// Starting cw20 balance of alice, bob and carol.
pub(crate) const INITIAL_BALANCE: u128 = 1_000;

pub(crate) fn power_stake_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crate::contract::execute,
        crate::contract::instantiate,
        crate::contract::query,
    )
    .with_reply(crate::contract::reply);
    Box::new(contract)
}

pub(crate) fn cw20_base_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

pub(crate) fn position_nft_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw721_stake_positions::contract::execute,
        cw721_stake_positions::contract::instantiate,
        cw721_stake_positions::contract::query,
    );
    Box::new(contract)
}

/// A cw721-base collection that only lets holders burn their tokens.
pub(crate) fn plain_cw721_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw721_base::entry::execute,
        cw721_base::entry::instantiate,
        cw721_base::entry::query,
    );
    Box::new(contract)
}

pub(crate) struct CommonTest {
    app: App,
    module: Addr,
    token: Addr,
    nft: Addr,
}

pub(crate) fn instantiate_cw20(app: &mut App, symbol: &str) -> Addr {
    let cw20_id = app.store_code(cw20_base_contract());
    app.instantiate_contract(
        cw20_id,
        Addr::unchecked(CREATOR_ADDR),
        &cw20_base::msg::InstantiateMsg {
            name: "staking token".to_string(),
            symbol: symbol.to_string(),
            decimals: 6,
            initial_balances: [ALICE, BOB, CAROL]
                .into_iter()
                .map(|address| Cw20Coin {
                    address: address.to_string(),
                    amount: Uint128::new(INITIAL_BALANCE),
                })
                .collect(),
            mint: None,
            marketing: None,
        },
        &[],
        "cw20",
        None,
    )
    .unwrap()
}

pub(crate) fn setup_test(withdrawal_period: Option<u64>) -> CommonTest {
    let mut app = App::default();
    let token = instantiate_cw20(&mut app, "STAKE");
    let module_id = app.store_code(power_stake_contract());
    let nft_id = app.store_code(position_nft_contract());

    let module = app
        .instantiate_contract(
            module_id,
            Addr::unchecked(CREATOR_ADDR),
            &InstantiateMsg {
                token_address: token.to_string(),
                position_nft: PositionNft::New {
                    code_id: nft_id,
                    label: "stake positions".to_string(),
                    name: "Stake Positions".to_string(),
                    symbol: "POS".to_string(),
                },
                withdrawal_period,
            },
            &[],
            "power_stake",
            None,
        )
        .unwrap();
    let nft = query_config(&app, &module).position_nft;

    // Keep later writes out of the genesis instant.
    app.update_block(|block| block.time = block.time.plus_seconds(10));

    CommonTest {
        app,
        module,
        token,
        nft,
    }
}

// Advantage to using a macro for this is that the error trace links
// to the exact line that the error occured, instead of inside of a
// function where the assertion would otherwise happen.
macro_rules! is_error {
    ($x:expr => $e:tt) => {
        assert!(format!("{:#}", $x.unwrap_err()).contains($e))
    };
}

pub(crate) use is_error;
