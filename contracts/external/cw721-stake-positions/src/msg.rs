use cosmwasm_std::Empty;

pub use cw721_base::InstantiateMsg;

/// Positions carry no metadata extension.
pub type ExecuteMsg = cw721_base::ExecuteMsg<Empty, Empty>;
pub type QueryMsg = cw721_base::QueryMsg<Empty>;
