#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

pub mod contract;
mod error;
pub mod msg;


pub use crate::error::ContractError;

// So consumers don't need dependencies to interact with this contract.
pub use cw721_base::MinterResponse;
pub use cw_ownable::{Action, Ownership};
