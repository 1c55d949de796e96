pub mod opcode;
pub mod transaction;

pub use transaction::{
    Address, Contract, ContractKind, Header, Method, Param, ParamKind, ParamType, Transaction,
    ADDRESS_LEN, PUBKEY_LEN,
};
