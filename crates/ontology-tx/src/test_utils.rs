//! Builders for raw transactions used across the test modules.

use crate::types::opcode::{
    APPCALL, END, NATIVE_INVOKE, PACK, PARAM_END, PUSH_NUMBER, ST_BEGIN, ST_END, SYSCALL,
    TX_TYPE_INVOKE,
};
use crate::types::Address;

/// `registerCandidate` on the governance contract, captured from a device.
pub const REGISTER_CANDIDATE: &str = "00d14c90b8e4c409000000000000400d030000000000825995774fc9f599e6f5270176b37495d8579826df00c66b423032623732656231613636636235346335366233383436363534346561383033626366666566346633313161386163666133396237306137663031653766386136356a7cc814825995774fc9f599e6f5270176b37495d85798266a7cc808f82a0000000000006a7cc8296469643a6f6e74415466366f714241744e776373324576636632637174564e33705a7433474e58447a6a7cc8516a7cc86c11726567697374657243616e6469646174651400000000000000000000000000000000000000070068164f6e746f6c6f67792e4e61746976652e496e766f6b6500";
/// `unAuthorizeForPeer` on the governance contract, captured from a device.
pub const UNAUTHORIZE_FOR_PEER: &str = "00d19171c702c409000000000000204e000000000000825995774fc9f599e6f5270176b37495d8579826b700c66b14825995774fc9f599e6f5270176b37495d85798266a7cc8516a7cc8423032626463346334616630373065636364356230633037326265326635303336626662663065356537636561323339383064636562373837643138303161346531316a7cc8516a7cc808f4010000000000006a7cc86c12756e417574686f72697a65466f72506565721400000000000000000000000000000000000000070068164f6e746f6c6f67792e4e61746976652e496e766f6b6500";

pub const PAYER: Address = [
    0x82, 0x59, 0x95, 0x77, 0x4f, 0xc9, 0xf5, 0x99, 0xe6, 0xf5, 0x27, 0x01, 0x76, 0xb3, 0x74,
    0x95, 0xd8, 0x57, 0x98, 0x26,
];

pub const PUBKEY_A: &str = "02b72eb1a66cb54c56b38466544ea803bcffef4f311a8acfa39b70a7f01e7f8a65";
pub const PUBKEY_B: &str = "02bdc4c4af070eccd5b0c072be2f5036bfbf0e5e7cea23980dceb787d1801a4e11";

#[derive(Debug, Clone)]
pub struct HeaderFields {
    pub version: u8,
    pub tx_type: u8,
    pub nonce: u32,
    pub gas_price: u64,
    pub gas_limit: u64,
    pub payer: Address,
}

impl Default for HeaderFields {
    fn default() -> Self {
        Self {
            version: 0,
            tx_type: TX_TYPE_INVOKE,
            nonce: 1,
            gas_price: 2500,
            gas_limit: 20_000,
            payer: [0xaa; 20],
        }
    }
}

pub fn encode_header(out: &mut Vec<u8>, fields: &HeaderFields) {
    out.push(fields.version);
    out.push(fields.tx_type);
    out.extend_from_slice(&fields.nonce.to_le_bytes());
    out.extend_from_slice(&fields.gas_price.to_le_bytes());
    out.extend_from_slice(&fields.gas_limit.to_le_bytes());
    out.extend_from_slice(&fields.payer);
}

pub fn encode_compact_size(out: &mut Vec<u8>, value: u64) {
    match value {
        0..=0xfc => out.push(value as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(value as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(value as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
}

/// Shortest wire encoding of an amount.
pub fn encode_amount(value: u64) -> Vec<u8> {
    match value {
        0 => vec![0x00],
        1..=16 => vec![PUSH_NUMBER + value as u8],
        _ => {
            let bytes = value.to_le_bytes();
            let width = 8 - (value.leading_zeros() as usize / 8);
            let mut out = vec![width as u8];
            out.extend_from_slice(&bytes[..width]);
            out
        }
    }
}

fn push_prefixed(out: &mut Vec<u8>, bytes: &[u8]) {
    out.push(bytes.len() as u8);
    out.extend_from_slice(bytes);
}

pub fn native_trailer(contract: &Address) -> Vec<u8> {
    let mut out = Vec::with_capacity(47);
    push_prefixed(&mut out, contract);
    out.extend_from_slice(SYSCALL);
    out.extend_from_slice(NATIVE_INVOKE);
    out.extend_from_slice(END);
    out
}

pub fn neovm_trailer(contract: &Address) -> Vec<u8> {
    let mut out = Vec::with_capacity(22);
    out.extend_from_slice(APPCALL);
    out.extend_from_slice(contract);
    out.extend_from_slice(END);
    out
}

pub fn transfer_state(from: &Address, to: &Address, value: u64) -> Vec<u8> {
    let mut out = ST_BEGIN.to_vec();
    push_prefixed(&mut out, from);
    out.extend_from_slice(PARAM_END);
    push_prefixed(&mut out, to);
    out.extend_from_slice(PARAM_END);
    out.extend(encode_amount(value));
    out.extend_from_slice(PARAM_END);
    out.extend_from_slice(ST_END);
    out
}

/// Parameter values for the native struct encoding.
#[derive(Debug, Clone)]
pub enum ParamBytes {
    Address(Address),
    Amount(u64),
    PublicKey(&'static str),
    OntId(String),
    PkAmounts(Vec<(&'static str, u64)>),
    TransferState(Address, Address, u64),
}

impl ParamBytes {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            ParamBytes::Address(address) => push_prefixed(out, address),
            ParamBytes::Amount(value) => out.extend(encode_amount(*value)),
            ParamBytes::PublicKey(pk) => push_prefixed(out, pk.as_bytes()),
            ParamBytes::OntId(id) => push_prefixed(out, id.as_bytes()),
            ParamBytes::PkAmounts(pairs) => {
                let count = pairs.len() as u64;
                out.extend(encode_amount(count));
                out.extend_from_slice(PARAM_END);
                for (pk, _) in pairs {
                    push_prefixed(out, pk.as_bytes());
                    out.extend_from_slice(PARAM_END);
                }
                out.extend(encode_amount(count));
                out.extend_from_slice(PARAM_END);
                for (i, (_, value)) in pairs.iter().enumerate() {
                    out.extend(encode_amount(*value));
                    if i + 1 != pairs.len() {
                        out.extend_from_slice(PARAM_END);
                    }
                }
            }
            ParamBytes::TransferState(from, to, value) => {
                out.extend(transfer_state(from, to, *value))
            }
        }
    }
}

/// `ST_BEGIN (param PARAM_END)* ST_END`
pub fn native_params(params: &[ParamBytes]) -> Vec<u8> {
    let mut out = ST_BEGIN.to_vec();
    for param in params {
        param.encode(&mut out);
        out.extend_from_slice(PARAM_END);
    }
    out.extend_from_slice(ST_END);
    out
}

/// Native token transfer arguments: the states, their count, PACK.
pub fn native_transfer_params(states: &[(Address, Address, u64)]) -> Vec<u8> {
    let mut out = Vec::new();
    for (from, to, value) in states {
        out.extend(transfer_state(from, to, *value));
    }
    out.extend(encode_amount(states.len() as u64));
    out.extend_from_slice(PACK);
    out
}

/// NeoVM arguments in push order, then their count and PACK.
pub fn neovm_params(params: &[ParamBytes]) -> Vec<u8> {
    let mut out = Vec::new();
    for param in params {
        param.encode(&mut out);
    }
    out.extend(encode_amount(params.len() as u64));
    out.extend_from_slice(PACK);
    out
}

/// Assemble header, payload length and a body that ends with the final END byte.
pub fn build_tx(header: &HeaderFields, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    encode_header(&mut out, header);
    encode_compact_size(&mut out, body.len() as u64 - 1);
    out.extend_from_slice(body);
    out
}

pub fn native_tx(
    header: &HeaderFields,
    contract: &Address,
    method: &str,
    params: &[u8],
) -> Vec<u8> {
    let mut body = params.to_vec();
    push_prefixed(&mut body, method.as_bytes());
    body.extend(native_trailer(contract));
    build_tx(header, &body)
}

pub fn neovm_tx(header: &HeaderFields, contract: &Address, method: &str, params: &[u8]) -> Vec<u8> {
    let mut body = params.to_vec();
    push_prefixed(&mut body, method.as_bytes());
    body.extend(neovm_trailer(contract));
    build_tx(header, &body)
}

/// Wasm call; `args` are the raw unprefixed arguments.
pub fn wasm_tx(header: &HeaderFields, contract: &Address, method: &str, args: &[u8]) -> Vec<u8> {
    let mut call = Vec::new();
    push_prefixed(&mut call, method.as_bytes());
    call.extend_from_slice(args);

    let mut body = contract.to_vec();
    push_prefixed(&mut body, &call);
    body.extend_from_slice(END);

    let header = HeaderFields {
        tx_type: crate::types::opcode::TX_TYPE_INVOKE_WASM,
        ..header.clone()
    };
    build_tx(&header, &body)
}

#[test]
fn test_encode_amount_widths() {
    assert_eq!(encode_amount(0), vec![0x00]);
    assert_eq!(encode_amount(16), vec![0x60]);
    assert_eq!(encode_amount(17), vec![0x01, 0x11]);
    assert_eq!(encode_amount(0x1234), vec![0x02, 0x34, 0x12]);
    assert_eq!(encode_amount(u64::MAX).len(), 9);
}
