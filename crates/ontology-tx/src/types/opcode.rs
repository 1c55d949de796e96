//! Fixed byte sequences of the Ontology transaction payload.

pub const SYSCALL: &[u8] = &[0x00, 0x68];
pub const APPCALL: &[u8] = &[0x67];
pub const PACK: &[u8] = &[0xc1];
pub const END: &[u8] = &[0x00];
pub const ST_BEGIN: &[u8] = &[0x00, 0xc6, 0x6b];
pub const ST_END: &[u8] = &[0x6c];
pub const PARAM_END: &[u8] = &[0x6a, 0x7c, 0xc8];
pub const PARAM_ST_END: &[u8] = &[0x6a, 0x7c, 0xc8, 0x6c];
pub const NATIVE_INVOKE: &[u8] = b"\x16Ontology.Native.Invoke";

/// PUSHN is `PUSH_NUMBER + N` for `1 <= N <= 16`.
pub const PUSH_NUMBER: u8 = 0x50;
pub const PUSH_MAX: u8 = PUSH_NUMBER + 16;

pub const TX_TYPE_INVOKE: u8 = 0xd1;
pub const TX_TYPE_INVOKE_WASM: u8 = 0xd2;
