use tracing::debug;

use crate::cursor::{Cursor, Endian};
use crate::error::DecodeError;
use crate::types::{Address, Header};

pub const GAS_PRICE_MIN: u64 = 2500;
pub const GAS_LIMIT_MIN: u64 = 20_000;
/// Total ONG supply in its smallest unit; upper bound for `gas_price * gas_limit`.
pub const TOTAL_SUPPLY: u64 = 1_000_000_000_000_000_000;
/// Trailing byte after the payload, not counted by the payload length.
pub const PAYLOAD_TERMINATOR_LEN: usize = 1;

const TX_VERSION: u8 = 0;

const COMPACT_U16: u8 = 0xfd;
const COMPACT_U32: u8 = 0xfe;
const COMPACT_U64: u8 = 0xff;

/// Decode the fixed header.
///
/// The tx-type byte is returned unchecked; the contract classifier decides whether
/// it is supported.
pub fn decode_header<'a>(cursor: &mut Cursor<'a>) -> Result<Header<'a>, DecodeError> {
    let version = cursor
        .read_u8()
        .ok_or(DecodeError::Bytecode("missing version"))?;
    if version != TX_VERSION {
        return Err(DecodeError::Bytecode("unsupported version"));
    }

    let tx_type = cursor
        .read_u8()
        .ok_or(DecodeError::Bytecode("missing tx type"))?;
    let nonce = cursor
        .read_u32(Endian::Little)
        .ok_or(DecodeError::Bytecode("missing nonce"))?;

    let gas_price = cursor
        .read_u64(Endian::Little)
        .ok_or(DecodeError::Bytecode("missing gas price"))?;
    if gas_price < GAS_PRICE_MIN {
        return Err(DecodeError::Bytecode("gas price below minimum"));
    }

    let gas_limit = cursor
        .read_u64(Endian::Little)
        .ok_or(DecodeError::Bytecode("missing gas limit"))?;
    if gas_limit < GAS_LIMIT_MIN {
        return Err(DecodeError::Bytecode("gas limit below minimum"));
    }
    // Keeps `gas_price * gas_limit` within the total supply.
    if gas_limit > TOTAL_SUPPLY / gas_price {
        debug!(gas_price, gas_limit, "fee exceeds total supply");
        return Err(DecodeError::Bytecode("fee exceeds total supply"));
    }

    let payer: &'a Address = cursor
        .read_array()
        .ok_or(DecodeError::Bytecode("missing payer"))?;

    Ok(Header {
        version,
        tx_type,
        nonce,
        gas_price,
        gas_limit,
        payer,
    })
}

fn read_compact_size(cursor: &mut Cursor<'_>) -> Option<u64> {
    let start = cursor.offset();
    let value = match cursor.read_u8()? {
        COMPACT_U16 => cursor.read_u16(Endian::Little).map(u64::from),
        COMPACT_U32 => cursor.read_u32(Endian::Little).map(u64::from),
        COMPACT_U64 => cursor.read_u64(Endian::Little),
        b => Some(u64::from(b)),
    };
    if value.is_none() {
        cursor.seek_to(start)?;
    }
    value
}

/// Decode the payload length and check it accounts for the rest of the buffer.
///
/// Returns the payload length; the cursor is left at the first payload byte.
pub fn decode_payload_len(cursor: &mut Cursor<'_>) -> Result<usize, DecodeError> {
    let declared =
        read_compact_size(cursor).ok_or(DecodeError::Bytecode("missing payload length"))?;
    if declared == 0 {
        return Err(DecodeError::Bytecode("empty payload"));
    }

    let actual = cursor.len();
    let expected = usize::try_from(declared)
        .ok()
        .and_then(|len| cursor.offset().checked_add(len))
        .and_then(|end| end.checked_add(PAYLOAD_TERMINATOR_LEN))
        .unwrap_or(usize::MAX);
    if expected != actual {
        debug!(declared, offset = cursor.offset(), actual, "payload length mismatch");
        return Err(DecodeError::LengthMismatch { expected, actual });
    }

    Ok(declared as usize)
}
