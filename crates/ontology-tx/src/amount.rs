use std::fmt;

use crate::cursor::Cursor;
use crate::error::FormatError;
use crate::types::opcode::{PUSH_MAX, PUSH_NUMBER};
use crate::types::{Param, ParamKind};

const DECIMAL_BASE: u64 = 10;
/// 2^64 % 10
const P64_R: u64 = 6;
/// 2^64 / 10
const P64_Q: u64 = 1_844_674_407_370_955_161;
/// Digits of u128::MAX.
const MAX_DIGITS: usize = 39;
/// Longest payload behind an amount prefix.
const MAX_AMOUNT_PAYLOAD: u8 = 16;
const PUSH1: u8 = PUSH_NUMBER + 1;

/// A 128-bit unsigned value held as two little-endian words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct U128Parts {
    pub low: u64,
    pub high: u64,
}

impl U128Parts {
    pub const fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    pub fn is_zero(&self) -> bool {
        self.low == 0 && self.high == 0
    }

    /// Divide by ten, returning the quotient and the remainder.
    ///
    /// Uses `2^64 = 10 * P64_Q + P64_R` so no intermediate exceeds 64 bits.
    fn div_rem_10(self) -> (Self, u8) {
        let high_q = self.high / DECIMAL_BASE;
        let high_r = self.high % DECIMAL_BASE;
        let low_q = self.low / DECIMAL_BASE;
        let low_r = self.low % DECIMAL_BASE;

        // high_r <= 9, so high_r * P64_Q < 2^64 and high_r * P64_R + low_r <= 63.
        let carry_in = high_r * P64_R + low_r;
        let curr_q = carry_in / DECIMAL_BASE;
        let curr_r = carry_in % DECIMAL_BASE;

        let (sum, c1) = (high_r * P64_Q).overflowing_add(low_q);
        let (sum, c2) = sum.overflowing_add(curr_q);

        let quotient = Self {
            low: sum,
            high: high_q + u64::from(c1) + u64::from(c2),
        };
        (quotient, curr_r as u8)
    }
}

impl From<u64> for U128Parts {
    fn from(low: u64) -> Self {
        Self { low, high: 0 }
    }
}

/// Total encoded length (prefix included) announced by an amount prefix byte.
fn encoded_len(prefix: u8) -> Option<usize> {
    match prefix {
        0 | PUSH1..=PUSH_MAX => Some(1),
        1..=MAX_AMOUNT_PAYLOAD => Some(usize::from(prefix) + 1),
        _ => None,
    }
}

/// Read an opcode-prefixed amount.
///
/// `0x00` is zero and PUSH1..PUSH16 carry their value in the opcode; a prefix
/// `n <= 16` is followed by `n` little-endian bytes. Payloads of 9 to 16 bytes are
/// accepted here even though [`to_u64`] rejects them.
pub fn read_amount<'a>(cursor: &mut Cursor<'a>) -> Option<Param<'a>> {
    let offset = cursor.offset();
    let len = encoded_len(cursor.peek()?)?;
    let bytes = cursor.read_bytes(len)?;
    Some(Param {
        kind: ParamKind::Amount,
        offset,
        bytes,
    })
}

fn le_u64(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() || bytes.len() > 8 {
        return None;
    }
    Some(
        bytes
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, &b)| acc | (u64::from(b) << (8 * i))),
    )
}

/// Value of a prefixed amount encoding, if it fits in 64 bits.
pub fn amount_to_u64(bytes: &[u8]) -> Option<u64> {
    if bytes.len() > 9 {
        return None;
    }
    let (&prefix, payload) = bytes.split_first()?;
    match prefix {
        0 => payload.is_empty().then_some(0),
        PUSH1..=PUSH_MAX => payload
            .is_empty()
            .then_some(u64::from(prefix - PUSH_NUMBER)),
        _ if payload.len() == usize::from(prefix) => le_u64(payload),
        _ => None,
    }
}

/// Value of an amount parameter as a plain 64-bit integer.
pub fn to_u64(param: &Param<'_>) -> Option<u64> {
    amount_to_u64(param.bytes)
}

/// Split an amount into 128-bit parts.
///
/// With `has_prefix` the bytes are an opcode-prefixed amount of at most 16 bytes in
/// total; without it they must be exactly 16 raw bytes.
pub fn to_u128_parts(bytes: &[u8], has_prefix: bool) -> Option<U128Parts> {
    if bytes.is_empty() || bytes.len() > 16 {
        return None;
    }

    let payload = if has_prefix {
        if bytes.len() <= 9 {
            return amount_to_u64(bytes).map(U128Parts::from);
        }
        &bytes[1..]
    } else if bytes.len() == 16 {
        bytes
    } else {
        return None;
    };

    let (low, high) = payload.split_at(8);
    Some(U128Parts {
        low: le_u64(low)?,
        high: le_u64(high)?,
    })
}

/// Write `value / 10^decimals` as a decimal with trailing fractional zeros trimmed.
///
/// `(0, decimals = 9)` gives `"0"`, `1` gives `"0.000000001"`, `10^9` gives `"1"`.
pub fn write_decimal<W: fmt::Write>(
    out: &mut W,
    value: U128Parts,
    decimals: u8,
) -> Result<(), FormatError> {
    if usize::from(decimals) > MAX_DIGITS {
        return Err(FormatError::TooManyDecimals(decimals));
    }

    // Least significant digit first.
    let mut reversed = [0u8; MAX_DIGITS];
    let mut count = 0;
    let mut rest = value;
    loop {
        let (quotient, digit) = rest.div_rem_10();
        reversed[count] = digit;
        count += 1;
        rest = quotient;
        if rest.is_zero() {
            break;
        }
    }

    let mut digits = [0u8; MAX_DIGITS];
    for (dst, src) in digits.iter_mut().zip(reversed[..count].iter().rev()) {
        *dst = *src;
    }
    let digits = &digits[..count];

    let decimals = usize::from(decimals);
    let int_len = count.saturating_sub(decimals);
    let pad = decimals.saturating_sub(count);
    let (integer, fraction) = digits.split_at(int_len);

    if integer.is_empty() {
        out.write_char('0')?;
    }
    for &d in integer {
        out.write_char(char::from(b'0' + d))?;
    }

    if let Some(last) = fraction.iter().rposition(|&d| d != 0) {
        out.write_char('.')?;
        for _ in 0..pad {
            out.write_char('0')?;
        }
        for &d in &fraction[..=last] {
            out.write_char(char::from(b'0' + d))?;
        }
    }

    Ok(())
}

/// Format a 128-bit value with `decimals` implied fractional digits.
pub fn format_u128(value: U128Parts, decimals: u8) -> Result<String, FormatError> {
    let mut s = String::new();
    write_decimal(&mut s, value, decimals)?;
    Ok(s)
}

/// Format a 64-bit value with `decimals` implied fractional digits.
pub fn format_u64(value: u64, decimals: u8) -> Result<String, FormatError> {
    format_u128(U128Parts::from(value), decimals)
}

/// Format an Amount or UInt128 parameter for display.
pub fn format_param(
    param: &Param<'_>,
    decimals: u8,
    has_prefix: bool,
) -> Result<String, FormatError> {
    match param.kind {
        ParamKind::Amount | ParamKind::UInt128 => {}
        _ => return Err(FormatError::InvalidParam("not an amount")),
    }
    let parts = to_u128_parts(param.bytes, has_prefix)
        .ok_or(FormatError::Unconvertible { len: param.len() })?;
    format_u128(parts, decimals)
}
