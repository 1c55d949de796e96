use crate::cursor::Cursor;
use crate::error::DecodeError;
use crate::types::opcode::{PACK, PARAM_ST_END};
use crate::types::ContractKind;

/// Locate the method name.
///
/// For native and NeoVM calls the name sits right before the fixed trailer and is
/// found by scanning backward for the last boundary opcode; the cursor is returned
/// to where it started so parameters can be read forward. For Wasm the name is read
/// in place after a remaining-length byte and the cursor is left after it.
pub fn locate_method<'a>(
    cursor: &mut Cursor<'a>,
    kind: ContractKind,
) -> Result<&'a [u8], DecodeError> {
    match kind {
        ContractKind::Native | ContractKind::NeoVm => scan_backward(cursor, kind),
        ContractKind::Wasm => read_wasm_name(cursor),
    }
}

/// Boundary position after the opcode closest to the trailer.
fn find_boundary(
    cursor: &Cursor<'_>,
    kind: ContractKind,
    begin: usize,
    end: usize,
) -> Option<usize> {
    (begin..end).rev().find_map(|i| {
        let param_st_end = kind == ContractKind::Native
            && i + PARAM_ST_END.len() <= end
            && cursor.matches_at(i, PARAM_ST_END);
        if param_st_end {
            Some(i + PARAM_ST_END.len())
        } else if cursor.matches_at(i, PACK) {
            Some(i + PACK.len())
        } else {
            None
        }
    })
}

fn scan_backward<'a>(cursor: &mut Cursor<'a>, kind: ContractKind) -> Result<&'a [u8], DecodeError> {
    let begin = cursor.offset();
    let end = cursor
        .len()
        .checked_sub(kind.trailer_len())
        .filter(|&end| end > begin)
        .ok_or(DecodeError::Bytecode("no room for method name"))?;

    let boundary = find_boundary(cursor, kind, begin, end)
        .ok_or(DecodeError::Bytecode("method boundary not found"))?;
    // Bytes between the name's length prefix and the trailer.
    let gap = (end - 1)
        .checked_sub(boundary)
        .filter(|&gap| gap > 0)
        .ok_or(DecodeError::Bytecode("no room for method name"))?;

    cursor
        .seek_to(boundary)
        .ok_or(DecodeError::Bytecode("method boundary out of range"))?;
    let name = read_name(cursor);
    cursor
        .seek_to(begin)
        .ok_or(DecodeError::Bytecode("cursor restore failed"))?;

    let name = name?;
    if name.len() != gap {
        return Err(DecodeError::Bytecode("method name length mismatch"));
    }
    Ok(name)
}

fn read_wasm_name<'a>(cursor: &mut Cursor<'a>) -> Result<&'a [u8], DecodeError> {
    let remaining = cursor
        .read_u8()
        .ok_or(DecodeError::Bytecode("missing remaining length"))?;
    if remaining == 0 {
        return Err(DecodeError::Bytecode("empty wasm call"));
    }
    // Everything left except the final END byte.
    if usize::from(remaining) != cursor.remaining().saturating_sub(1) {
        return Err(DecodeError::Bytecode("wasm remaining length mismatch"));
    }
    read_name(cursor)
}

/// Read a name with a one-byte, non-zero length prefix.
fn read_name<'a>(cursor: &mut Cursor<'a>) -> Result<&'a [u8], DecodeError> {
    let len = cursor
        .peek()
        .ok_or(DecodeError::Bytecode("missing method name length"))?;
    if len == 0 {
        return Err(DecodeError::Bytecode("empty method name"));
    }
    let prefixed = cursor
        .read_bytes(usize::from(len) + 1)
        .ok_or(DecodeError::Bytecode("method name overruns buffer"))?;
    Ok(&prefixed[1..])
}
