use tracing::trace;

use crate::cursor::Cursor;
use crate::error::DecodeError;
use crate::types::opcode::{
    APPCALL, END, NATIVE_INVOKE, SYSCALL, TX_TYPE_INVOKE, TX_TYPE_INVOKE_WASM,
};
use crate::types::{Address, ContractKind, ADDRESS_LEN};

/// Classify the contract call and extract the contract address.
///
/// For invoke transactions the trailer at the end of the buffer is validated and the
/// cursor is restored afterwards. For Wasm the address is read in place and the cursor
/// is left after it.
pub fn classify<'a>(
    cursor: &mut Cursor<'a>,
    tx_type: u8,
) -> Result<(ContractKind, &'a Address), DecodeError> {
    let (kind, address) = match tx_type {
        TX_TYPE_INVOKE => {
            let kind = invoke_kind(cursor)?;
            let start = cursor.offset();
            let address = read_trailer(cursor, kind)?;
            cursor
                .seek_to(start)
                .ok_or(DecodeError::Bytecode("cursor restore failed"))?;
            (kind, address)
        }
        TX_TYPE_INVOKE_WASM => {
            let address = cursor
                .read_array()
                .ok_or(DecodeError::Bytecode("missing wasm contract address"))?;
            (ContractKind::Wasm, address)
        }
        _ => return Err(DecodeError::Bytecode("unsupported tx type")),
    };

    trace!(?kind, contract = %hex::encode(address), "classified contract");
    Ok((kind, address))
}

/// NeoVM calls end with `APPCALL <address> END`; anything else is a native call.
fn invoke_kind(cursor: &Cursor<'_>) -> Result<ContractKind, DecodeError> {
    let neovm_trailer = ContractKind::NeoVm.trailer_len();
    let pos = cursor
        .len()
        .checked_sub(neovm_trailer)
        .ok_or(DecodeError::Bytecode("payload too short for trailer"))?;
    if cursor.matches_at(pos, APPCALL) {
        Ok(ContractKind::NeoVm)
    } else {
        Ok(ContractKind::Native)
    }
}

fn read_trailer<'a>(
    cursor: &mut Cursor<'a>,
    kind: ContractKind,
) -> Result<&'a Address, DecodeError> {
    let trailer_start = cursor
        .len()
        .checked_sub(kind.trailer_len())
        .filter(|&start| start >= cursor.offset())
        .ok_or(DecodeError::Bytecode("payload too short for trailer"))?;
    cursor
        .seek_to(trailer_start)
        .ok_or(DecodeError::Bytecode("payload too short for trailer"))?;

    let address = match kind {
        ContractKind::Native => {
            if cursor.read_u8() != Some(ADDRESS_LEN as u8) {
                return Err(DecodeError::Bytecode("bad contract address length"));
            }
            let address = cursor
                .read_array()
                .ok_or(DecodeError::Bytecode("missing contract address"))?;
            cursor
                .expect(SYSCALL)
                .ok_or(DecodeError::Bytecode("missing syscall"))?;
            cursor
                .expect(NATIVE_INVOKE)
                .ok_or(DecodeError::Bytecode("missing native invoke"))?;
            address
        }
        ContractKind::NeoVm => {
            cursor
                .expect(APPCALL)
                .ok_or(DecodeError::Bytecode("missing appcall"))?;
            cursor
                .read_array()
                .ok_or(DecodeError::Bytecode("missing contract address"))?
        }
        ContractKind::Wasm => return Err(DecodeError::Bytecode("wasm has no trailer")),
    };

    cursor
        .expect(END)
        .ok_or(DecodeError::Bytecode("missing end"))?;
    if !cursor.is_at_end() {
        return Err(DecodeError::Bytecode("trailing bytes after contract"));
    }
    Ok(address)
}
