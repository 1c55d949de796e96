use crate::amount;
use crate::cursor::Cursor;
use crate::error::DecodeError;
use crate::types::opcode::{END, PACK, PARAM_END, ST_BEGIN, ST_END};
use crate::types::{ContractKind, Param, ParamKind, ParamType, ADDRESS_LEN, PUBKEY_LEN};

/// Schema-driven parameter decoder writing into a bounded list of views.
pub struct ParamParser<'c, 'a> {
    cursor: &'c mut Cursor<'a>,
    kind: ContractKind,
    max_params: usize,
    params: Vec<Param<'a>>,
}

impl<'c, 'a> ParamParser<'c, 'a> {
    pub fn new(cursor: &'c mut Cursor<'a>, kind: ContractKind, max_params: usize) -> Self {
        Self {
            cursor,
            kind,
            max_params,
            params: Vec::new(),
        }
    }

    /// Decode every parameter of `schema` together with the framing of the contract
    /// encoding, and return the simple views in wire order.
    pub fn parse(mut self, schema: &[ParamType]) -> Result<Vec<Param<'a>>, DecodeError> {
        match self.kind {
            ContractKind::Native if schema == [ParamType::TransferStateList] => {
                self.transfer_state_list()?;
            }
            ContractKind::Native => {
                self.constant(ST_BEGIN, "missing struct begin")?;
                for &ty in schema {
                    self.param(ty)?;
                    self.constant(PARAM_END, "missing parameter end")?;
                }
                self.constant(ST_END, "missing struct end")?;
            }
            ContractKind::NeoVm => {
                for &ty in schema {
                    self.param(ty)?;
                }
                self.check_amount(schema.len() as u64, "parameter count mismatch")?;
                self.constant(PACK, "missing pack")?;
            }
            ContractKind::Wasm => {
                for &ty in schema {
                    self.param(ty)?;
                }
                self.constant(END, "missing end")?;
            }
        }
        Ok(self.params)
    }

    fn push(&mut self, param: Param<'a>) -> Result<(), DecodeError> {
        if self.params.len() >= self.max_params {
            return Err(DecodeError::Bytecode("too many parameters"));
        }
        self.params.push(param);
        Ok(())
    }

    fn param(&mut self, ty: ParamType) -> Result<(), DecodeError> {
        match ty {
            ParamType::Address => {
                let prefixed = self.kind != ContractKind::Wasm;
                let param = read_address(self.cursor, prefixed)
                    .ok_or(DecodeError::Bytecode("invalid address"))?;
                self.push(param)
            }
            ParamType::Amount => {
                let param = amount::read_amount(self.cursor)
                    .ok_or(DecodeError::Bytecode("invalid amount"))?;
                self.push(param)
            }
            ParamType::UInt128 => {
                let param =
                    read_uint128(self.cursor).ok_or(DecodeError::Bytecode("invalid uint128"))?;
                self.push(param)
            }
            ParamType::PublicKey => {
                let param = read_public_key(self.cursor)
                    .ok_or(DecodeError::Bytecode("invalid public key"))?;
                self.push(param)
            }
            ParamType::OntId => {
                skip_ont_id(self.cursor).ok_or(DecodeError::Bytecode("invalid ont id"))
            }
            ParamType::PkAmountPairs => self.pk_amount_pairs(),
            ParamType::TransferState => self.transfer_state(),
            ParamType::TransferStateList => {
                Err(DecodeError::Bytecode("transfer state list outside native transfer"))
            }
        }
    }

    fn constant(&mut self, expected: &[u8], what: &'static str) -> Result<(), DecodeError> {
        self.cursor.expect(expected).ok_or(DecodeError::Bytecode(what))
    }

    /// Read an amount and require it to equal `expected`.
    fn check_amount(&mut self, expected: u64, what: &'static str) -> Result<(), DecodeError> {
        let param = amount::read_amount(self.cursor).ok_or(DecodeError::Bytecode(what))?;
        match amount::to_u64(&param) {
            Some(value) if value == expected => Ok(()),
            _ => Err(DecodeError::Bytecode(what)),
        }
    }

    /// `ST_BEGIN from PARAM_END to PARAM_END amount PARAM_END ST_END`, three slots.
    fn transfer_state(&mut self) -> Result<(), DecodeError> {
        self.constant(ST_BEGIN, "missing transfer state begin")?;
        for _ in 0..2 {
            let address = read_address(self.cursor, true)
                .ok_or(DecodeError::Bytecode("invalid transfer state address"))?;
            self.push(address)?;
            self.constant(PARAM_END, "missing parameter end")?;
        }
        let value = amount::read_amount(self.cursor)
            .ok_or(DecodeError::Bytecode("invalid transfer state amount"))?;
        self.push(value)?;
        self.constant(PARAM_END, "missing parameter end")?;
        self.constant(ST_END, "missing transfer state end")
    }

    /// Transfer states while the next byte opens one, then their count and PACK.
    fn transfer_state_list(&mut self) -> Result<(), DecodeError> {
        let mut count = 0u64;
        while self.cursor.peek() == Some(ST_BEGIN[0]) {
            self.transfer_state()?;
            count += 1;
        }
        self.check_amount(count, "transfer state count mismatch")?;
        self.constant(PACK, "missing pack")
    }

    /// Count `n`, then `n` public keys, the count again and `n` amounts; `2n + 1` slots.
    fn pk_amount_pairs(&mut self) -> Result<(), DecodeError> {
        let count_param = amount::read_amount(self.cursor)
            .ok_or(DecodeError::Bytecode("invalid public key count"))?;
        let count = amount::to_u64(&count_param)
            .filter(|&n| n > 0)
            .ok_or(DecodeError::Bytecode("invalid public key count"))?;
        self.push(count_param)?;
        self.constant(PARAM_END, "missing parameter end")?;

        for _ in 0..count {
            let pk = read_public_key(self.cursor)
                .ok_or(DecodeError::Bytecode("invalid public key"))?;
            self.push(pk)?;
            self.constant(PARAM_END, "missing parameter end")?;
        }

        self.check_amount(count, "amount count mismatch")?;
        self.constant(PARAM_END, "missing parameter end")?;

        for i in 0..count {
            let value = amount::read_amount(self.cursor)
                .ok_or(DecodeError::Bytecode("invalid amount"))?;
            self.push(value)?;
            if i + 1 != count {
                self.constant(PARAM_END, "missing parameter end")?;
            }
        }
        Ok(())
    }
}

/// 20-byte address, optionally behind a length byte that must be 20.
fn read_address<'a>(cursor: &mut Cursor<'a>, prefixed: bool) -> Option<Param<'a>> {
    if prefixed {
        if !cursor.can_read(ADDRESS_LEN + 1) || cursor.peek()? != ADDRESS_LEN as u8 {
            return None;
        }
        cursor.read_u8()?;
    }
    let offset = cursor.offset();
    let bytes = cursor.read_bytes(ADDRESS_LEN)?;
    Some(Param {
        kind: ParamKind::Address,
        offset,
        bytes,
    })
}

fn read_uint128<'a>(cursor: &mut Cursor<'a>) -> Option<Param<'a>> {
    let offset = cursor.offset();
    let bytes = cursor.read_bytes(16)?;
    Some(Param {
        kind: ParamKind::UInt128,
        offset,
        bytes,
    })
}

/// Hex-encoded compressed key behind a length byte that must be 66.
fn read_public_key<'a>(cursor: &mut Cursor<'a>) -> Option<Param<'a>> {
    if !cursor.can_read(PUBKEY_LEN + 1) || cursor.peek()? != PUBKEY_LEN as u8 {
        return None;
    }
    cursor.read_u8()?;
    let offset = cursor.offset();
    let bytes = cursor.read_bytes(PUBKEY_LEN)?;
    Some(Param {
        kind: ParamKind::PublicKey,
        offset,
        bytes,
    })
}

fn skip_ont_id(cursor: &mut Cursor<'_>) -> Option<()> {
    let len = cursor.peek().filter(|&len| len != 0)?;
    cursor.read_bytes(usize::from(len) + 1).map(|_| ())
}
