use std::str;

pub const ADDRESS_LEN: usize = 20;
pub const PUBKEY_LEN: usize = 66;

/// 20-byte script hash identifying an account or a contract.
pub type Address = [u8; ADDRESS_LEN];

/// Fixed transaction header. The payer borrows from the raw buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    pub version: u8,
    pub tx_type: u8,
    pub nonce: u32,
    pub gas_price: u64,
    pub gas_limit: u64,
    pub payer: &'a Address,
}

impl Header<'_> {
    /// Maximum network fee, `gas_price * gas_limit`.
    ///
    /// Always `Some` for headers produced by the decoder, which bounds the product by
    /// the total token supply.
    pub fn fee(&self) -> Option<u64> {
        self.gas_price.checked_mul(self.gas_limit)
    }
}

/// Contract-call encoding of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    /// Built-in contract invoked through `Ontology.Native.Invoke`.
    Native,
    /// User contract invoked with stack bytecode ending in APPCALL.
    NeoVm,
    /// Wasm contract with a flat length-prefixed encoding.
    Wasm,
}

impl ContractKind {
    /// Number of fixed bytes after the method name, including the final END byte.
    pub fn trailer_len(self) -> usize {
        match self {
            ContractKind::Native => 47,
            ContractKind::NeoVm => 22,
            ContractKind::Wasm => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contract<'a> {
    pub kind: ContractKind,
    pub address: &'a Address,
    /// Ticker of the token this contract operates on, when known.
    pub ticker: Option<&'static str>,
    pub decimals: u8,
}

/// Parameter types as declared by the schema registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Address,
    PublicKey,
    Amount,
    UInt128,
    /// Length-prefixed identity; validated and discarded.
    OntId,
    /// Count, public keys, then as many amounts.
    PkAmountPairs,
    /// From address, to address, amount.
    TransferState,
    /// Repeated transfer states followed by their count.
    TransferStateList,
}

/// Kind of a decoded simple parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Address,
    PublicKey,
    /// Opcode-prefixed amount, 1 to 17 bytes including the prefix.
    Amount,
    /// 16 raw little-endian bytes.
    UInt128,
}

/// Borrowed window into the raw transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param<'a> {
    pub kind: ParamKind,
    /// Position of the first byte in the raw transaction.
    pub offset: usize,
    pub bytes: &'a [u8],
}

impl<'a> Param<'a> {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_address(&self) -> Option<&'a Address> {
        match self.kind {
            ParamKind::Address => self.bytes.try_into().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method<'a> {
    pub name: &'a [u8],
    /// Simple parameters in wire order; composites are flattened.
    pub params: Vec<Param<'a>>,
}

impl<'a> Method<'a> {
    /// The method name, if it is valid UTF-8.
    pub fn name_str(&self) -> Option<&'a str> {
        str::from_utf8(self.name).ok()
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name.as_bytes()
    }
}

/// A decoded transaction. Every view borrows the raw buffer it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction<'a> {
    pub header: Header<'a>,
    pub contract: Contract<'a>,
    pub method: Method<'a>,
}
