use crate::types::ParamType::{
    Address as Addr, Amount, OntId, PkAmountPairs, PublicKey, TransferState, TransferStateList,
    UInt128,
};
use crate::types::{Address, ParamType};

/// Expected parameters of one contract method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSchema {
    pub name: &'static str,
    pub params: &'static [ParamType],
    /// Added to the contract decimals when this method is called.
    pub decimals_shift: u8,
}

impl MethodSchema {
    pub const fn new(name: &'static str, params: &'static [ParamType]) -> Self {
        Self {
            name,
            params,
            decimals_shift: 0,
        }
    }

    const fn shifted(mut self, decimals_shift: u8) -> Self {
        self.decimals_shift = decimals_shift;
        self
    }
}

/// A known contract and the methods that can be shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractSchema {
    pub address: Address,
    /// Token the contract operates on, not necessarily the contract's own token.
    pub ticker: &'static str,
    pub decimals: u8,
    pub methods: &'static [MethodSchema],
}

impl ContractSchema {
    pub fn method(&self, name: &[u8]) -> Option<&MethodSchema> {
        self.methods.iter().find(|m| m.name.as_bytes() == name)
    }
}

/// Trait for contract schema providers.
pub trait SchemaSource {
    fn contract(&self, address: &Address) -> Option<&ContractSchema>;
}

const fn native_address(last: u8) -> Address {
    let mut address = [0u8; 20];
    address[19] = last;
    address
}

pub const ONT_ADDRESS: Address = native_address(0x01);
pub const ONG_ADDRESS: Address = native_address(0x02);
pub const GOVERNANCE_ADDRESS: Address = native_address(0x07);
pub const WING_ADDRESS: Address = [
    0x80, 0xef, 0x58, 0x6e, 0xf5, 0xff, 0xf2, 0xb1, 0xea, 0x83, 0x78, 0x39, 0xd6, 0x62, 0xa5, 0x27,
    0xcd, 0x9f, 0xc5, 0x00,
];
pub const STONT_ADDRESS: Address = [
    0xcd, 0x84, 0x1f, 0xf2, 0x17, 0xc6, 0x8d, 0xc2, 0xfa, 0xf8, 0x10, 0x63, 0x68, 0xc5, 0x57, 0x7b,
    0x12, 0x04, 0xec, 0xe9,
];
pub const MBL_ADDRESS: Address = [
    0x6d, 0x03, 0xa1, 0x68, 0x43, 0xe6, 0x1e, 0x5d, 0x96, 0xd3, 0x89, 0xe1, 0x78, 0x71, 0x7e, 0xd5,
    0x7f, 0x9d, 0xa4, 0xe5,
];

pub const ONT_DECIMALS: u8 = 0;
pub const ONG_DECIMALS: u8 = 9;
/// Extra precision of the V2 native token methods.
const V2_SHIFT: u8 = 9;

const NATIVE_TOKEN_METHODS: &[MethodSchema] = &[
    MethodSchema::new("transfer", &[TransferStateList]),
    MethodSchema::new("transferFrom", &[Addr, TransferState]),
    MethodSchema::new("approve", &[Addr, Addr, Amount]),
    MethodSchema::new("transferV2", &[TransferStateList]).shifted(V2_SHIFT),
    MethodSchema::new("transferFromV2", &[Addr, TransferState]).shifted(V2_SHIFT),
    MethodSchema::new("approveV2", &[Addr, Addr, Amount]).shifted(V2_SHIFT),
];

const GOVERNANCE_METHODS: &[MethodSchema] = &[
    MethodSchema::new(
        "registerCandidate",
        &[PublicKey, Addr, Amount, OntId, Amount],
    ),
    MethodSchema::new("quitNode", &[PublicKey, Addr]),
    MethodSchema::new("addInitPos", &[PublicKey, Addr, Amount]),
    MethodSchema::new("reduceInitPos", &[PublicKey, Addr, Amount]),
    MethodSchema::new("changeMaxAuthorization", &[PublicKey, Addr, Amount]),
    MethodSchema::new("setFeePercentage", &[PublicKey, Addr, Amount, Amount]),
    MethodSchema::new("authorizeForPeer", &[Addr, PkAmountPairs]),
    MethodSchema::new("unAuthorizeForPeer", &[Addr, PkAmountPairs]),
    MethodSchema::new("withdraw", &[Addr, PkAmountPairs]),
    MethodSchema::new("withdrawFee", &[Addr]),
];

// NeoVM pushes arguments in reverse order.
const NEOVM_OEP4_METHODS: &[MethodSchema] = &[
    MethodSchema::new("transfer", &[Amount, Addr, Addr]),
    MethodSchema::new("transferFrom", &[Amount, Addr, Addr, Addr]),
    MethodSchema::new("approve", &[Amount, Addr, Addr]),
];

const WASM_OEP4_METHODS: &[MethodSchema] = &[
    MethodSchema::new("transfer", &[Addr, Addr, UInt128]),
    MethodSchema::new("transferFrom", &[Addr, Addr, Addr, UInt128]),
    MethodSchema::new("approve", &[Addr, Addr, UInt128]),
];

const BUILTIN: &[ContractSchema] = &[
    ContractSchema {
        address: ONT_ADDRESS,
        ticker: "ONT",
        decimals: ONT_DECIMALS,
        methods: NATIVE_TOKEN_METHODS,
    },
    ContractSchema {
        address: ONG_ADDRESS,
        ticker: "ONG",
        decimals: ONG_DECIMALS,
        methods: NATIVE_TOKEN_METHODS,
    },
    // Stakes ONT, so it reports the ONT ticker and decimals.
    ContractSchema {
        address: GOVERNANCE_ADDRESS,
        ticker: "ONT",
        decimals: ONT_DECIMALS,
        methods: GOVERNANCE_METHODS,
    },
    ContractSchema {
        address: WING_ADDRESS,
        ticker: "WING",
        decimals: 9,
        methods: NEOVM_OEP4_METHODS,
    },
    ContractSchema {
        address: STONT_ADDRESS,
        ticker: "STONT",
        decimals: 9,
        methods: WASM_OEP4_METHODS,
    },
    ContractSchema {
        address: MBL_ADDRESS,
        ticker: "MBL",
        decimals: 8,
        methods: NEOVM_OEP4_METHODS,
    },
];

/// The compiled-in contract table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSchemas;

impl BuiltinSchemas {
    pub fn all(&self) -> &'static [ContractSchema] {
        BUILTIN
    }
}

impl SchemaSource for BuiltinSchemas {
    fn contract(&self, address: &Address) -> Option<&ContractSchema> {
        BUILTIN.iter().find(|c| &c.address == address)
    }
}

/// In-memory schema source for testing.
#[derive(Debug, Clone, Default)]
pub struct StaticSchemas {
    contracts: Vec<ContractSchema>,
}

impl StaticSchemas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, schema: ContractSchema) {
        self.contracts.retain(|c| c.address != schema.address);
        self.contracts.push(schema);
    }
}

impl SchemaSource for StaticSchemas {
    fn contract(&self, address: &Address) -> Option<&ContractSchema> {
        self.contracts.iter().find(|c| &c.address == address)
    }
}
