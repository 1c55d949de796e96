use tracing::{debug, trace};

use crate::config::Config;
use crate::contract::classify;
use crate::cursor::Cursor;
use crate::error::{DecodeError, ParserStatus};
use crate::header::{decode_header, decode_payload_len};
use crate::method::locate_method;
use crate::params::ParamParser;
use crate::registry::{BuiltinSchemas, SchemaSource};
use crate::types::{Contract, ContractKind, Method, Transaction};

/// Outcome of a successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<'a> {
    /// Contract and method are known; parameters are decoded.
    Clear(Transaction<'a>),
    /// Well-formed up to the method name, but the contract or method is not in the
    /// registry. Parameters are left undecoded and the user must be warned.
    Blind(Transaction<'a>),
}

impl<'a> Decoded<'a> {
    pub fn status(&self) -> ParserStatus {
        match self {
            Decoded::Clear(_) => ParserStatus::Ok,
            Decoded::Blind(_) => ParserStatus::TxNotDefined,
        }
    }

    pub fn transaction(&self) -> &Transaction<'a> {
        match self {
            Decoded::Clear(tx) | Decoded::Blind(tx) => tx,
        }
    }

    pub fn into_transaction(self) -> Transaction<'a> {
        match self {
            Decoded::Clear(tx) | Decoded::Blind(tx) => tx,
        }
    }

    pub fn is_blind(&self) -> bool {
        matches!(self, Decoded::Blind(_))
    }
}

/// Decode a raw transaction against the built-in contract registry.
pub fn deserialize<'a>(data: &'a [u8], config: &Config) -> Result<Decoded<'a>, DecodeError> {
    deserialize_with(data, config, &BuiltinSchemas)
}

/// Decode a raw transaction against a custom registry.
///
/// Every returned view borrows `data`. On error nothing partial is returned.
pub fn deserialize_with<'a>(
    data: &'a [u8],
    config: &Config,
    schemas: &dyn SchemaSource,
) -> Result<Decoded<'a>, DecodeError> {
    config.validate()?;
    if data.len() > config.max_transaction_len {
        debug!(len = data.len(), max = config.max_transaction_len, "transaction too long");
        return Err(DecodeError::TooLong {
            max: config.max_transaction_len,
            actual: data.len(),
        });
    }

    let mut cursor = Cursor::new(data);
    let header = decode_header(&mut cursor)
        .inspect_err(|err| debug!(offset = cursor.offset(), %err, "header rejected"))?;
    decode_payload_len(&mut cursor)
        .inspect_err(|err| debug!(offset = cursor.offset(), %err, "payload length rejected"))?;

    let (kind, address) = classify(&mut cursor, header.tx_type)
        .inspect_err(|err| debug!(tx_type = header.tx_type, %err, "contract rejected"))?;
    let name = locate_method(&mut cursor, kind).inspect_err(|err| {
        debug!(offset = cursor.offset(), contract = %hex::encode(address), %err, "method rejected")
    })?;

    let known = schemas
        .contract(address)
        .and_then(|contract| Some((contract, contract.method(name)?)));
    let Some((contract_schema, method_schema)) = known else {
        debug!(
            contract = %hex::encode(address),
            method = %String::from_utf8_lossy(name),
            status = ?ParserStatus::TxNotDefined,
            "contract or method not defined"
        );
        return Ok(Decoded::Blind(Transaction {
            header,
            contract: Contract {
                kind,
                address,
                ticker: None,
                decimals: 0,
            },
            method: Method {
                name,
                params: Vec::new(),
            },
        }));
    };

    let params = ParamParser::new(&mut cursor, kind, config.max_params)
        .parse(method_schema.params)
        .inspect_err(|err| {
            debug!(
                method = method_schema.name,
                contract = %hex::encode(address),
                %err,
                "parameters rejected"
            )
        })?;

    let trailer = match kind {
        ContractKind::Native | ContractKind::NeoVm => name.len() + 1 + kind.trailer_len(),
        ContractKind::Wasm => 0,
    };
    let consumed = cursor.offset().saturating_add(trailer);
    if consumed != data.len() {
        debug!(offset = cursor.offset(), consumed, len = data.len(), "unconsumed bytes");
        return Err(DecodeError::LengthMismatch {
            expected: data.len(),
            actual: consumed,
        });
    }

    let contract = Contract {
        kind,
        address,
        ticker: Some(contract_schema.ticker),
        decimals: contract_schema
            .decimals
            .saturating_add(method_schema.decimals_shift),
    };
    trace!(
        method = method_schema.name,
        ticker = contract_schema.ticker,
        params = params.len(),
        "transaction decoded"
    );

    Ok(Decoded::Clear(Transaction {
        header,
        contract,
        method: Method { name, params },
    }))
}
