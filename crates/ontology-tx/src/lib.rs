pub mod address;
pub mod amount;
pub mod config;
pub mod contract;
pub mod cursor;
pub mod decoder;
pub mod engine;
pub mod error;
pub mod header;
pub mod method;
pub mod params;
pub mod registry;
pub mod types;

#[cfg(test)]
mod test_utils;

use error::Error;

// Re-exports for convenience
pub use address::{AddressEncoder, HexAddressEncoder};
pub use config::Config;
pub use decoder::Decoded;
pub use engine::{DisplayItem, DisplayModel};
pub use error::{DecodeError, FormatError, ParserStatus};
pub use registry::{BuiltinSchemas, ContractSchema, MethodSchema, SchemaSource, StaticSchemas};
pub use types::Transaction;

/// Decode a raw transaction against the built-in contract table.
///
/// Unknown contracts and methods are not errors; they come back as
/// [`Decoded::Blind`].
pub fn decode<'a>(data: &'a [u8], config: &Config) -> Result<Decoded<'a>, Error> {
    Ok(decoder::deserialize(data, config)?)
}

/// Decode a raw transaction and build its review screens.
pub fn format(
    data: &[u8],
    signer: &str,
    addresses: &dyn AddressEncoder,
    config: &Config,
) -> Result<DisplayModel, Error> {
    let decoded = decoder::deserialize(data, config)?;
    engine::format_transaction(&decoded, signer, addresses, config)
}

/// Same as [`format`], with a caller-provided schema table.
pub fn format_with(
    data: &[u8],
    signer: &str,
    addresses: &dyn AddressEncoder,
    schemas: &dyn SchemaSource,
    config: &Config,
) -> Result<DisplayModel, Error> {
    let decoded = decoder::deserialize_with(data, config, schemas)?;
    engine::format_transaction(&decoded, signer, addresses, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{REGISTER_CANDIDATE, UNAUTHORIZE_FOR_PEER};

    const SIGNER: &str = "AXCyYV4DNmmsqZn9qJEqHqpacVxcr7X7ns";

    #[test]
    fn test_decode_fixture_status() {
        let data = hex::decode(UNAUTHORIZE_FOR_PEER).unwrap();
        let decoded = decode(&data, &Config::default()).unwrap();
        assert_eq!(decoded.status(), ParserStatus::Ok);
        assert_eq!(decoded.status().code(), 1);
    }

    #[test]
    fn test_decode_error_status() {
        let data = hex::decode(REGISTER_CANDIDATE).unwrap();
        let err = decode(&data[..data.len() - 1], &Config::default()).unwrap_err();
        match err {
            Error::Decode(err) => assert_eq!(err.status(), ParserStatus::LengthWrong),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_format_end_to_end() {
        let data = hex::decode(REGISTER_CANDIDATE).unwrap();
        let model = format(&data, SIGNER, &HexAddressEncoder, &Config::wallet()).unwrap();

        assert_eq!(model.finish_title, "Sign transaction to register a node?");
        assert!(model.value("Node Operation Public Key").is_some());
        assert_eq!(model.items.last().map(|i| i.value.as_str()), Some(SIGNER));
    }

    #[test]
    fn test_format_with_empty_schemas_is_blind() {
        let data = hex::decode(UNAUTHORIZE_FOR_PEER).unwrap();
        let model = format_with(
            &data,
            SIGNER,
            &HexAddressEncoder,
            &StaticSchemas::new(),
            &Config::default(),
        )
        .unwrap();

        assert!(model.blind);
        assert_eq!(
            model.value("Contract Address"),
            Some("0000000000000000000000000000000000000007")
        );
    }
}
