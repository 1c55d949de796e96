use crate::error::Error;
use crate::types::Address;

/// Turns a 20-byte script hash into the text shown to the user.
///
/// Wallets plug in their base58check encoder here.
pub trait AddressEncoder {
    fn encode(&self, address: &Address) -> Result<String, Error>;
}

/// Lowercase hex, for hosts without a base58 encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexAddressEncoder;

impl AddressEncoder for HexAddressEncoder {
    fn encode(&self, address: &Address) -> Result<String, Error> {
        Ok(hex::encode(address))
    }
}
