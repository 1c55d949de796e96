use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, Error};

/// Device-dependent decoding limits and display settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Longest accepted raw transaction, in bytes.
    pub max_transaction_len: usize,

    /// Capacity of the simple-parameter array.
    pub max_params: usize,

    /// Use the long label texts of large-screen devices.
    #[serde(default)]
    pub long_labels: bool,
}

impl Config {
    /// Small-screen devices.
    pub const fn nano() -> Self {
        Self {
            max_transaction_len: 1024 * 4,
            max_params: 90,
            long_labels: false,
        }
    }

    /// Large-screen devices (Stax, Flex).
    pub const fn wallet() -> Self {
        Self {
            max_transaction_len: 1024 * 6 + 700,
            max_params: 150,
            long_labels: true,
        }
    }

    /// Parse a config from JSON, e.g. `{"maxTransactionLen": 4096, "maxParams": 90}`.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.max_transaction_len == 0 {
            return Err(DecodeError::Precondition("max_transaction_len is zero"));
        }
        if self.max_params == 0 {
            return Err(DecodeError::Precondition("max_params is zero"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::nano()
    }
}
