//! Hardware-address cipher configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Smallest RSA modulus accepted for the process key pair.
pub const MIN_KEY_BITS: usize = 1024;

/// Largest RSA modulus accepted for the process key pair.
pub const MAX_KEY_BITS: usize = 4096;

/// RSA key pair configuration.
///
/// The key pair is generated once at startup and never persisted, so
/// ciphertexts written by a previous process cannot be decrypted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CipherConfig {
    /// RSA modulus size in bits.
    #[serde(default = "default_key_bits")]
    pub key_bits: usize,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            key_bits: default_key_bits(),
        }
    }
}

impl CipherConfig {
    /// Reject modulus sizes outside the supported range.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&self.key_bits) || self.key_bits % 8 != 0 {
            return Err(AppError::configuration(format!(
                "cipher.key_bits must be a multiple of 8 between {MIN_KEY_BITS} and {MAX_KEY_BITS}, got {}",
                self.key_bits
            )));
        }
        Ok(())
    }
}

fn default_key_bits() -> usize {
    2048
}
