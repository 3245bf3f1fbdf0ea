//! RSA-OAEP (SHA-256) encryption of hardware-address strings.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rsa::rand_core::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use tracing::{error, info};

use sessionhub_core::config::CipherConfig;
use sessionhub_core::error::{AppError, ErrorKind};

/// SHA-256 digest length in bytes.
const DIGEST_LEN: usize = 32;

/// Process-lifetime key pair used to protect client hardware addresses.
///
/// OAEP padding is randomized, so encrypting the same address twice yields
/// different tokens. Compare tokens with [`CipherContext::matches`], never
/// with `==`.
#[derive(Clone)]
pub struct CipherContext {
    public_key: RsaPublicKey,
    private_key: RsaPrivateKey,
}

impl fmt::Debug for CipherContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherContext")
            .field("key_bits", &self.key_bits())
            .finish_non_exhaustive()
    }
}

impl CipherContext {
    /// Generate a fresh key pair.
    ///
    /// Called once at startup; the pair is neither persisted nor rotated.
    pub fn generate(config: &CipherConfig) -> Result<Self, AppError> {
        config.validate()?;

        let private_key = RsaPrivateKey::new(&mut OsRng, config.key_bits).map_err(|e| {
            error!(key_bits = config.key_bits, error = %e, "RSA key generation failed");
            AppError::with_source(ErrorKind::Internal, "Failed to generate cipher key pair", e)
        })?;
        let public_key = RsaPublicKey::from(&private_key);

        info!(key_bits = config.key_bits, "Generated hardware-address cipher key pair");

        Ok(Self {
            public_key,
            private_key,
        })
    }

    /// Modulus size in bits.
    pub fn key_bits(&self) -> usize {
        self.public_key.size() * 8
    }

    /// Longest plaintext, in bytes, that fits under OAEP/SHA-256 for this key.
    pub fn max_plaintext_len(&self) -> usize {
        self.public_key.size().saturating_sub(2 * DIGEST_LEN + 2)
    }

    /// Encrypt a hardware address into a base64 token.
    pub fn encrypt(&self, plain_address: &str) -> Result<String, AppError> {
        let ciphertext = self
            .public_key
            .encrypt(&mut OsRng, Oaep::new::<Sha256>(), plain_address.as_bytes())
            .map_err(|e| {
                error!(
                    input_len = plain_address.len(),
                    max_len = self.max_plaintext_len(),
                    error = %e,
                    "Error encrypting hardware address"
                );
                AppError::with_source(
                    ErrorKind::Encryption,
                    "Failed to encrypt hardware address",
                    e,
                )
            })?;

        Ok(STANDARD.encode(ciphertext))
    }

    /// Decrypt a base64 token back into the hardware address.
    pub fn decrypt(&self, token: &str) -> Result<String, AppError> {
        let ciphertext = STANDARD.decode(token.trim()).map_err(|e| {
            error!(error = %e, "Error decoding hardware-address token");
            AppError::with_source(
                ErrorKind::Decryption,
                "Hardware-address token is not valid base64",
                e,
            )
        })?;

        let plain = self
            .private_key
            .decrypt(Oaep::new::<Sha256>(), &ciphertext)
            .map_err(|e| {
                error!(error = %e, "Error decrypting hardware address");
                AppError::with_source(
                    ErrorKind::Decryption,
                    "Failed to decrypt hardware address",
                    e,
                )
            })?;

        String::from_utf8(plain).map_err(|e| {
            error!(error = %e, "Decrypted hardware address is not UTF-8");
            AppError::with_source(
                ErrorKind::Decryption,
                "Decrypted hardware address is not valid UTF-8",
                e,
            )
        })
    }

    /// Whether `token` decrypts to `plain_address`.
    ///
    /// A token that fails to decrypt does not match.
    pub fn matches(&self, token: &str, plain_address: &str) -> bool {
        self.decrypt(token)
            .map(|decrypted| decrypted == plain_address)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    fn shared() -> &'static CipherContext {
        static CTX: OnceLock<CipherContext> = OnceLock::new();
        CTX.get_or_init(|| {
            CipherContext::generate(&CipherConfig { key_bits: 1024 }).expect("keygen")
        })
    }

    #[test]
    fn test_roundtrip() {
        let ctx = shared();
        let token = ctx.encrypt("AA:BB:CC:DD:EE:FF").unwrap();
        assert_ne!(token, "AA:BB:CC:DD:EE:FF");
        assert_eq!(ctx.decrypt(&token).unwrap(), "AA:BB:CC:DD:EE:FF");
    }

    #[test]
    fn test_encryption_is_randomized() {
        let ctx = shared();
        let a = ctx.encrypt("00-1B-44-11-3A-B7").unwrap();
        let b = ctx.encrypt("00-1B-44-11-3A-B7").unwrap();
        assert_ne!(a, b);
        assert!(ctx.matches(&a, "00-1B-44-11-3A-B7"));
        assert!(ctx.matches(&b, "00-1B-44-11-3A-B7"));
        assert!(!ctx.matches(&a, "00-1B-44-11-3A-B8"));
    }

    #[test]
    fn test_token_is_base64_of_modulus_size() {
        let ctx = shared();
        let token = ctx.encrypt("aa:bb").unwrap();
        let raw = STANDARD.decode(&token).unwrap();
        assert_eq!(raw.len(), ctx.key_bits() / 8);
    }

    #[test]
    fn test_plaintext_bound() {
        let ctx = shared();
        assert_eq!(ctx.max_plaintext_len(), 128 - 66);

        let fits = "x".repeat(ctx.max_plaintext_len());
        assert!(ctx.encrypt(&fits).is_ok());

        let too_long = "x".repeat(ctx.max_plaintext_len() + 1);
        let err = ctx.encrypt(&too_long).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Encryption);
    }

    #[test]
    fn test_decrypt_rejects_garbage() {
        let ctx = shared();
        let err = ctx.decrypt("not base64 !!!").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decryption);

        let err = ctx.decrypt(&STANDARD.encode([7u8; 128])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decryption);
        assert!(!ctx.matches("not base64 !!!", "anything"));
    }

    #[test]
    fn test_foreign_key_cannot_decrypt() {
        let other = CipherContext::generate(&CipherConfig { key_bits: 1024 }).unwrap();
        let token = other.encrypt("AA:BB:CC:DD:EE:FF").unwrap();
        assert!(shared().decrypt(&token).is_err());
    }

    #[test]
    fn test_rejects_invalid_key_size() {
        let err = CipherContext::generate(&CipherConfig { key_bits: 256 }).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_debug_hides_key_material() {
        let rendered = format!("{:?}", shared());
        assert!(rendered.contains("key_bits: 1024"));
        assert!(!rendered.contains("private"));
    }
}
