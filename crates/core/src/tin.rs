//! TIN (tax identification number) field encryption.
//!
//! TINs are encrypted at rest with AES-256-GCM and stored as
//! `hex(nonce || ciphertext)`. Because the nonce is random, ciphertexts are
//! non-deterministic; uniqueness lookups therefore go through a keyed
//! HMAC-SHA256 digest of the plaintext stored alongside the ciphertext.
//!
//! Decryption never fails loudly: malformed input or a foreign key yields an
//! empty string, so a mis-keyed record degrades to a blank TIN instead of a
//! 500 on every read.

use aes_gcm::aead::{Aead, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, KeyInit, Nonce};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// AES-GCM nonce length in bytes.
const NONCE_LEN: usize = 12;

/// Value-level cipher for TIN columns.
///
/// Built once from the configured secret and shared behind the application
/// state; all three operations are pure functions of the key material.
pub struct TinCipher {
    cipher: Aes256Gcm,
    mac_key: Vec<u8>,
}

impl TinCipher {
    /// Derive the AES key as SHA-256 of the configured secret. The same
    /// secret keys the lookup digest.
    pub fn new(secret: &str) -> Self {
        let key = Sha256::digest(secret.as_bytes());
        let cipher =
            Aes256Gcm::new_from_slice(&key).expect("SHA-256 output is a valid AES-256 key");
        Self {
            cipher,
            mac_key: secret.as_bytes().to_vec(),
        }
    }

    /// Encrypt a plaintext TIN for storage. Empty input stays empty.
    pub fn encrypt(&self, plaintext: &str) -> String {
        if plaintext.is_empty() {
            return String::new();
        }
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        match self.cipher.encrypt(&nonce, plaintext.as_bytes()) {
            Ok(ciphertext) => {
                let mut out = hex::encode(nonce);
                out.push_str(&hex::encode(ciphertext));
                out
            }
            // AES-GCM encryption of an in-memory buffer does not fail in
            // practice; pass the value through unchanged if it ever does.
            Err(_) => plaintext.to_string(),
        }
    }

    /// Decrypt a stored TIN. Returns an empty string for empty input and for
    /// anything that does not decrypt under this key.
    pub fn decrypt(&self, stored: &str) -> String {
        if stored.is_empty() {
            return String::new();
        }
        let Some(bytes) = hex::decode(stored) else {
            return String::new();
        };
        if bytes.len() <= NONCE_LEN {
            return String::new();
        }
        let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);
        match self.cipher.decrypt(Nonce::from_slice(nonce), ciphertext) {
            Ok(plaintext) => String::from_utf8(plaintext).unwrap_or_default(),
            Err(_) => String::new(),
        }
    }

    /// Deterministic HMAC-SHA256 hex digest of a plaintext TIN, used for
    /// uniqueness lookups against the stored digest column.
    pub fn digest(&self, plaintext: &str) -> String {
        if plaintext.is_empty() {
            return String::new();
        }
        let mut mac =
            <HmacSha256 as Mac>::new_from_slice(&self.mac_key).expect("HMAC accepts any key length");
        mac.update(plaintext.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

// ---------------------------------------------------------------------------
// hex encoding helpers (no extra dep)
// ---------------------------------------------------------------------------

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Decode a lowercase/uppercase hex string; `None` on odd length or
    /// non-hex characters.
    pub fn decode(s: &str) -> Option<Vec<u8>> {
        if s.len() % 2 != 0 {
            return None;
        }
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> TinCipher {
        TinCipher::new("test-crypto-secret")
    }

    #[test]
    fn encrypt_then_decrypt_round_trips() {
        let c = cipher();
        let stored = c.encrypt("123456789012");
        assert_ne!(stored, "123456789012");
        assert_eq!(c.decrypt(&stored), "123456789012");
    }

    #[test]
    fn ciphertext_is_non_deterministic() {
        let c = cipher();
        let a = c.encrypt("123456789012");
        let b = c.encrypt("123456789012");
        assert_ne!(a, b, "random nonce must vary the ciphertext");
        assert_eq!(c.decrypt(&a), c.decrypt(&b));
    }

    #[test]
    fn empty_values_stay_empty() {
        let c = cipher();
        assert_eq!(c.encrypt(""), "");
        assert_eq!(c.decrypt(""), "");
        assert_eq!(c.digest(""), "");
    }

    #[test]
    fn foreign_key_decrypts_to_empty_string() {
        let stored = cipher().encrypt("123456789012");
        let other = TinCipher::new("a-different-secret");
        assert_eq!(other.decrypt(&stored), "");
    }

    #[test]
    fn garbage_input_decrypts_to_empty_string() {
        let c = cipher();
        assert_eq!(c.decrypt("not-hex-at-all"), "");
        assert_eq!(c.decrypt("abcdef"), "");
    }

    #[test]
    fn digest_is_deterministic_and_keyed() {
        let c = cipher();
        assert_eq!(c.digest("123456789012"), c.digest("123456789012"));
        assert_ne!(c.digest("123456789012"), c.digest("123456789013"));

        let other = TinCipher::new("a-different-secret");
        assert_ne!(c.digest("123456789012"), other.digest("123456789012"));
    }

    #[test]
    fn digest_is_sha256_hex() {
        let d = cipher().digest("123456789012");
        assert_eq!(d.len(), 64);
        assert!(d.chars().all(|ch| ch.is_ascii_hexdigit()));
    }
}
