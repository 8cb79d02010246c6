//! Payload encryption at rest
//!
//! With a key, payloads are sealed with ChaCha20-Poly1305 under a fresh
//! random 96-bit nonce and stored as `base64(nonce || ciphertext)`.
//! Without a key they are stored as the canonical plaintext.

use crate::error::{LedgerError, LedgerResult};
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// How payloads are stored
pub enum PayloadCipher {
    /// No key configured: payload stored verbatim
    Plaintext,
    /// Authenticated encryption with a 256-bit key
    ChaCha20Poly1305(Box<ChaCha20Poly1305>),
}

impl PayloadCipher {
    /// Build from an optional base64 key (standard or URL-safe alphabet).
    ///
    /// `None` or an empty string selects plaintext storage. A key that is
    /// present but unusable is an error, never a fallback to plaintext.
    pub fn from_key(key: Option<&str>) -> LedgerResult<Self> {
        let key = match key.map(str::trim) {
            None | Some("") => return Ok(PayloadCipher::Plaintext),
            Some(k) => k,
        };

        let bytes = STANDARD
            .decode(key)
            .or_else(|_| URL_SAFE.decode(key))
            .map_err(|e| LedgerError::InvalidKey(format!("not base64: {}", e)))?;

        if bytes.len() != KEY_LEN {
            return Err(LedgerError::InvalidKey(format!(
                "expected {} bytes, got {}",
                KEY_LEN,
                bytes.len()
            )));
        }

        let cipher = ChaCha20Poly1305::new_from_slice(&bytes)
            .map_err(|e| LedgerError::InvalidKey(e.to_string()))?;

        Ok(PayloadCipher::ChaCha20Poly1305(Box::new(cipher)))
    }

    /// Generate a fresh random key, base64 encoded
    pub fn generate_key() -> String {
        let mut key = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        STANDARD.encode(key)
    }

    /// True if payloads are encrypted
    pub fn is_encrypted(&self) -> bool {
        matches!(self, PayloadCipher::ChaCha20Poly1305(_))
    }

    /// Turn canonical payload text into the stored form
    pub fn seal(&self, plaintext: &str) -> LedgerResult<String> {
        match self {
            PayloadCipher::Plaintext => Ok(plaintext.to_string()),
            PayloadCipher::ChaCha20Poly1305(cipher) => {
                let mut nonce = [0u8; NONCE_LEN];
                OsRng.fill_bytes(&mut nonce);

                let ciphertext = cipher
                    .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
                    .map_err(|e| LedgerError::Encryption(e.to_string()))?;

                let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
                sealed.extend_from_slice(&nonce);
                sealed.extend_from_slice(&ciphertext);
                Ok(STANDARD.encode(sealed))
            }
        }
    }

    /// Recover canonical payload text from the stored form
    pub fn open(&self, stored: &str) -> LedgerResult<String> {
        match self {
            PayloadCipher::Plaintext => Ok(stored.to_string()),
            PayloadCipher::ChaCha20Poly1305(cipher) => {
                let sealed = STANDARD
                    .decode(stored)
                    .map_err(|e| LedgerError::Decryption(format!("not base64: {}", e)))?;

                if sealed.len() < NONCE_LEN {
                    return Err(LedgerError::Decryption("ciphertext too short".to_string()));
                }
                let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);

                let plaintext = cipher
                    .decrypt(Nonce::from_slice(nonce), ciphertext)
                    .map_err(|_| {
                        LedgerError::Decryption("authentication failed (wrong key or tampered payload)".to_string())
                    })?;

                String::from_utf8(plaintext)
                    .map_err(|e| LedgerError::Decryption(format!("payload is not UTF-8: {}", e)))
            }
        }
    }
}

impl fmt::Debug for PayloadCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadCipher::Plaintext => write!(f, "PayloadCipher::Plaintext"),
            PayloadCipher::ChaCha20Poly1305(_) => write!(f, "PayloadCipher::ChaCha20Poly1305(..)"),
        }
    }
}
