//! Hash chain utilities for ledger integrity

use crate::error::{LedgerError, LedgerResult};
use crate::record::LedgerRecord;
use sha2::{Digest, Sha256};

/// Display marker in front of every hex digest
pub const HASH_PREFIX: &str = "0x";

/// Linkage value of the first record
pub const GENESIS_HASH: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000000";

/// SHA-256 of `data` as lowercase hex, without prefix
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Digest of the canonical payload text
pub fn payload_hash(canonical: &str) -> String {
    format!("{}{}", HASH_PREFIX, sha256_hex(canonical.as_bytes()))
}

/// Digest linking a record to its predecessor.
///
/// Equivalent to hashing the concatenation `prev_hash + payload_cipher + salt`.
pub fn block_hash(prev_hash: &str, payload_cipher: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prev_hash.as_bytes());
    hasher.update(payload_cipher.as_bytes());
    hasher.update(salt.as_bytes());
    format!("{}{}", HASH_PREFIX, hex::encode(hasher.finalize()))
}

/// True for `0x` followed by exactly 64 lowercase hex digits
pub fn is_well_formed(hash: &str) -> bool {
    hash.strip_prefix(HASH_PREFIX).map_or(false, |hex| {
        hex.len() == 64 && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    })
}

/// Verify hash chain integrity from genesis.
///
/// Checks that every record links to its predecessor and that each
/// `block_hash` matches a recomputation with `salt`. Payloads are not
/// decrypted here.
pub fn verify_chain(records: &[LedgerRecord], salt: &str) -> LedgerResult<()> {
    let mut prev_hash: &str = GENESIS_HASH;

    for (index, record) in records.iter().enumerate() {
        if record.prev_hash != prev_hash {
            return Err(LedgerError::BrokenLink {
                index,
                expected: prev_hash.to_string(),
                actual: record.prev_hash.clone(),
            });
        }

        let calculated = block_hash(&record.prev_hash, &record.payload_cipher, salt);
        if record.block_hash != calculated {
            return Err(LedgerError::InvalidBlockHash {
                index,
                expected: calculated,
                actual: record.block_hash.clone(),
            });
        }

        prev_hash = record.block_hash.as_str();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: &str = "test-salt";

    fn create_record(prev_hash: &str, payload: &str) -> LedgerRecord {
        LedgerRecord {
            prev_hash: prev_hash.to_string(),
            payload_cipher: payload.to_string(),
            payload_hash: payload_hash(payload),
            block_hash: block_hash(prev_hash, payload, SALT),
        }
    }

    #[test]
    fn test_genesis_format() {
        assert!(is_well_formed(GENESIS_HASH));
        assert_eq!(GENESIS_HASH.len(), 66);
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            payload_hash("abc"),
            "0xba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_block_hash_is_concatenation() {
        let joined = format!("{}{}{}", GENESIS_HASH, "{\"k\":650}", SALT);
        assert_eq!(
            block_hash(GENESIS_HASH, "{\"k\":650}", SALT),
            format!("0x{}", sha256_hex(joined.as_bytes()))
        );
    }

    #[test]
    fn test_block_hash_depends_on_salt() {
        assert_ne!(
            block_hash(GENESIS_HASH, "payload", "a"),
            block_hash(GENESIS_HASH, "payload", "b")
        );
    }

    #[test]
    fn test_well_formed_rejects() {
        assert!(!is_well_formed("0x1234"));
        assert!(!is_well_formed(&GENESIS_HASH.replace("0x", "0X")));
        assert!(!is_well_formed(&format!("0x{}", "A".repeat(64))));
        assert!(!is_well_formed(&"0".repeat(66)));
    }

    #[test]
    fn test_verify_valid_chain() {
        let r1 = create_record(GENESIS_HASH, "one");
        let r2 = create_record(&r1.block_hash, "two");
        let r3 = create_record(&r2.block_hash, "three");

        assert!(verify_chain(&[r1, r2, r3], SALT).is_ok());
        assert!(verify_chain(&[], SALT).is_ok());
    }

    #[test]
    fn test_verify_broken_link() {
        let r1 = create_record(GENESIS_HASH, "one");
        let r2 = create_record(&payload_hash("elsewhere"), "two");

        let result = verify_chain(&[r1, r2], SALT);
        assert!(matches!(result, Err(LedgerError::BrokenLink { index: 1, .. })));
    }

    #[test]
    fn test_verify_first_record_must_link_to_genesis() {
        let r1 = create_record(&payload_hash("not genesis"), "one");
        let result = verify_chain(&[r1], SALT);
        assert!(matches!(result, Err(LedgerError::BrokenLink { index: 0, .. })));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let r1 = create_record(GENESIS_HASH, "one");
        let mut r2 = create_record(&r1.block_hash, "two");
        r2.payload_cipher = "TWO".to_string();

        let result = verify_chain(&[r1, r2], SALT);
        assert!(matches!(result, Err(LedgerError::InvalidBlockHash { index: 1, .. })));
    }

    #[test]
    fn test_verify_wrong_salt() {
        let r1 = create_record(GENESIS_HASH, "one");
        let result = verify_chain(&[r1], "other-salt");
        assert!(matches!(result, Err(LedgerError::InvalidBlockHash { index: 0, .. })));
    }
}
