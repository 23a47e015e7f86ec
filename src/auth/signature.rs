//! EIP-191 personal-message signature recovery
//!
//! Recovers the signer's address from a 65-byte r||s||v signature over the
//! personal-message digest of the signed bytes. Every failure mode collapses
//! to `None`; callers treat that as unauthenticated, never as a fatal error.

use crate::models::Address;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use sha3::{Digest, Keccak256};

const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)
pub fn personal_message_hash(message: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX);
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message);
    hasher.finalize().into()
}

/// Recover the signing address, or `None` if the signature is malformed or
/// does not recover to a valid key. Accepts v in {0, 1, 27, 28} and an
/// optional 0x prefix on the hex string. Pure, no side effects.
pub fn recover_signer(message: &[u8], signature: &str) -> Option<Address> {
    let raw = signature.strip_prefix("0x").unwrap_or(signature);
    let bytes = hex::decode(raw).ok()?;
    if bytes.len() != 65 {
        return None;
    }

    let v = bytes[64];
    let v = if v >= 27 { v - 27 } else { v };
    let recovery_id = RecoveryId::from_byte(v)?;
    let sig = Signature::from_slice(&bytes[..64]).ok()?;

    let digest = personal_message_hash(message);
    let key = VerifyingKey::recover_from_prehash(&digest, &sig, recovery_id).ok()?;

    let point = key.to_encoded_point(false);
    let pubkey: [u8; 64] = point.as_bytes()[1..].try_into().ok()?;
    Some(Address::from_uncompressed_pubkey(&pubkey))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_signatures_recover_to_none() {
        assert!(recover_signer(b"hello", "").is_none());
        assert!(recover_signer(b"hello", "0x1234").is_none());
        assert!(recover_signer(b"hello", "not hex at all").is_none());
        // right length, invalid recovery byte
        let junk = format!("0x{}{:02x}", "11".repeat(64), 9);
        assert!(recover_signer(b"hello", &junk).is_none());
    }

    #[test]
    fn personal_hash_includes_message_length() {
        // same bytes, different framing, must not collide
        assert_ne!(personal_message_hash(b"ab"), personal_message_hash(b"abc"));
        assert_ne!(personal_message_hash(b""), personal_message_hash(b"0"));
    }
}
