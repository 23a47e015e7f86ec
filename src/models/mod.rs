//! Shared data model for pools, bets, payouts, and social actions

mod action;
mod comment;
mod pool;

pub use action::{ActionEnvelope, SocialAction};
pub use comment::{build_threads, Comment, CommentKey, CommentThread, CommentView};
pub use pool::{
    BetEvent, BetPlacedEvent, BetWithdrawalEvent, PayoutBetRef, PayoutEvent, Pool, PoolBetSummary,
    PoolRef, PoolStatus, TokenType,
};

use serde::{de, Deserialize, Deserializer, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;

/// Lowercase 0x-prefixed Ethereum address.
///
/// Construction normalizes case so equality and hashing behave regardless of
/// how the indexer or a wallet capitalized the hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Parse a 20-byte hex address, with or without the 0x prefix.
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .unwrap_or(raw);
        if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(format!("0x{}", digits.to_ascii_lowercase())))
    }

    /// Derive the address from a 64-byte uncompressed secp256k1 public key
    /// (x || y, without the 0x04 prefix): keccak256(pubkey)[12..].
    pub fn from_uncompressed_pubkey(pubkey: &[u8; 64]) -> Self {
        let hash = Keccak256::digest(pubkey);
        Self(format!("0x{}", hex::encode(&hash[12..])))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a raw address string.
    pub fn matches(&self, other: &str) -> bool {
        other.eq_ignore_ascii_case(&self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Address {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| crate::error::CoreError::Parse(format!("invalid address: {s}")))
    }
}

// Indexer responses carry addresses in arbitrary case; normalize and validate
// on the way in rather than trusting upstream formatting.
impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Address::parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid address: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case() {
        let mixed = "0xDeAdBeEf00000000000000000000000000000001";
        let addr = Address::parse(mixed).unwrap();
        assert_eq!(addr.as_str(), "0xdeadbeef00000000000000000000000000000001");
        assert!(addr.matches(mixed));
    }

    #[test]
    fn parse_rejects_short_and_nonhex() {
        assert!(Address::parse("0x1234").is_none());
        assert!(Address::parse("0xzzzzbeef00000000000000000000000000000001").is_none());
    }

    #[test]
    fn deserialize_validates_and_normalizes() {
        let addr: Address =
            serde_json::from_str("\"0xDeAdBeEf00000000000000000000000000000001\"").unwrap();
        assert_eq!(addr.as_str(), "0xdeadbeef00000000000000000000000000000001");

        assert!(serde_json::from_str::<Address>("\"0x1234\"").is_err());
        assert!(serde_json::from_str::<Address>("\"not an address\"").is_err());
    }
}
