//! Signed social-action envelopes

use super::Address;
use crate::error::CoreResult;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Recognized social action kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialAction {
    AddComment,
    ToggleLike,
}

impl SocialAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "add_comment" => Some(Self::AddComment),
            "toggle_like" => Some(Self::ToggleLike),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddComment => "add_comment",
            Self::ToggleLike => "toggle_like",
        }
    }
}

/// The message a client signs to authorize a social action.
///
/// The signature is verified over the serialized form itself, so the struct
/// field order is the signing order and must stay stable. Immutable once
/// signed; consumed once by the authenticator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEnvelope {
    /// Raw action string; validated against [`SocialAction`] during
    /// authentication so unknown values surface as `unknown_action`.
    pub action: String,
    pub pool_id: String,
    pub content: String,
    /// ISO-8601 timestamp captured at signing time.
    pub timestamp: String,
    /// Advisory signer address; the recovered address is authoritative.
    pub account: String,
    #[serde(rename = "commentID", default, skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,
}

impl ActionEnvelope {
    /// Envelope for posting a comment on a pool.
    pub fn add_comment(pool_id: &str, content: &str, account: &Address, now: DateTime<Utc>) -> Self {
        Self {
            action: SocialAction::AddComment.as_str().to_string(),
            pool_id: pool_id.to_string(),
            content: content.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            account: account.as_str().to_string(),
            comment_id: None,
        }
    }

    /// Envelope for toggling a like on a comment.
    pub fn toggle_like(
        pool_id: &str,
        comment_id: &str,
        liked: bool,
        account: &Address,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            action: SocialAction::ToggleLike.as_str().to_string(),
            pool_id: pool_id.to_string(),
            content: if liked { "like" } else { "unlike" }.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            account: account.as_str().to_string(),
            comment_id: Some(comment_id.to_string()),
        }
    }

    pub fn action(&self) -> Option<SocialAction> {
        SocialAction::parse(&self.action)
    }

    /// The exact bytes to sign: deterministic JSON with stable field order.
    pub fn signing_payload(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signing_payload_has_stable_field_order() {
        let account = Address::parse("0xdeadbeef00000000000000000000000000000001").unwrap();
        let envelope = ActionEnvelope::add_comment("pool-1", "hello", &account, Utc::now());
        let payload = envelope.signing_payload().unwrap();

        let action_pos = payload.find("\"action\"").unwrap();
        let pool_pos = payload.find("\"poolId\"").unwrap();
        let account_pos = payload.find("\"account\"").unwrap();
        assert!(action_pos < pool_pos && pool_pos < account_pos);

        let round_trip: ActionEnvelope = serde_json::from_str(&payload).unwrap();
        assert_eq!(round_trip, envelope);
    }

    #[test]
    fn toggle_like_carries_comment_id_and_operation() {
        let account = Address::parse("0xdeadbeef00000000000000000000000000000001").unwrap();
        let envelope = ActionEnvelope::toggle_like("pool-1", "42", false, &account, Utc::now());
        assert_eq!(envelope.action(), Some(SocialAction::ToggleLike));
        assert_eq!(envelope.content, "unlike");
        assert_eq!(envelope.comment_id.as_deref(), Some("42"));
    }
}
