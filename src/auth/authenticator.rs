//! Validation of signed action envelopes

use super::signature::recover_signer;
use crate::config::AuthConfig;
use crate::error::AuthRejection;
use crate::models::{ActionEnvelope, Address, SocialAction};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// A successfully authenticated action.
///
/// `address` is the recovered signer and the authoritative actor identity
/// for any downstream write; the envelope's `account` field was advisory.
#[derive(Debug, Clone, PartialEq)]
pub struct Authenticated {
    pub address: Address,
    pub action: SocialAction,
    pub envelope: ActionEnvelope,
}

/// Pure authentication gate for signed social actions.
///
/// Runs client-side to gate optimistic display and must be mirrored
/// server-side before anything is persisted. Never suspends, never touches
/// shared state.
#[derive(Debug, Clone)]
pub struct Authenticator {
    max_age: Duration,
    max_future_skew: Duration,
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new(Duration::seconds(600), Duration::seconds(60))
    }
}

impl Authenticator {
    pub fn new(max_age: Duration, max_future_skew: Duration) -> Self {
        Self {
            max_age,
            max_future_skew,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.max_age(), config.max_future_skew())
    }

    pub fn authenticate(
        &self,
        message_json: &str,
        signature: &str,
    ) -> Result<Authenticated, AuthRejection> {
        self.authenticate_at(message_json, signature, Utc::now())
    }

    /// `now` is injectable so freshness checks are deterministic under test.
    pub fn authenticate_at(
        &self,
        message_json: &str,
        signature: &str,
        now: DateTime<Utc>,
    ) -> Result<Authenticated, AuthRejection> {
        // The signature covers the exact bytes the client signed; verify
        // before parsing so tampering anywhere in the payload is caught.
        let recovered = recover_signer(message_json.as_bytes(), signature)
            .ok_or(AuthRejection::BadSignature)?;

        let envelope: ActionEnvelope =
            serde_json::from_str(message_json).map_err(|_| AuthRejection::ParseFailure)?;

        if !recovered.matches(&envelope.account) {
            debug!(
                account = %envelope.account,
                recovered = %recovered,
                "signer does not match claimed account"
            );
            return Err(AuthRejection::BadSignature);
        }

        let action = envelope.action().ok_or(AuthRejection::UnknownAction)?;

        let signed_at = DateTime::parse_from_rfc3339(&envelope.timestamp)
            .map_err(|_| AuthRejection::ParseFailure)?
            .with_timezone(&Utc);

        // Freshness is the only replay bound; there is no nonce store.
        if now.signed_duration_since(signed_at) > self.max_age
            || signed_at.signed_duration_since(now) > self.max_future_skew
        {
            return Err(AuthRejection::StaleTimestamp);
        }

        Ok(Authenticated {
            address: recovered,
            action,
            envelope,
        })
    }
}
