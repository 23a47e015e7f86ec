//! Authentication round-trip and rejection tests

use betpool_core::auth::{personal_message_hash, recover_signer, Authenticator};
use betpool_core::config::AuthConfig;
use betpool_core::error::AuthRejection;
use betpool_core::models::{ActionEnvelope, Address, SocialAction};
use chrono::{Duration, Utc};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;

fn test_signer() -> (SigningKey, Address) {
    let key = SigningKey::random(&mut OsRng);
    let point = key.verifying_key().to_encoded_point(false);
    let pubkey: [u8; 64] = point.as_bytes()[1..].try_into().unwrap();
    let address = Address::from_uncompressed_pubkey(&pubkey);
    (key, address)
}

fn sign(key: &SigningKey, message: &str) -> String {
    let hash = personal_message_hash(message.as_bytes());
    let (sig, recovery_id) = key.sign_prehash_recoverable(&hash).unwrap();
    let mut bytes = sig.to_bytes().to_vec();
    bytes.push(recovery_id.to_byte() + 27);
    format!("0x{}", hex::encode(bytes))
}

fn signed_comment(key: &SigningKey, address: &Address) -> (String, String) {
    let envelope = ActionEnvelope::add_comment("pool-7", "Going to zero", address, Utc::now());
    let message = envelope.signing_payload().unwrap();
    let signature = sign(key, &message);
    (message, signature)
}

#[test]
fn recover_signer_round_trip() {
    let (key, address) = test_signer();
    let message = "hello betpool";
    let signature = sign(&key, message);
    assert_eq!(recover_signer(message.as_bytes(), &signature), Some(address));
}

#[test]
fn recover_signer_accepts_zero_based_recovery_byte() {
    let (key, address) = test_signer();
    let message = "hello betpool";
    let hash = personal_message_hash(message.as_bytes());
    let (sig, recovery_id) = key.sign_prehash_recoverable(&hash).unwrap();
    let mut bytes = sig.to_bytes().to_vec();
    bytes.push(recovery_id.to_byte());
    let signature = hex::encode(bytes);
    assert_eq!(recover_signer(message.as_bytes(), &signature), Some(address));
}

#[test]
fn authenticate_valid_signature_recovers_signer() {
    let (key, address) = test_signer();
    let (message, signature) = signed_comment(&key, &address);

    let result = Authenticator::default()
        .authenticate(&message, &signature)
        .unwrap();
    assert_eq!(result.address, address);
    assert_eq!(result.action, SocialAction::AddComment);
    assert_eq!(result.envelope.pool_id, "pool-7");
}

#[test]
fn authenticate_accepts_mixed_case_account() {
    let (key, address) = test_signer();
    let mut envelope = ActionEnvelope::add_comment("pool-7", "hi", &address, Utc::now());
    envelope.account = envelope.account.to_uppercase().replace("0X", "0x");
    let message = envelope.signing_payload().unwrap();
    let signature = sign(&key, &message);

    let result = Authenticator::default()
        .authenticate(&message, &signature)
        .unwrap();
    assert_eq!(result.address, address);
}

#[test]
fn authenticate_rejects_signature_from_other_key() {
    let (_, address) = test_signer();
    let (other_key, _) = test_signer();
    let envelope = ActionEnvelope::add_comment("pool-7", "hi", &address, Utc::now());
    let message = envelope.signing_payload().unwrap();
    let signature = sign(&other_key, &message);

    let err = Authenticator::default()
        .authenticate(&message, &signature)
        .unwrap_err();
    assert_eq!(err, AuthRejection::BadSignature);
}

#[test]
fn authenticate_rejects_tampered_message() {
    let (key, address) = test_signer();
    let (message, signature) = signed_comment(&key, &address);
    let tampered = message.replace("Going to zero", "Going to the moon");

    let err = Authenticator::default()
        .authenticate(&tampered, &signature)
        .unwrap_err();
    assert_eq!(err, AuthRejection::BadSignature);
}

#[test]
fn authenticate_rejects_garbage_signatures() {
    let (key, address) = test_signer();
    let (message, _) = signed_comment(&key, &address);

    for signature in ["", "0x1234", "zzzz", "0x"] {
        let err = Authenticator::default()
            .authenticate(&message, signature)
            .unwrap_err();
        assert_eq!(err, AuthRejection::BadSignature);
    }
}

#[test]
fn authenticate_rejects_stale_timestamp() {
    let (key, address) = test_signer();
    let signed_at = Utc::now();
    let envelope = ActionEnvelope::add_comment("pool-7", "hi", &address, signed_at);
    let message = envelope.signing_payload().unwrap();
    let signature = sign(&key, &message);

    let authenticator = Authenticator::from_config(&AuthConfig::default());

    // within the window
    let now = signed_at + Duration::seconds(599);
    assert!(authenticator.authenticate_at(&message, &signature, now).is_ok());

    // past it, even with a valid signature
    let now = signed_at + Duration::seconds(601);
    let err = authenticator
        .authenticate_at(&message, &signature, now)
        .unwrap_err();
    assert_eq!(err, AuthRejection::StaleTimestamp);
}

#[test]
fn authenticate_rejects_future_timestamp_beyond_skew() {
    let (key, address) = test_signer();
    let signed_at = Utc::now();
    let envelope = ActionEnvelope::add_comment("pool-7", "hi", &address, signed_at);
    let message = envelope.signing_payload().unwrap();
    let signature = sign(&key, &message);

    let authenticator = Authenticator::default();

    // a slightly fast client clock is tolerated
    let now = signed_at - Duration::seconds(30);
    assert!(authenticator.authenticate_at(&message, &signature, now).is_ok());

    let now = signed_at - Duration::seconds(61);
    let err = authenticator
        .authenticate_at(&message, &signature, now)
        .unwrap_err();
    assert_eq!(err, AuthRejection::StaleTimestamp);
}

#[test]
fn authenticate_rejects_unknown_action() {
    let (key, address) = test_signer();
    let message = serde_json::json!({
        "action": "delete_comment",
        "poolId": "pool-7",
        "content": "",
        "timestamp": Utc::now().to_rfc3339(),
        "account": address.as_str(),
    })
    .to_string();
    let signature = sign(&key, &message);

    let err = Authenticator::default()
        .authenticate(&message, &signature)
        .unwrap_err();
    assert_eq!(err, AuthRejection::UnknownAction);
}

#[test]
fn authenticate_rejects_non_json_message() {
    let (key, _) = test_signer();
    let message = "just some plain text";
    let signature = sign(&key, message);

    let err = Authenticator::default()
        .authenticate(message, &signature)
        .unwrap_err();
    assert_eq!(err, AuthRejection::ParseFailure);
}

#[test]
fn authenticate_rejects_unparsable_timestamp() {
    let (key, address) = test_signer();
    let message = serde_json::json!({
        "action": "add_comment",
        "poolId": "pool-7",
        "content": "hi",
        "timestamp": "yesterday-ish",
        "account": address.as_str(),
    })
    .to_string();
    let signature = sign(&key, &message);

    let err = Authenticator::default()
        .authenticate(&message, &signature)
        .unwrap_err();
    assert_eq!(err, AuthRejection::ParseFailure);
}
