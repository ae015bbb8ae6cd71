//! Event verification: id recomputation and signature checks.

use crate::error::ValidationError;
use crate::event::EventRecord;

/// Fully verify an event.
///
/// This performs:
/// - Presence checks for id, sig and pubkey
/// - Id recomputation against the claimed id
/// - Signature verification over the id
pub fn check_event(record: &EventRecord) -> Result<(), ValidationError> {
    // 1. Claimed id must match the canonical hash
    let claimed = record.claimed_id().ok_or(ValidationError::MissingId)??;
    let computed = record.compute_id();
    if computed != claimed {
        return Err(ValidationError::IdMismatch {
            computed: computed.to_hex(),
            claimed: claimed.to_hex(),
        });
    }

    // 2. Signature must verify against the author
    let signature = record.signature().ok_or(ValidationError::MissingSignature)??;
    let author = record.author().ok_or(ValidationError::MissingPubkey)??;
    author.verify(&claimed, &signature)?;

    Ok(())
}

/// Verify an event for display.
///
/// - `None`: neither `id` nor `sig` is present, so there is nothing to check yet
/// - `Some(false)`: any failure, including a missing half or malformed hex
/// - `Some(true)`: id and signature both check out
pub fn verify(record: &EventRecord) -> Option<bool> {
    if record.id.is_none() && record.sig.is_none() {
        return None;
    }
    match check_event(record) {
        Ok(()) => Some(true),
        Err(e) => {
            tracing::debug!(error = %e, "event failed verification");
            Some(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{AuxRand, Keypair, SecretKey};
    use crate::event::EventBuilder;

    fn make_test_keypair() -> Keypair {
        Keypair::from_secret(&SecretKey::from_bytes([0x42; 32])).unwrap()
    }

    fn signed() -> EventRecord {
        EventBuilder::text_note("hello")
            .created_at(1_736_870_400)
            .sign(&make_test_keypair(), AuxRand::Random)
            .unwrap()
    }

    #[test]
    fn test_valid_event() {
        let record = signed();
        assert!(check_event(&record).is_ok());
        assert_eq!(verify(&record), Some(true));
    }

    #[test]
    fn test_known_event_verifies() {
        let record: EventRecord = serde_json::from_str(
            r#"{"id":"a889df6a387419ff204305f4c2d296ee328c3cd4f8b62f205648a541b4554dfb","pubkey":"c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5","created_at":1698623783,"kind":1,"tags":[],"content":"hello from the nostr army knife","sig":"84876e1ee3e726da84e5d195eb79358b2b3eaa4d9bd38456fde3e8a2af3f1cd4cda23f23fda454869975b3688797d4c66e12f4c51c1b43c6d2997c5e61865661"}"#,
        )
        .unwrap();
        assert_eq!(verify(&record), Some(true));
    }

    #[test]
    fn test_nothing_to_verify() {
        let record = EventBuilder::text_note("hi").created_at(0).build();
        assert_eq!(verify(&record), None);
    }

    #[test]
    fn test_invalid_signature() {
        let mut record = signed();
        record.sig = Some("ff".repeat(64));
        assert!(matches!(check_event(&record), Err(ValidationError::SignatureFailed)));
        assert_eq!(verify(&record), Some(false));
    }

    #[test]
    fn test_tampered_content() {
        let mut record = signed();
        record.content = "tampered".into();
        assert!(matches!(
            check_event(&record),
            Err(ValidationError::IdMismatch { .. })
        ));
        assert_eq!(verify(&record), Some(false));
    }

    #[test]
    fn test_hashed_without_signature() {
        let kp = make_test_keypair();
        let record = EventBuilder::text_note("draft")
            .created_at(0)
            .hash(&kp.public_key());
        assert!(matches!(check_event(&record), Err(ValidationError::MissingSignature)));
        assert_eq!(verify(&record), Some(false));
    }

    #[test]
    fn test_sig_without_id() {
        let mut record = EventBuilder::text_note("hi").created_at(0).build();
        record.sig = Some("00".repeat(64));
        assert!(matches!(check_event(&record), Err(ValidationError::MissingId)));
        assert_eq!(verify(&record), Some(false));
    }

    #[test]
    fn test_malformed_hex() {
        let mut record = signed();
        record.sig = Some("<bad>".into());
        assert!(matches!(
            check_event(&record),
            Err(ValidationError::MalformedField(_))
        ));
        assert_eq!(verify(&record), Some(false));
    }

    #[test]
    fn test_missing_pubkey() {
        let mut record = EventBuilder::text_note("hi").created_at(0).build();
        record.id = Some(record.compute_id().to_hex());
        record.sig = Some("00".repeat(64));
        assert!(matches!(check_event(&record), Err(ValidationError::MissingPubkey)));
    }

    #[test]
    fn test_uppercase_id_accepted() {
        let mut record = signed();
        record.id = record.id.map(|id| id.to_uppercase());
        assert_eq!(verify(&record), Some(true));
    }
}
