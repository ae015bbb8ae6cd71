//! Classification of pasted text into a known record shape.
//!
//! Candidates are tried in a fixed order and the first match wins. Nothing
//! here returns an error: text that fits no shape is [`Classification::Unrecognized`].

use serde_json::{Map, Value};
use std::fmt;

use crate::crypto::{is_valid_format, SecretKey};
use crate::event::EventRecord;

/// What a piece of text was recognized as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// JSON carrying the minimal shape of an event.
    EventCandidate(EventRecord),
    /// A hex-encoded secret key.
    SecretKeyCandidate(SecretKey),
    /// Nothing derived will be shown.
    Unrecognized,
}

impl Classification {
    /// Short name for logs and display.
    pub fn name(&self) -> &'static str {
        match self {
            Classification::EventCandidate(_) => "event",
            Classification::SecretKeyCandidate(_) => "secret key",
            Classification::Unrecognized => "unrecognized",
        }
    }
}

/// A single shape test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    Event,
    SecretKey,
}

/// Default evaluation order.
pub const CANDIDATES: [Candidate; 2] = [Candidate::Event, Candidate::SecretKey];

impl Candidate {
    /// Test the text against this shape.
    pub fn try_match(self, text: &str) -> Option<Classification> {
        match self {
            Candidate::Event => match decode_event_candidate(text) {
                Ok(record) => Some(Classification::EventCandidate(record)),
                Err(reason) => {
                    tracing::trace!(%reason, "not an event candidate");
                    None
                }
            },
            Candidate::SecretKey => {
                if !is_valid_format(text) {
                    return None;
                }
                SecretKey::from_hex(text)
                    .ok()
                    .map(Classification::SecretKeyCandidate)
            }
        }
    }
}

/// Classify text with the default candidate order.
pub fn classify(text: &str) -> Classification {
    classify_with(&CANDIDATES, text)
}

/// Classify text with an explicit candidate order.
pub fn classify_with(candidates: &[Candidate], text: &str) -> Classification {
    let result = candidates
        .iter()
        .find_map(|candidate| candidate.try_match(text))
        .unwrap_or(Classification::Unrecognized);
    tracing::debug!(classification = result.name(), "classified input");
    result
}

/// Why text was not taken as an event candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    NotJson,
    NotObject,
    FalsyKind,
    FalsyContent,
    MissingTags,
    Undecodable(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotJson => f.write_str("not json"),
            RejectReason::NotObject => f.write_str("not an object"),
            RejectReason::FalsyKind => f.write_str("kind missing or falsy"),
            RejectReason::FalsyContent => f.write_str("content missing or falsy"),
            RejectReason::MissingTags => f.write_str("tags missing"),
            RejectReason::Undecodable(e) => write!(f, "undecodable: {e}"),
        }
    }
}

/// Decode text into an event record if it has the event shape.
///
/// The shape is deliberately loose: `kind` and `content` must be truthy and
/// `tags` present. A `kind` of 0 is falsy and therefore rejected even though
/// kind 0 is a valid protocol kind. Past the shape check the object must
/// still decode into an [`EventRecord`].
pub fn decode_event_candidate(text: &str) -> Result<EventRecord, RejectReason> {
    let value: Value = serde_json::from_str(text).map_err(|_| RejectReason::NotJson)?;
    let object = value.as_object().ok_or(RejectReason::NotObject)?;

    check_shape(object)?;

    serde_json::from_value(value.clone()).map_err(|e| RejectReason::Undecodable(e.to_string()))
}

fn check_shape(object: &Map<String, Value>) -> Result<(), RejectReason> {
    if !object.get("kind").is_some_and(is_truthy) {
        return Err(RejectReason::FalsyKind);
    }
    if !object.get("content").is_some_and(is_truthy) {
        return Err(RejectReason::FalsyContent);
    }
    if !object.get("tags").is_some_and(is_truthy) {
        return Err(RejectReason::MissingTags);
    }
    Ok(())
}

/// Loose truthiness: `null`, `false`, `0` and `""` are falsy; arrays and objects are truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_key_candidate() {
        let text = "a".repeat(64);
        match classify(&text) {
            Classification::SecretKeyCandidate(sk) => assert_eq!(sk.to_hex(), text),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_secret_key_mixed_case() {
        let text = "aB".repeat(32);
        match classify(&text) {
            Classification::SecretKeyCandidate(sk) => assert_eq!(sk.to_hex(), "ab".repeat(32)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_secret_key_wrong_length() {
        assert_eq!(classify(&"a".repeat(63)), Classification::Unrecognized);
        assert_eq!(classify(&"a".repeat(65)), Classification::Unrecognized);
    }

    #[test]
    fn test_secret_key_not_trimmed() {
        assert_eq!(classify(&format!("{}\n", "a".repeat(64))), Classification::Unrecognized);
    }

    #[test]
    fn test_event_candidate() {
        let text = r#"{"kind":1,"content":"hi","tags":[],"created_at":0}"#;
        match classify(text) {
            Classification::EventCandidate(record) => {
                assert_eq!(record.kind, 1);
                assert_eq!(record.content, "hi");
                assert_eq!(record.created_at, Some(0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_kind_zero_is_rejected() {
        let text = r#"{"kind":0,"content":"x","tags":[]}"#;
        assert_eq!(
            decode_event_candidate(text).unwrap_err(),
            RejectReason::FalsyKind
        );
        assert_eq!(classify(text), Classification::Unrecognized);
    }

    #[test]
    fn test_empty_content_is_rejected() {
        let text = r#"{"kind":1,"content":"","tags":[]}"#;
        assert_eq!(
            decode_event_candidate(text).unwrap_err(),
            RejectReason::FalsyContent
        );
    }

    #[test]
    fn test_missing_or_null_tags_rejected() {
        assert_eq!(
            decode_event_candidate(r#"{"kind":1,"content":"x"}"#).unwrap_err(),
            RejectReason::MissingTags
        );
        assert_eq!(
            decode_event_candidate(r#"{"kind":1,"content":"x","tags":null}"#).unwrap_err(),
            RejectReason::MissingTags
        );
    }

    #[test]
    fn test_shape_ok_but_undecodable() {
        let text = r#"{"kind":"1","content":"x","tags":[]}"#;
        assert!(matches!(
            decode_event_candidate(text),
            Err(RejectReason::Undecodable(_))
        ));
        assert_eq!(classify(text), Classification::Unrecognized);
    }

    #[test]
    fn test_not_json_not_hex() {
        assert_eq!(classify("not json, not hex"), Classification::Unrecognized);
        assert_eq!(decode_event_candidate("[1,2]").unwrap_err(), RejectReason::NotObject);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(classify(""), Classification::Unrecognized);
    }

    #[test]
    fn test_first_match_wins() {
        // A JSON string literal of 64 hex chars is valid JSON but not an object,
        // and not bare hex either, so nothing matches.
        let quoted = format!("\"{}\"", "a".repeat(64));
        assert_eq!(classify(&quoted), Classification::Unrecognized);

        // With the key test first, order still decides for bare hex.
        let text = "b".repeat(64);
        let reordered = classify_with(&[Candidate::SecretKey, Candidate::Event], &text);
        assert!(matches!(reordered, Classification::SecretKeyCandidate(_)));
        assert_eq!(classify_with(&[], &text), Classification::Unrecognized);
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&Value::Bool(false)));
        assert!(!is_truthy(&serde_json::json!(0)));
        assert!(!is_truthy(&serde_json::json!(0.0)));
        assert!(!is_truthy(&serde_json::json!("")));
        assert!(is_truthy(&serde_json::json!([])));
        assert!(is_truthy(&serde_json::json!({})));
        assert!(is_truthy(&serde_json::json!(-1)));
        assert!(is_truthy(&serde_json::json!("0")));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_64_hex_chars_is_a_key(text in "[0-9a-fA-F]{64}") {
                prop_assert!(matches!(classify(&text), Classification::SecretKeyCandidate(_)));
            }

            #[test]
            fn wrong_length_hex_is_not_a_key(text in "[0-9a-f]{0,63}|[0-9a-f]{65,80}") {
                prop_assert!(!matches!(classify(&text), Classification::SecretKeyCandidate(_)));
            }

            #[test]
            fn zero_kind_never_matches(content in "[a-z]{1,16}") {
                let text = serde_json::json!({"kind": 0, "content": content, "tags": []}).to_string();
                prop_assert_eq!(classify(&text), Classification::Unrecognized);
            }
        }
    }
}
