//! Canonical NIP-01 serialization.
//!
//! An event serializes to the compact JSON array
//! `[0,<pubkey>,<created_at>,<kind>,<tags>,<content>]`:
//! - Field order is fixed here, never taken from the input
//! - No whitespace
//! - Strings escaped the way `JSON.stringify` does (`\"`, `\\`, `\n`, `\r`,
//!   `\t`, `\b`, `\f`, other control characters as `\u00xx`, everything else raw UTF-8)
//! - Absent `pubkey` or `created_at` become `null`
//! - `id` and `sig` never take part
//!
//! This string is hashed for the event id, so any change breaks every id.

use serde_json::Value;

use crate::error::CoreError;
use crate::event::EventRecord;

/// Leading marker of every canonical array.
const VERSION_MARKER: u64 = 0;

/// Number of elements in the canonical array.
const ARITY: usize = 6;

/// Serialize an event into its canonical form.
pub fn serialize(record: &EventRecord) -> String {
    let value = Value::Array(vec![
        Value::from(VERSION_MARKER),
        record
            .pubkey
            .as_ref()
            .map_or(Value::Null, |pk| Value::String(pk.clone())),
        record.created_at.map_or(Value::Null, Value::from),
        Value::from(record.kind),
        Value::Array(
            record
                .tags
                .iter()
                .map(|tag| Value::Array(tag.iter().cloned().map(Value::String).collect()))
                .collect(),
        ),
        Value::String(record.content.clone()),
    ]);

    // Display on Value is the compact serializer and cannot fail.
    value.to_string()
}

/// Parse a canonical serialization back into a record (without id or sig).
pub fn deserialize(canonical: &str) -> Result<EventRecord, CoreError> {
    let value: Value = serde_json::from_str(canonical)?;
    let items = match value {
        Value::Array(items) if items.len() == ARITY => items,
        Value::Array(items) => {
            return Err(CoreError::MalformedEvent(format!(
                "expected {} elements, got {}",
                ARITY,
                items.len()
            )))
        }
        _ => return Err(CoreError::MalformedEvent("expected array".into())),
    };

    if items[0].as_u64() != Some(VERSION_MARKER) {
        return Err(CoreError::MalformedEvent("missing leading 0".into()));
    }

    let pubkey = match &items[1] {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        _ => return Err(CoreError::MalformedEvent("invalid pubkey".into())),
    };

    let created_at = match &items[2] {
        Value::Null => None,
        v => Some(
            v.as_i64()
                .ok_or_else(|| CoreError::MalformedEvent("invalid created_at".into()))?,
        ),
    };

    let kind = items[3]
        .as_u64()
        .ok_or_else(|| CoreError::MalformedEvent("invalid kind".into()))?;

    let tags: Vec<Vec<String>> = serde_json::from_value(items[4].clone())
        .map_err(|e| CoreError::MalformedEvent(format!("invalid tags: {e}")))?;

    let content = items[5]
        .as_str()
        .ok_or_else(|| CoreError::MalformedEvent("invalid content".into()))?
        .to_string();

    Ok(EventRecord {
        kind,
        content,
        tags,
        created_at,
        pubkey,
        id: None,
        sig: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash;
    use crate::event::EventBuilder;

    #[test]
    fn test_serialize_without_pubkey() {
        let record = EventBuilder::text_note("hi").created_at(0).build();
        assert_eq!(serialize(&record), r#"[0,null,0,1,[],"hi"]"#);
        assert_eq!(
            hash(&serialize(&record)).to_hex(),
            "baa932b8ea952dc1a321ab247aa411a870bc7d9cf96eb720d8f90444d7ed8742"
        );
    }

    #[test]
    fn test_serialize_without_created_at() {
        let record = EventBuilder::text_note("hi").build();
        assert_eq!(serialize(&record), r#"[0,null,null,1,[],"hi"]"#);
    }

    #[test]
    fn test_serialize_ignores_id_and_sig() {
        let mut record = EventBuilder::text_note("hi").created_at(0).build();
        let before = serialize(&record);
        record.id = Some("ab".repeat(32));
        record.sig = Some("cd".repeat(64));
        assert_eq!(serialize(&record), before);
    }

    #[test]
    fn test_serialize_field_order_is_fixed() {
        let a: EventRecord = serde_json::from_str(
            r#"{"kind":1,"content":"x","tags":[["e","1"]],"created_at":7,"pubkey":"pk"}"#,
        )
        .unwrap();
        let b: EventRecord = serde_json::from_str(
            r#"{"pubkey":"pk","created_at":7,"tags":[["e","1"]],"content":"x","kind":1}"#,
        )
        .unwrap();
        assert_eq!(serialize(&a), serialize(&b));
        assert_eq!(serialize(&a), r#"[0,"pk",7,1,[["e","1"]],"x"]"#);
    }

    #[test]
    fn test_string_escaping() {
        let record = EventBuilder::text_note("line\nquote\"tab\tü\u{1}back\\")
            .created_at(1)
            .build();
        assert_eq!(
            serialize(&record),
            r#"[0,null,1,1,[],"line\nquote\"tab\tü\u0001back\\"]"#
        );
    }

    #[test]
    fn test_known_event_serialization() {
        let record = EventRecord {
            kind: 1,
            content: "hello from the nostr army knife".into(),
            tags: vec![],
            created_at: Some(1698623783),
            pubkey: Some("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5".into()),
            id: None,
            sig: None,
        };
        assert_eq!(
            hash(&serialize(&record)).to_hex(),
            "a889df6a387419ff204305f4c2d296ee328c3cd4f8b62f205648a541b4554dfb"
        );
    }

    #[test]
    fn test_deserialize_roundtrip() {
        let record = EventBuilder::new(30023)
            .content("long form")
            .tag(["d", "slug"])
            .tag(["t", "a", "b"])
            .created_at(1_700_000_000)
            .build();
        let canonical = serialize(&record);
        let decoded = deserialize(&canonical).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(serialize(&decoded), canonical);
    }

    #[test]
    fn test_deserialize_rejects_malformed() {
        assert!(deserialize("not json").is_err());
        assert!(deserialize("{}").is_err());
        assert!(deserialize(r#"[0,null,0,1,[]]"#).is_err());
        assert!(deserialize(r#"[1,null,0,1,[],"x"]"#).is_err());
        assert!(deserialize(r#"[0,5,0,1,[],"x"]"#).is_err());
        assert!(deserialize(r#"[0,null,0,-1,[],"x"]"#).is_err());
        assert!(deserialize(r#"[0,null,0,1,[[1]],"x"]"#).is_err());
        assert!(deserialize(r#"[0,null,0,1,[],7]"#).is_err());
    }
}
