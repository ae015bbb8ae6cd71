//! Labeled output fields handed to a presenter.

use serde::Serialize;
use std::fmt;

/// A field value. Never raw binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Null,
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Null => Ok(()),
        }
    }
}

/// One labeled line of output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
    pub value: FieldValue,
}

impl Field {
    pub fn new(label: &'static str, value: impl Into<FieldValue>) -> Self {
        Self {
            label,
            hint: None,
            value: value.into(),
        }
    }

    pub fn with_hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }
}

/// Field labels.
pub mod labels {
    pub const SERIALIZED_EVENT: &str = "serialized event";
    pub const EVENT_ID: &str = "event id";
    pub const NOTE: &str = "note";
    pub const SIGNING_STATE: &str = "signing state";
    pub const SIGNATURE: &str = "signature";
    pub const SIGNATURE_VALID: &str = "signature valid";
    pub const PRIVATE_KEY: &str = "private key";
    pub const PUBLIC_KEY: &str = "public key";
    pub const NSEC: &str = "nsec";
    pub const NPUB: &str = "npub";
}
