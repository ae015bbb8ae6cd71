//! Event records: the NIP-01 object a user pastes.
//!
//! Wire fields (`pubkey`, `id`, `sig`) stay as text so that a malformed paste
//! can still be serialized and shown. Typed values are produced on demand.

use serde::{Deserialize, Serialize};

use crate::canonical::serialize;
use crate::crypto::{hash, AuxRand, Keypair, PublicKey, SecretKey, Signature};
use crate::error::CoreError;
use crate::types::EventId;

/// Kind of a short text note.
pub const KIND_TEXT_NOTE: u64 = 1;

/// An event record as found in pasted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event kind.
    pub kind: u64,

    /// Arbitrary text.
    pub content: String,

    /// Ordered tags, each an ordered list of strings.
    pub tags: Vec<Vec<String>>,

    /// Unix seconds. Pasted candidates may leave it out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,

    /// Hex x-only public key of the author. Absent before signing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubkey: Option<String>,

    /// Hex event id. Absent until computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Hex signature. Absent until computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sig: Option<String>,
}

/// Where an event sits in its signing lifecycle.
///
/// Derived purely from which fields are present; nothing is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningState {
    /// No id, no signature.
    Unsigned,
    /// Id present, signature absent. Signing is the next step.
    Hashed,
    /// Id and signature present. Only verification remains.
    Signed,
}

impl SigningState {
    /// Classify a record by field presence.
    pub fn of(record: &EventRecord) -> Self {
        match (&record.id, &record.sig) {
            (Some(_), Some(_)) => SigningState::Signed,
            (Some(_), None) => SigningState::Hashed,
            // A lone sig without an id cannot be checked or completed.
            (None, _) => SigningState::Unsigned,
        }
    }

    /// Label shown to users.
    pub fn as_str(self) -> &'static str {
        match self {
            SigningState::Unsigned => "unsigned",
            SigningState::Hashed => "hashed",
            SigningState::Signed => "signed",
        }
    }
}

impl EventRecord {
    /// The canonical serialization of this record.
    pub fn canonical(&self) -> String {
        serialize(self)
    }

    /// Compute the event id from the canonical serialization.
    pub fn compute_id(&self) -> EventId {
        hash(&self.canonical()).into()
    }

    /// Current signing state.
    pub fn signing_state(&self) -> SigningState {
        SigningState::of(self)
    }

    /// Copy of this record with `id` and `sig` removed.
    pub fn unsigned(&self) -> Self {
        Self {
            id: None,
            sig: None,
            ..self.clone()
        }
    }

    /// Parse the claimed id, if any.
    pub fn claimed_id(&self) -> Option<Result<EventId, CoreError>> {
        self.id.as_deref().map(EventId::from_hex)
    }

    /// Parse the author key, if any.
    pub fn author(&self) -> Option<Result<PublicKey, CoreError>> {
        self.pubkey.as_deref().map(PublicKey::from_hex)
    }

    /// Parse the signature, if any.
    pub fn signature(&self) -> Option<Result<Signature, CoreError>> {
        self.sig.as_deref().map(Signature::from_hex)
    }

    /// Fill in `pubkey`, `id` and `sig` using the given keypair.
    ///
    /// Any existing id or signature is replaced.
    pub fn finalize(&self, keypair: &Keypair, aux: AuxRand) -> Result<Self, CoreError> {
        let mut signed = self.unsigned();
        signed.pubkey = Some(keypair.public_key().to_hex());
        let id = signed.compute_id();
        let sig = keypair.sign(&id, aux)?;
        signed.id = Some(id.to_hex());
        signed.sig = Some(sig.to_hex());
        Ok(signed)
    }
}

/// Fill in `pubkey`, `id` and `sig` from a secret key.
pub fn finalize(record: &EventRecord, secret: &SecretKey, aux: AuxRand) -> Result<EventRecord, CoreError> {
    let keypair = Keypair::from_secret(secret)?;
    record.finalize(&keypair, aux)
}

/// Builder for creating event records.
pub struct EventBuilder {
    kind: u64,
    content: String,
    tags: Vec<Vec<String>>,
    created_at: Option<i64>,
    pubkey: Option<String>,
}

impl EventBuilder {
    /// Start a new event of the given kind.
    pub fn new(kind: u64) -> Self {
        Self {
            kind,
            content: String::new(),
            tags: Vec::new(),
            created_at: None,
            pubkey: None,
        }
    }

    /// Start a short text note.
    pub fn text_note(content: impl Into<String>) -> Self {
        Self::new(KIND_TEXT_NOTE).content(content)
    }

    /// Set the content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Append a tag.
    pub fn tag<I, S>(mut self, tag: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.push(tag.into_iter().map(Into::into).collect());
        self
    }

    /// Set the timestamp.
    pub fn created_at(mut self, created_at: i64) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set the author key.
    pub fn pubkey(mut self, pubkey: &PublicKey) -> Self {
        self.pubkey = Some(pubkey.to_hex());
        self
    }

    /// Build an unsigned record.
    pub fn build(self) -> EventRecord {
        EventRecord {
            kind: self.kind,
            content: self.content,
            tags: self.tags,
            created_at: self.created_at,
            pubkey: self.pubkey,
            id: None,
            sig: None,
        }
    }

    /// Build a record with `pubkey` and `id` filled in but no signature.
    pub fn hash(self, author: &PublicKey) -> EventRecord {
        let mut record = self.pubkey(author).build();
        record.id = Some(record.compute_id().to_hex());
        record
    }

    /// Build and sign.
    pub fn sign(self, keypair: &Keypair, aux: AuxRand) -> Result<EventRecord, CoreError> {
        self.build().finalize(keypair, aux)
    }
}
