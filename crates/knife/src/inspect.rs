//! The derivation pipeline: classify text, then derive labeled fields.
//!
//! Every pass is a pure function of the input text and the configuration.
//! Fields that are cheap are computed inline; signing and verification are
//! returned as [`Deferred`] jobs so a [`Session`](crate::Session) can run them
//! in the background. [`Inspector::inspect`] simply resolves them inline.

use knife_core::{
    classify, derive_public, sign, verify, AuxRand, Classification, EventRecord, Keypair,
    SecretKey, SigningState,
};

use crate::error::{KnifeError, Result};
use crate::field::{labels, Field, FieldValue};

/// Configuration for the Inspector.
#[derive(Debug, Clone)]
pub struct InspectorConfig {
    /// Show bech32 (`npub`, `nsec`, `note`) forms next to hex.
    pub nip19: bool,
    /// Auxiliary randomness used when signing.
    pub aux_rand: AuxRand,
    /// Key used to sign unsigned or hashed events, if any.
    pub signing_key: Option<SecretKey>,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            nip19: true,
            aux_rand: AuxRand::Random,
            signing_key: None,
        }
    }
}

impl InspectorConfig {
    pub fn with_nip19(mut self, nip19: bool) -> Self {
        self.nip19 = nip19;
        self
    }

    pub fn with_aux_rand(mut self, aux_rand: AuxRand) -> Self {
        self.aux_rand = aux_rand;
        self
    }

    pub fn with_signing_key(mut self, key: SecretKey) -> Self {
        self.signing_key = Some(key);
        self
    }

    /// Set the signing key from user text: 64 hex characters or an `nsec1...` string.
    pub fn with_signing_key_text(self, text: &str) -> Result<Self> {
        let key = SecretKey::parse(text)?;
        Ok(self.with_signing_key(key))
    }
}

/// A derivation that may run in the background.
#[derive(Debug, Clone)]
pub enum Deferred {
    /// Sign the record's id with the configured key.
    Signature {
        record: EventRecord,
        key: Option<SecretKey>,
        aux: AuxRand,
    },
    /// Check the record's id and signature.
    Verification(EventRecord),
}

impl Deferred {
    /// Label of the field this job fills.
    pub fn label(&self) -> &'static str {
        match self {
            Deferred::Signature { .. } => labels::SIGNATURE,
            Deferred::Verification(_) => labels::SIGNATURE_VALID,
        }
    }

    /// Value shown when the job could not finish.
    pub fn fallback(&self) -> FieldValue {
        match self {
            Deferred::Signature { .. } => FieldValue::Null,
            Deferred::Verification(_) => FieldValue::Bool(false),
        }
    }

    /// Run the job to completion.
    pub fn resolve(self) -> Field {
        match self {
            Deferred::Signature { record, key, aux } => {
                // The signature only verifies when the record's author is the signer.
                let author = record.author().and_then(|parsed| parsed.ok());
                let signer = key.as_ref().and_then(|k| derive_public(k).ok());
                let digest = match (author, signer) {
                    (Some(author), Some(signer)) if author == signer => Some(record.compute_id()),
                    (Some(author), Some(signer)) => {
                        tracing::debug!(%author, %signer, "pubkey does not belong to the signing key");
                        None
                    }
                    _ => None,
                };
                let signature = sign(digest.as_ref(), key.as_ref(), aux);
                tracing::trace!(signed = signature.is_some(), "resolved signature");
                Field::new(labels::SIGNATURE, signature.map(|s| s.to_hex()))
            }
            Deferred::Verification(record) => {
                let valid = verify(&record);
                tracing::trace!(?valid, "resolved verification");
                Field::new(labels::SIGNATURE_VALID, valid)
            }
        }
    }
}

/// The synchronous part of a pass plus the jobs still to run.
#[derive(Debug, Clone)]
pub struct Plan {
    pub classification: Classification,
    pub fields: Vec<Field>,
    pub deferred: Vec<Deferred>,
}

/// Classify and derive, leaving slow fields as deferred jobs.
///
/// Deferred fields get a placeholder in `fields` so display order is stable.
pub fn plan(text: &str, config: &InspectorConfig) -> Plan {
    let classification = classify(text);
    let (fields, deferred) = match &classification {
        Classification::EventCandidate(record) => event_fields(record, config),
        Classification::SecretKeyCandidate(key) => (key_fields(key, config), Vec::new()),
        Classification::Unrecognized => (Vec::new(), Vec::new()),
    };
    Plan {
        classification,
        fields,
        deferred,
    }
}

fn event_fields(record: &EventRecord, config: &InspectorConfig) -> (Vec<Field>, Vec<Deferred>) {
    let canonical = record.canonical();
    let id = record.compute_id();
    let state = SigningState::of(record);

    let mut fields = vec![
        Field::new(labels::SERIALIZED_EVENT, canonical),
        Field::new(labels::EVENT_ID, id.to_hex()).with_hint("sha256 hash of serialized"),
    ];
    if config.nip19 {
        fields.push(Field::new(labels::NOTE, id.to_note().ok()));
    }
    fields.push(Field::new(labels::SIGNING_STATE, state.as_str()));

    let mut deferred = Vec::new();
    if state != SigningState::Signed && config.signing_key.is_some() {
        deferred.push(Deferred::Signature {
            record: record.clone(),
            key: config.signing_key.clone(),
            aux: config.aux_rand,
        });
    }
    deferred.push(Deferred::Verification(record.clone()));

    for job in &deferred {
        fields.push(Field::new(job.label(), FieldValue::Null));
    }
    (fields, deferred)
}

fn key_fields(key: &SecretKey, config: &InspectorConfig) -> Vec<Field> {
    // The format check already passed; the scalar itself may still be out of range.
    let public = derive_public(key)
        .map_err(|e| tracing::debug!(error = %e, "public key derivation failed"))
        .ok();

    let mut fields = vec![
        Field::new(labels::PRIVATE_KEY, key.to_hex()),
        Field::new(labels::PUBLIC_KEY, public.map(|pk| pk.to_hex())),
    ];
    if config.nip19 {
        fields.push(Field::new(labels::NSEC, key.to_nsec().ok()));
        fields.push(Field::new(
            labels::NPUB,
            public.and_then(|pk| pk.to_npub().ok()),
        ));
    }
    fields
}

/// The result of one full pass.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub classification: Classification,
    pub fields: Vec<Field>,
}

impl Inspection {
    /// Look up a field by label.
    pub fn field(&self, label: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.label == label).map(|f| &f.value)
    }
}

/// Run a full pass, resolving every deferred job inline.
pub fn inspect(text: &str, config: &InspectorConfig) -> Inspection {
    let Plan {
        classification,
        mut fields,
        deferred,
    } = plan(text, config);

    for job in deferred {
        let resolved = job.resolve();
        if let Some(slot) = fields.iter_mut().find(|f| f.label == resolved.label) {
            *slot = resolved;
        }
    }

    Inspection {
        classification,
        fields,
    }
}

/// Entry point bundling a configuration.
#[derive(Debug, Clone, Default)]
pub struct Inspector {
    config: InspectorConfig,
}

impl Inspector {
    pub fn new(config: InspectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Run a full synchronous pass.
    pub fn inspect(&self, text: &str) -> Inspection {
        inspect(text, &self.config)
    }

    /// Open a session that runs slow derivations in the background.
    pub fn session(&self) -> crate::Session {
        crate::Session::new(self.config.clone())
    }

    /// Strictly verify pasted event JSON, reporting why it fails.
    pub fn check(&self, text: &str) -> Result<EventRecord> {
        let record = expect_event(text)?;
        knife_core::check_event(&record)?;
        Ok(record)
    }

    /// Sign pasted event JSON with the configured key.
    pub fn sign_event(&self, text: &str) -> Result<EventRecord> {
        let record = expect_event(text)?;
        let key = self
            .config
            .signing_key
            .as_ref()
            .ok_or(KnifeError::MissingSigningKey)?;
        let keypair = Keypair::from_secret(key)?;
        Ok(record.finalize(&keypair, self.config.aux_rand)?)
    }
}

fn expect_event(text: &str) -> Result<EventRecord> {
    match classify(text) {
        Classification::EventCandidate(record) => Ok(record),
        _ => Err(KnifeError::Unrecognized),
    }
}
