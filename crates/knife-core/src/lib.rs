//! # Knife Core
//!
//! Pure primitives for inspecting nostr objects: canonical serialization,
//! content hashing, key derivation, signatures and input classification.
//!
//! This crate contains no I/O, no storage, no networking. It is pure computation
//! over NIP-01 data structures.
//!
//! ## Key Types
//!
//! - [`EventRecord`] - An event as pasted, with optional id/sig
//! - [`EventId`] - Content address (SHA-256 of the canonical serialization)
//! - [`SecretKey`] / [`PublicKey`] / [`Keypair`] - secp256k1 keys, x-only publics
//! - [`Classification`] - What a piece of text was recognized as
//!
//! ## Canonicalization
//!
//! Events hash and sign over the NIP-01 array form. See [`canonical`] module.

pub mod canonical;
pub mod classify;
pub mod crypto;
pub mod error;
pub mod event;
pub mod nip19;
pub mod types;
pub mod validation;

pub use canonical::{deserialize, serialize};
pub use classify::{classify, classify_with, Candidate, Classification};
pub use crypto::{
    derive_public, hash, is_valid_format, sign, AuxRand, Keypair, PublicKey, SecretKey,
    Sha256Hash, Signature,
};
pub use error::{CoreError, ValidationError};
pub use event::{finalize, EventBuilder, EventRecord, SigningState};
pub use types::EventId;
pub use validation::{check_event, verify};
