//! # Knife
//!
//! The unified API for inspecting pasted nostr text: classify it, then derive
//! the fields worth showing.
//!
//! ## Overview
//!
//! - **Classification**: text is an event candidate, a secret key, or nothing
//! - **Events**: canonical serialization, event id, signing state, signature checks
//! - **Keys**: public key derivation and bech32 forms
//! - **Sessions**: slow derivations run in the background and stale results are dropped
//!
//! ## Usage
//!
//! ```rust
//! use knife::{Inspector, InspectorConfig};
//!
//! let inspector = Inspector::new(InspectorConfig::default());
//! let inspection = inspector.inspect(r#"{"kind":1,"content":"hi","tags":[],"created_at":0}"#);
//!
//! for field in &inspection.fields {
//!     println!("{}: {}", field.label, field.value);
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `knife::core` - Core primitives (EventRecord, Keypair, classify, etc.)

pub mod error;
pub mod field;
pub mod inspect;
pub mod session;

pub use knife_core as core;

pub use error::{KnifeError, Result};
pub use field::{labels, Field, FieldValue};
pub use inspect::{inspect, plan, Deferred, Inspection, Inspector, InspectorConfig, Plan};
pub use session::{FieldUpdate, Generation, Session};

pub use knife_core::{
    AuxRand, Classification, EventId, EventRecord, Keypair, PublicKey, SecretKey, SigningState,
};
