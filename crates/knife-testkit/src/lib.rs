//! # Knife Testkit
//!
//! Testing utilities for knife.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known events with expected canonical forms, ids and signatures
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors pin the NIP-01 id and BIP-340 signature bit for bit:
//!
//! ```rust
//! use knife_testkit::vectors::all_vectors;
//!
//! for vector in all_vectors() {
//!     let signed = vector.sign();
//!     assert_eq!(signed.id.as_deref(), Some(vector.id));
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use knife_testkit::generators::{record_from_params, EventParams};
//!
//! proptest! {
//!     #[test]
//!     fn event_id_is_deterministic(params: EventParams) {
//!         let r1 = record_from_params(&params);
//!         let r2 = record_from_params(&params);
//!         prop_assert_eq!(r1.compute_id(), r2.compute_id());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use knife_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let event = fixture.make_signed("hello");
//! assert_eq!(knife_core::verify(&event), Some(true));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{record_from_params, EventParams};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
