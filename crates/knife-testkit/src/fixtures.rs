//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a keypair plus records in each
//! signing state.

use knife_core::{AuxRand, EventBuilder, EventRecord, Keypair, PublicKey, SecretKey};

/// A test fixture holding one author's keypair.
pub struct TestFixture {
    pub keypair: Keypair,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
        }
    }

    /// Create with a deterministic keypair from a secret key.
    ///
    /// Panics if the bytes are not a valid scalar.
    pub fn with_secret(bytes: [u8; 32]) -> Self {
        let keypair = Keypair::from_secret(&SecretKey::from_bytes(bytes))
            .expect("fixture secret must be a valid scalar");
        Self { keypair }
    }

    /// Get the keypair's public key.
    pub fn public_key(&self) -> PublicKey {
        self.keypair.public_key()
    }

    /// Get the secret key as hex, the way a user would paste it.
    pub fn secret_hex(&self) -> String {
        self.keypair.secret_key().to_hex()
    }

    /// A text note with no pubkey, id or sig.
    pub fn make_unsigned(&self, content: &str) -> EventRecord {
        EventBuilder::text_note(content)
            .created_at(now_secs())
            .build()
    }

    /// A text note with pubkey and id filled in but no signature.
    pub fn make_hashed(&self, content: &str) -> EventRecord {
        EventBuilder::text_note(content)
            .created_at(now_secs())
            .hash(&self.keypair.public_key())
    }

    /// A fully signed text note.
    pub fn make_signed(&self, content: &str) -> EventRecord {
        EventBuilder::text_note(content)
            .created_at(now_secs())
            .sign(&self.keypair, AuxRand::Random)
            .expect("fixture signing cannot fail")
    }

    /// A signed note whose content was edited after signing.
    pub fn make_tampered(&self, content: &str) -> EventRecord {
        let mut record = self.make_signed(content);
        record.content.push_str(" (edited)");
        record
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            // Small nonzero scalars are always valid.
            let mut bytes = [0u8; 32];
            bytes[31] = (i % 255) as u8 + 1;
            bytes[30] = (i / 255) as u8;
            TestFixture::with_secret(bytes)
        })
        .collect()
}

/// Get current time in unix seconds.
fn now_secs() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use knife_core::{verify, SigningState};

    #[test]
    fn test_fixture_signing_states() {
        let fixture = TestFixture::new();

        assert_eq!(fixture.make_unsigned("a").signing_state(), SigningState::Unsigned);
        assert_eq!(fixture.make_hashed("b").signing_state(), SigningState::Hashed);
        assert_eq!(fixture.make_signed("c").signing_state(), SigningState::Signed);
    }

    #[test]
    fn test_fixture_verification() {
        let fixture = TestFixture::new();

        assert_eq!(verify(&fixture.make_unsigned("a")), None);
        assert_eq!(verify(&fixture.make_signed("b")), Some(true));
        assert_eq!(verify(&fixture.make_tampered("c")), Some(false));
    }

    #[test]
    fn test_hashed_id_matches_content() {
        let fixture = TestFixture::new();
        let record = fixture.make_hashed("hello");

        assert_eq!(record.id, Some(record.compute_id().to_hex()));
        assert_eq!(record.pubkey, Some(fixture.public_key().to_hex()));
    }

    #[test]
    fn test_multi_party() {
        let fixtures = multi_party_fixtures(3);
        assert_eq!(fixtures.len(), 3);

        let keys: Vec<_> = fixtures.iter().map(|f| f.public_key()).collect();
        assert_ne!(keys[0], keys[1]);
        assert_ne!(keys[1], keys[2]);

        // Each fixture's events verify under its own key only.
        let event = fixtures[0].make_signed("from zero");
        let mut forged = event.clone();
        forged.pubkey = Some(keys[1].to_hex());
        assert_eq!(verify(&event), Some(true));
        assert_eq!(verify(&forged), Some(false));
    }

    #[test]
    fn test_multi_party_deterministic() {
        let a = multi_party_fixtures(2);
        let b = multi_party_fixtures(2);
        assert_eq!(a[1].secret_hex(), b[1].secret_hex());
    }
}
