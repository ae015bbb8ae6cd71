//! Golden test vectors for bit-exact verification.
//!
//! The expected values are independent of this implementation: NIP-01 ids and
//! BIP-340 signatures must match what every other nostr implementation produces.

use knife_core::{AuxRand, EventBuilder, EventRecord, Keypair, SecretKey};
use serde::Serialize;

/// A golden event vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Secret key (hex) used to sign, with zero aux randomness.
    pub secret_key: &'static str,
    /// Expected x-only public key (hex).
    pub pubkey: &'static str,
    pub kind: u64,
    pub created_at: i64,
    pub tags: Vec<Vec<&'static str>>,
    pub content: &'static str,
    /// Expected canonical serialization.
    pub canonical: &'static str,
    /// Expected event id (hex).
    pub id: &'static str,
    /// Expected signature (hex). Empty when only the id is pinned.
    pub sig: &'static str,
}

impl GoldenVector {
    /// The unsigned record this vector describes, with its pubkey set.
    pub fn record(&self) -> EventRecord {
        let mut builder = EventBuilder::new(self.kind)
            .content(self.content)
            .created_at(self.created_at);
        for tag in &self.tags {
            builder = builder.tag(tag.iter().copied());
        }
        let mut record = builder.build();
        record.pubkey = Some(self.pubkey.to_string());
        record
    }

    /// Sign the vector's record with its secret key and zero aux randomness.
    pub fn sign(&self) -> EventRecord {
        let secret = SecretKey::from_hex(self.secret_key).expect("vector secret key is valid");
        let keypair = Keypair::from_secret(&secret).expect("vector secret key is a valid scalar");
        self.record()
            .finalize(&keypair, AuxRand::Zero)
            .expect("signing a vector cannot fail")
    }
}

/// Secret key made of 64 `a` characters.
pub const ALL_A_SECRET: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// Public key derived from [`ALL_A_SECRET`].
pub const ALL_A_PUBKEY: &str = "6a04ab98d9e4774ad806e302dddeb63bea16b5cb5f223ee77478e861bb583eb3";

/// `npub` form of [`ALL_A_PUBKEY`].
pub const ALL_A_NPUB: &str = "npub1dgz2hxxeu3m54kqxuvpdmh4k804pddwttu3raem50r5xrw6c86esxd0p6w";

/// A complete, validly signed event from the wild (secret key 2).
pub const KNOWN_SIGNED_EVENT: &str = r#"{"id":"a889df6a387419ff204305f4c2d296ee328c3cd4f8b62f205648a541b4554dfb","pubkey":"c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5","created_at":1698623783,"kind":1,"tags":[],"content":"hello from the nostr army knife","sig":"84876e1ee3e726da84e5d195eb79358b2b3eaa4d9bd38456fde3e8a2af3f1cd4cda23f23fda454869975b3688797d4c66e12f4c51c1b43c6d2997c5e61865661"}"#;

/// Get all golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "tagged note signed by the all-a key",
            secret_key: ALL_A_SECRET,
            pubkey: ALL_A_PUBKEY,
            kind: 1,
            created_at: 1_700_000_000,
            tags: vec![vec!["t", "knife"]],
            content: "hello",
            canonical: r#"[0,"6a04ab98d9e4774ad806e302dddeb63bea16b5cb5f223ee77478e861bb583eb3",1700000000,1,[["t","knife"]],"hello"]"#,
            id: "c6305badea010aed77c194e224a9a30e9df24be3749310265ff16f7e3367fb75",
            sig: "ba9b11fae45a7b19ee2d985ac530d237ee95baba30002999b0c9d00987d1bd59afb29b36501e5a3735fc5b5b8c50e15bcecae76e3603575afda75d28347667b6",
        },
        GoldenVector {
            name: "note from secret key 2",
            secret_key: "0000000000000000000000000000000000000000000000000000000000000002",
            pubkey: "c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5",
            kind: 1,
            created_at: 1_698_623_783,
            tags: vec![],
            content: "hello from the nostr army knife",
            canonical: r#"[0,"c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5",1698623783,1,[],"hello from the nostr army knife"]"#,
            id: "a889df6a387419ff204305f4c2d296ee328c3cd4f8b62f205648a541b4554dfb",
            // Signed with unknown aux randomness; only the id is pinned.
            sig: "",
        },
    ]
}

/// Check every vector. Returns `(name, matches, computed id)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let signed = v.sign();
            let id = signed.id.clone().unwrap_or_default();
            let matches = signed.canonical() == v.canonical
                && id == v.id
                && (v.sig.is_empty() || signed.sig.as_deref() == Some(v.sig));
            (v.name.to_string(), matches, id)
        })
        .collect()
}
