//! Proptest generators for property-based testing.

use proptest::prelude::*;

use knife_core::{EventBuilder, EventRecord, Keypair, PublicKey, SecretKey};

/// Generate a secret key that is a valid curve scalar.
pub fn secret_key() -> impl Strategy<Value = SecretKey> {
    any::<[u8; 32]>()
        .prop_filter("valid secp256k1 scalar", |bytes| {
            Keypair::from_secret(&SecretKey::from_bytes(*bytes)).is_ok()
        })
        .prop_map(SecretKey::from_bytes)
}

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_filter_map("valid secp256k1 scalar", |bytes| {
        Keypair::from_secret(&SecretKey::from_bytes(bytes)).ok()
    })
}

/// Generate a random x-only public key.
pub fn public_key() -> impl Strategy<Value = PublicKey> {
    keypair().prop_map(|kp| kp.public_key())
}

/// Generate a protocol kind. Kind 0 is excluded; pasted objects with kind 0
/// never classify as events.
pub fn kind() -> impl Strategy<Value = u64> {
    1u64..=65_535u64
}

/// Generate a reasonable timestamp in unix seconds.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=4_102_444_800i64
}

/// Generate non-empty content, including characters that need JSON escaping.
pub fn content() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{1,64}",
        "[a-z \"\\\\\n\t\r]{1,16}",
        Just("\u{0000}\u{001f}\u{2028}".to_string()),
    ]
}

/// Generate a single tag.
pub fn tag() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9:\"]{0,12}", 1..=3)
}

/// Generate a tag list.
pub fn tags(max_len: usize) -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(tag(), 0..=max_len)
}

/// Parameters for generating an event.
#[derive(Debug, Clone)]
pub struct EventParams {
    pub keypair: Keypair,
    pub kind: u64,
    pub created_at: i64,
    pub tags: Vec<Vec<String>>,
    pub content: String,
}

impl Arbitrary for EventParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (keypair(), kind(), timestamp(), tags(4), content())
            .prop_map(|(keypair, kind, created_at, tags, content)| EventParams {
                keypair,
                kind,
                created_at,
                tags,
                content,
            })
            .boxed()
    }
}

/// Build an unsigned record, with its pubkey set, from parameters.
pub fn record_from_params(params: &EventParams) -> EventRecord {
    let mut builder = EventBuilder::new(params.kind)
        .content(params.content.clone())
        .created_at(params.created_at)
        .pubkey(&params.keypair.public_key());
    for tag in &params.tags {
        builder = builder.tag(tag.iter().cloned());
    }
    builder.build()
}
