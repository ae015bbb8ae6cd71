//! Cryptographic primitives: SHA-256 hashing and BIP-340 Schnorr over secp256k1.
//!
//! Wraps `sha2` and `k256` with strong types. Every value here is bit-exact
//! with NIP-01: event ids are SHA-256 of the canonical serialization, public
//! keys are 32-byte x-only keys, signatures are 64-byte BIP-340 signatures
//! over the 32-byte event id.

use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::schnorr::{SigningKey, VerifyingKey};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CoreError;
use crate::types::{decode_hex_array, EventId};

/// Number of hex characters in an externally represented secret key.
pub const SECRET_KEY_HEX_LEN: usize = 64;

/// A 32-byte SHA-256 hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sha256Hash(pub [u8; 32]);

impl Sha256Hash {
    /// Compute the SHA-256 hash of data.
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha256({}...)", &self.to_hex()[..16])
    }
}

impl From<Sha256Hash> for EventId {
    fn from(hash: Sha256Hash) -> Self {
        EventId(hash.0)
    }
}

/// Hash a canonical serialization into its content address.
pub fn hash(canonical: &str) -> Sha256Hash {
    Sha256Hash::hash(canonical.as_bytes())
}

/// A 32-byte x-only secp256k1 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
    /// Create from raw bytes. The bytes are not checked against the curve.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        decode_hex_array::<32>("pubkey", s).map(Self)
    }

    /// Verify a BIP-340 signature over an event id.
    pub fn verify(&self, id: &EventId, signature: &Signature) -> Result<(), CoreError> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| CoreError::InvalidPublicKey)?;
        let sig = k256::schnorr::Signature::try_from(&signature.0[..])
            .map_err(|_| CoreError::InvalidSignature)?;

        // The id is already a SHA-256 digest; it is signed as-is.
        verifying_key
            .verify_prehash(id.as_bytes(), &sig)
            .map_err(|_| CoreError::InvalidSignature)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A 64-byte BIP-340 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        decode_hex_array::<64>("sig", s).map(Self)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sig({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Auxiliary randomness fed into BIP-340 nonce generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuxRand {
    /// Fresh random bytes per signature.
    #[default]
    Random,
    /// All-zero bytes. Signatures become reproducible.
    Zero,
}

impl AuxRand {
    fn bytes(self) -> [u8; 32] {
        let mut aux = [0u8; 32];
        if self == AuxRand::Random {
            rand::thread_rng().fill_bytes(&mut aux);
        }
        aux
    }
}

/// Syntactic secret key check: exactly 64 hex characters after case folding.
///
/// Says nothing about whether the value is a valid curve scalar.
pub fn is_valid_format(text: &str) -> bool {
    let folded = text.to_lowercase();
    folded.len() == SECRET_KEY_HEX_LEN
        && folded
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// A 32-byte secret key. Zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; 32]);

impl SecretKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse the external representation. Fails unless [`is_valid_format`] holds.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        if !is_valid_format(s) {
            return Err(CoreError::InvalidSecretKey);
        }
        decode_hex_array::<32>("secret key", s).map(Self)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// Derive the x-only public key for a secret key.
///
/// Fails when the bytes are not a valid scalar (zero, or not below the curve order).
pub fn derive_public(secret: &SecretKey) -> Result<PublicKey, CoreError> {
    Keypair::from_secret(secret).map(|kp| kp.public_key())
}

/// Sign an event id. Any missing input or signing failure yields `None`.
pub fn sign(digest: Option<&EventId>, secret: Option<&SecretKey>, aux: AuxRand) -> Option<Signature> {
    let (digest, secret) = (digest?, secret?);
    match Keypair::from_secret(secret).and_then(|kp| kp.sign(digest, aux)) {
        Ok(sig) => Some(sig),
        Err(e) => {
            tracing::debug!(error = %e, "signing failed");
            None
        }
    }
}

/// A keypair for signing events.
///
/// This wraps k256's schnorr SigningKey.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::random(&mut rng);
        Self { signing_key }
    }

    /// Create from a secret key.
    pub fn from_secret(secret: &SecretKey) -> Result<Self, CoreError> {
        let signing_key =
            SigningKey::from_bytes(secret.as_bytes()).map_err(|_| CoreError::InvalidSecretKey)?;
        Ok(Self { signing_key })
    }

    /// Get the x-only public key.
    pub fn public_key(&self) -> PublicKey {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.signing_key.verifying_key().to_bytes());
        PublicKey(out)
    }

    /// The 33-byte compressed public key in hex, prefixed `02` or `03` by parity.
    pub fn public_key_with_parity(&self) -> Result<String, CoreError> {
        let secret = k256::SecretKey::from_slice(&self.signing_key.to_bytes())
            .map_err(|_| CoreError::InvalidSecretKey)?;
        let point = secret.public_key().to_encoded_point(true);
        Ok(hex::encode(point.as_bytes()))
    }

    /// Get the secret key.
    pub fn secret_key(&self) -> SecretKey {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.signing_key.to_bytes());
        SecretKey(out)
    }

    /// Sign an event id.
    pub fn sign(&self, id: &EventId, aux: AuxRand) -> Result<Signature, CoreError> {
        let sig = self
            .signing_key
            .sign_raw(id.as_bytes(), &aux.bytes())
            .map_err(|_| CoreError::InvalidSignature)?;
        let mut out = [0u8; 64];
        out.copy_from_slice(&sig.to_bytes()[..]);
        Ok(Signature(out))
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.public_key())
    }
}
