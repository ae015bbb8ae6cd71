//! NIP-19 bech32 display encodings for 32-byte entities.

use bech32::{Bech32, Hrp};

use crate::crypto::{PublicKey, SecretKey};
use crate::error::CoreError;
use crate::types::EventId;

/// Prefix for public keys.
pub const NPUB: &str = "npub";
/// Prefix for secret keys.
pub const NSEC: &str = "nsec";
/// Prefix for event ids.
pub const NOTE: &str = "note";

/// Encode 32 bytes under the given prefix.
pub fn encode(hrp: &str, data: &[u8; 32]) -> Result<String, CoreError> {
    let hrp = Hrp::parse(hrp).map_err(|e| CoreError::Bech32(e.to_string()))?;
    bech32::encode::<Bech32>(hrp, data).map_err(|e| CoreError::Bech32(e.to_string()))
}

/// Decode a bech32 string, requiring the given prefix and a 32-byte payload.
pub fn decode(expected_hrp: &str, encoded: &str) -> Result<[u8; 32], CoreError> {
    let expected = Hrp::parse(expected_hrp).map_err(|e| CoreError::Bech32(e.to_string()))?;
    let (hrp, data) = bech32::decode(encoded).map_err(|e| CoreError::Bech32(e.to_string()))?;

    if hrp != expected {
        return Err(CoreError::UnexpectedPrefix {
            expected: expected_hrp.to_string(),
            got: hrp.to_string(),
        });
    }

    data.as_slice()
        .try_into()
        .map_err(|_| CoreError::Bech32(format!("expected 32 bytes, got {}", data.len())))
}

impl PublicKey {
    /// `npub1...` form.
    pub fn to_npub(&self) -> Result<String, CoreError> {
        encode(NPUB, &self.0)
    }

    /// Parse an `npub1...` string.
    pub fn from_npub(s: &str) -> Result<Self, CoreError> {
        decode(NPUB, s).map(Self)
    }
}

impl SecretKey {
    /// `nsec1...` form.
    pub fn to_nsec(&self) -> Result<String, CoreError> {
        encode(NSEC, self.as_bytes())
    }

    /// Parse an `nsec1...` string.
    pub fn from_nsec(s: &str) -> Result<Self, CoreError> {
        decode(NSEC, s).map(Self::from_bytes)
    }

    /// Parse either 64 hex characters or an `nsec1...` string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if s.starts_with(NSEC) {
            Self::from_nsec(s)
        } else {
            Self::from_hex(s)
        }
    }
}

impl EventId {
    /// `note1...` form.
    pub fn to_note(&self) -> Result<String, CoreError> {
        encode(NOTE, &self.0)
    }
}
