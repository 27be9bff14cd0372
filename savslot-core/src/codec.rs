/// Record serialization and cipher mode dispatch
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::crypto;
use crate::error::SaveError;

/// A save record: an ordered mapping from string keys to JSON values.
///
/// No schema is enforced; anything JSON-representable round-trips. Key
/// order is preserved as inserted, so serialization is deterministic for
/// a given insertion order.
pub type Record = serde_json::Map<String, Value>;

/// Transform applied to the serialized payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    /// Byte-wise XOR against the low byte of the configured integer key.
    /// Length-preserving; a key of 0 is the identity.
    Xor,
    /// AES-128 Electronic Codebook over zero-padded blocks, no IV.
    Ecb,
    /// AES-128 Cipher Block Chaining over zero-padded blocks.
    Cbc,
}

impl FromStr for CipherMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xor" => Ok(Self::Xor),
            "ecb" => Ok(Self::Ecb),
            "cbc" => Ok(Self::Cbc),
            other => Err(format!("unknown cipher mode '{other}' (expected xor, ecb or cbc)")),
        }
    }
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xor => f.write_str("xor"),
            Self::Ecb => f.write_str("ecb"),
            Self::Cbc => f.write_str("cbc"),
        }
    }
}

/// Key material for the cipher modes, supplied by the caller.
///
/// Deliberately not compiled in: a key literal baked into the binary is
/// trivially recoverable and defeats the encryption.
#[derive(Debug, Clone, Default)]
pub struct CipherConfig {
    /// XOR integer key; only the low byte participates.
    pub xor_key: u32,
    /// AES key, exactly 16 bytes for the ECB and CBC modes.
    pub key: Vec<u8>,
    /// CBC initialization vector, exactly 16 bytes.
    pub iv: Vec<u8>,
}

impl CipherConfig {
    pub fn new(xor_key: u32, key: impl Into<Vec<u8>>, iv: impl Into<Vec<u8>>) -> Self {
        Self {
            xor_key,
            key: key.into(),
            iv: iv.into(),
        }
    }
}

/// Encodes a record as compact UTF-8 JSON, no pretty-printing.
pub fn serialize(record: &Record) -> Result<Vec<u8>, SaveError> {
    Ok(serde_json::to_vec(record)?)
}

/// Decodes UTF-8 JSON bytes back into a record.
///
/// Malformed JSON or a top-level non-object is a `Parse` error; a
/// top-level `null` decoded fine but holds nothing, which is reported as
/// `EmptyOrCorruptSave`.
pub fn deserialize(bytes: &[u8]) -> Result<Record, SaveError> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Null => Err(SaveError::EmptyOrCorruptSave),
        value => Ok(serde_json::from_value(value)?),
    }
}

/// Encrypts a serialized payload under the given mode.
pub fn encrypt(data: &[u8], mode: CipherMode, config: &CipherConfig) -> Result<Vec<u8>, SaveError> {
    match mode {
        CipherMode::Xor => Ok(crypto::xor_bytes(data, config.xor_key)),
        CipherMode::Ecb => crypto::encrypt_ecb(data, &config.key),
        CipherMode::Cbc => crypto::encrypt_cbc(data, &config.key, &config.iv),
    }
}

/// Inverse of `encrypt`; the block modes unpad after decrypting.
pub fn decrypt(data: &[u8], mode: CipherMode, config: &CipherConfig) -> Result<Vec<u8>, SaveError> {
    match mode {
        CipherMode::Xor => Ok(crypto::xor_bytes(data, config.xor_key)),
        CipherMode::Ecb => crypto::decrypt_ecb(data, &config.key),
        CipherMode::Cbc => crypto::decrypt_cbc(data, &config.key, &config.iv),
    }
}
