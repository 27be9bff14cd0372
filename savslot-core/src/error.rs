/// Error taxonomy for the save codec
use thiserror::Error;

/// Everything the codec can fail with. All failures propagate to the
/// caller; there are no retries and no partial recovery inside the codec.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Slot file missing, unreadable or unwritable.
    #[error("save file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// Payload is not valid JSON, or its top level is not an object.
    #[error("malformed save payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// Bad key/IV material, or a ciphertext the mode cannot process.
    #[error("cipher error: {0}")]
    Crypto(String),

    /// The payload decrypted and parsed, but the result was empty or null.
    ///
    /// Distinct from `Io` (file absent): the slot file exists but holds
    /// nothing usable, typically a wrong key/mode or a truncated write.
    #[error("save decoded to an empty or null record")]
    EmptyOrCorruptSave,
}
