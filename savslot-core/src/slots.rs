/// Numbered save-slot file i/o
///
/// One slot maps to exactly one file, `<base>/save_slot<N>.sav`: raw
/// encrypted bytes, no header, no magic number, no version tag. I/O is
/// synchronous whole-buffer reads and writes; there is no file locking,
/// so concurrent writers on the same slot are out of scope.
use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::{self, CipherConfig, CipherMode, Record};
use crate::error::SaveError;

/// File backing a slot: `<base>/save_slot<index>.sav`.
pub fn slot_path(base: &Path, slot: u32) -> PathBuf {
    base.join(format!("save_slot{slot}.sav"))
}

/// Serializes, encrypts and writes a record to a slot file,
/// creating or truncating it.
pub fn save_to_slot(
    record: &Record,
    slot: u32,
    mode: CipherMode,
    config: &CipherConfig,
    base: &Path,
) -> Result<(), SaveError> {
    let path = slot_path(base, slot);
    let plain = codec::serialize(record)?;
    let cipher = codec::encrypt(&plain, mode, config)?;
    fs::write(&path, &cipher)?;
    log::info!("saved {} bytes ({mode}) to {}", cipher.len(), path.display());
    Ok(())
}

/// Reads, decrypts and deserializes a record from a slot file.
///
/// A missing file is an `Io` error. A file that decrypts and parses to an
/// empty object is `EmptyOrCorruptSave` rather than a valid-looking empty
/// record, so callers can tell "no save" from "broken save".
pub fn load_from_slot(
    slot: u32,
    mode: CipherMode,
    config: &CipherConfig,
    base: &Path,
) -> Result<Record, SaveError> {
    let path = slot_path(base, slot);
    let cipher = fs::read(&path)?;
    log::debug!("read {} bytes from {}", cipher.len(), path.display());

    let plain = codec::decrypt(&cipher, mode, config)?;
    let record = codec::deserialize(&plain)?;
    if record.is_empty() {
        log::warn!("slot {slot} decoded to an empty record");
        return Err(SaveError::EmptyOrCorruptSave);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_config() -> CipherConfig {
        CipherConfig::new(12345, *b"My secret key!!!", *b"My secret iv!!!!")
    }

    fn sample_record() -> Record {
        let mut record = Record::new();
        record.insert("level".into(), json!(3));
        record.insert("name".into(), json!("Aria"));
        record
    }

    #[test]
    fn test_slot_path_format() {
        assert_eq!(
            slot_path(Path::new("/tmp/saves"), 3),
            Path::new("/tmp/saves/save_slot3.sav")
        );
    }

    #[test]
    fn test_ecb_slot_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let record = sample_record();
        let config = test_config();

        save_to_slot(&record, 1, CipherMode::Ecb, &config, dir.path()).unwrap();
        assert!(dir.path().join("save_slot1.sav").exists());

        let loaded = load_from_slot(1, CipherMode::Ecb, &config, dir.path()).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_cbc_slot_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let record = sample_record();
        let config = test_config();

        save_to_slot(&record, 1, CipherMode::Cbc, &config, dir.path()).unwrap();
        let loaded = load_from_slot(1, CipherMode::Cbc, &config, dir.path()).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_xor_slot_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let record = sample_record();
        let config = test_config();

        save_to_slot(&record, 2, CipherMode::Xor, &config, dir.path()).unwrap();
        let loaded = load_from_slot(2, CipherMode::Xor, &config, dir.path()).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_saving_twice_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config();

        let mut big = Record::new();
        big.insert("history".into(), json!(vec!["entry"; 50]));
        save_to_slot(&big, 1, CipherMode::Ecb, &config, dir.path()).unwrap();

        let small = sample_record();
        save_to_slot(&small, 1, CipherMode::Ecb, &config, dir.path()).unwrap();

        let loaded = load_from_slot(1, CipherMode::Ecb, &config, dir.path()).unwrap();
        assert_eq!(loaded, small);
    }

    #[test]
    fn test_missing_slot_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from_slot(9, CipherMode::Ecb, &test_config(), dir.path());
        assert!(matches!(result, Err(SaveError::Io(_))));
    }

    #[test]
    fn test_truncated_slot_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config();
        save_to_slot(&sample_record(), 1, CipherMode::Ecb, &config, dir.path()).unwrap();

        // Chop one byte off the ciphertext
        let path = slot_path(dir.path(), 1);
        let mut bytes = fs::read(&path).unwrap();
        bytes.pop();
        fs::write(&path, &bytes).unwrap();

        let result = load_from_slot(1, CipherMode::Ecb, &config, dir.path());
        assert!(matches!(
            result,
            Err(SaveError::Crypto(_)) | Err(SaveError::Parse(_))
        ));
    }

    #[test]
    fn test_wrong_key_fails_rather_than_returning_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config();
        save_to_slot(&sample_record(), 1, CipherMode::Ecb, &config, dir.path()).unwrap();

        let wrong = CipherConfig::new(0, *b"Other secret!!!!", *b"My secret iv!!!!");
        assert!(load_from_slot(1, CipherMode::Ecb, &wrong, dir.path()).is_err());
    }

    #[test]
    fn test_empty_record_is_reported_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config();
        save_to_slot(&Record::new(), 1, CipherMode::Ecb, &config, dir.path()).unwrap();

        let result = load_from_slot(1, CipherMode::Ecb, &config, dir.path());
        assert!(matches!(result, Err(SaveError::EmptyOrCorruptSave)));
    }
}
