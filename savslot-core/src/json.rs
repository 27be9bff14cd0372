/// Plain (unencrypted) JSON file helpers
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::codec::{self, Record};
use crate::error::SaveError;

/// Writes a record as tab-indented JSON, creating or truncating the file.
pub fn write_json_file(path: &Path, record: &Record) -> Result<(), SaveError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record.serialize(&mut ser)?;
    fs::write(path, buf)?;
    Ok(())
}

/// Reads a JSON file into a record.
///
/// A missing file yields an empty record, so callers can treat "no file
/// yet" as "no data yet". Content that exists but is not a JSON object is
/// an error.
pub fn read_json_file(path: &Path) -> Result<Record, SaveError> {
    if !path.exists() {
        return Ok(Record::new());
    }
    let bytes = fs::read(path)?;
    codec::deserialize(&bytes)
}
