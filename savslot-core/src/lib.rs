//! core functionality for encrypting, decrypting and storing
//! JSON save records in numbered slot files
//!
//! # Modules
//!
//! - `crypto`: XOR, zero padding and AES-128 ECB/CBC byte transforms
//! - `codec`: record serialization and cipher mode dispatch
//! - `slots`: numbered save-slot file i/o (`save_slot<N>.sav`)
//! - `json`: plain (unencrypted) JSON file helpers
//! - `error`: the `SaveError` taxonomy

pub mod codec;
pub mod crypto;
pub mod error;
pub mod json;
pub mod slots;

// Re-export commonly used items
pub use codec::{CipherConfig, CipherMode, Record, decrypt, deserialize, encrypt, serialize};
pub use error::SaveError;
pub use slots::{load_from_slot, save_to_slot, slot_path};
