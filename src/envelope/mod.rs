//! Self-describing storage format for encrypted secrets.
//!
//! ```json
//! {
//!   "metadata": { "version": "...", "algorithm": "...", "kdf": "...",
//!                 "iterations": "...", "salt": "...", "timestamp": "..." },
//!   "encrypted_data": "<token, base64>"
//! }
//! ```

mod codec;
mod metadata;

pub use codec::{decode, encode, Envelope};
pub use metadata::Metadata;
