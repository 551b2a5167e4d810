//! Manifest codec for `sql.txt`.
//!
//! The manifest lists one signature per line in catalog order:
//!
//! ```text
//! 3/Signatures/A/Work
//! 7/Signatures/B/Home
//! ```
//!
//! Writing always replaces the whole file. Reading is lazy: restore pulls one
//! record at a time and can start copying before the rest is parsed.

mod codec;

pub use codec::{MANIFEST_FILE_NAME, ManifestReader, encode, read_manifest, write_manifest};
