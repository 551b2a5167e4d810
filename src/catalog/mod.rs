//! Signature catalog: the `Signatures` table of a profile's Outlook database.
//!
//! # Profile Layout
//!
//! ```text
//! <profile root>/
//! ├── Outlook.sqlite            # Signatures table + sqlite_sequence
//! └── Signatures/
//!     └── <folder>/
//!         └── <name>            # signature content
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use sigsync::catalog::SignatureCatalog;
//!
//! let catalog = SignatureCatalog::open(profile_root)?;
//! for record in catalog.list_signatures()? {
//!     println!("{} -> {}", record.record_id, record.stored_path());
//! }
//! ```

mod db;
mod schema;

pub use db::{DATABASE_FILE_NAME, SignatureCatalog, database_path, list_signatures};
pub use schema::{FIELD_SEPARATOR, RecordId, SignatureRecord};
