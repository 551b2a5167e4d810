//! sigsync library - backup and restore of Outlook signatures.
//!
//! A signature is a row in the profile's `Outlook.sqlite` plus a file under
//! `Signatures/`. This library keeps the two consistent while moving them
//! between a live profile and a portable backup directory.
//!
//! # Modules
//!
//! - `catalog`: the `Signatures` table (list, insert, sequence repair)
//! - `manifest`: the `sql.txt` codec
//! - `transfer`: file copies and directory creation
//! - `sync`: backup, restore and verify orchestration
//! - `config`: settings file and default paths
//! - `error`: error taxonomy with exit codes and hints
#![forbid(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod sync;
pub mod transfer;
