//! # Storage Module
//!
//! Persistence for the care tracker. Everything is stored as four JSON
//! records in a local key-value store; the backend behind the store can be
//! swapped without touching the domain layer.
//!
//! ## Backends
//!
//! - **SQLite** ([`DbConnection`]): one `records` table, via SQLx
//! - **JSON files** ([`JsonFileConnection`]): one `<key>.json` file per record

pub mod db;
pub mod json_files;
pub mod record_store;
pub mod traits;

pub use db::DbConnection;
pub use json_files::JsonFileConnection;
pub use record_store::{Record, RecordKey, RecordStore};
pub use traits::RecordStorage;
