//! leadbook — the storage and query engine behind a single-tenant contact
//! dashboard: filtered/searched listing, append-only bulk insert, partial
//! row edits, tag-set arithmetic, CSV import/export, and saved filter
//! segments over an embedded SQLite store.

pub mod db;
pub mod error;
pub mod export;
pub mod import;
pub mod models;

pub use db::{FilterMap, FilterValue, Segments, Store};
pub use error::{Error, Result};
pub use models::{Contact, ContactFields, ContactPatch, Field};
