//! In-process record storage for libris.
//!
//! [`Table`] keeps records in insertion order and hands out ids from its own
//! counter. [`SnapshotFile`] persists any serializable state as a JSON document.

pub mod snapshot;
pub mod table;

pub use snapshot::SnapshotFile;
pub use table::{Record, RecordId, Table};
