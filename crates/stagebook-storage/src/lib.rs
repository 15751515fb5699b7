//! Temporary upload storage on local disk.
//!
//! Staged files live only for the duration of one request: they are written
//! during multipart extraction, read once when attached to the notification
//! email, and deleted afterwards.

pub mod temp;

pub use temp::{StagedFile, StorageError, StorageResult, TempStore};
