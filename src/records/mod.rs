//! Product storage.
//!
//! Products live in a single insertion-ordered vector. Lookups are linear
//! scans and the first match wins, so duplicate ids are tolerated.

mod store;

pub use store::RecordStore;
