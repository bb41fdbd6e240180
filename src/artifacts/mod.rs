//! Git data structures
//!
//! - `index`: Index file records, flags and checksums
//! - `objects`: Object ids, headers and blobs

pub mod index;
pub mod objects;
