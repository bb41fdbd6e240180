//! Object types and operations
//!
//! Content is stored as objects identified by SHA-1 hashes of their canonical
//! encoding `<type> <size>\0<content>`. This tool only writes blobs (file
//! content); the object type tag still recognizes trees and commits so that
//! objects written by git can be inspected.

pub mod blob;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const RAW_OBJECT_ID_LENGTH: usize = 20;
