//! Command implementations
//!
//! Commands are `impl Repository` blocks, split the way git splits them:
//!
//! - `plumbing`: Low-level commands working on objects and the index
//!   (hash-object, cat-file, update-index, ls-files, show-index)
//! - `porcelain`: User-facing commands (init)

pub mod plumbing;
pub mod porcelain;
