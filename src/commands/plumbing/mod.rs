//! Plumbing commands (low-level Git operations)
//!
//! ## Commands
//!
//! - `hash-object`: Compute a blob id and optionally store the blob
//! - `cat-file`: Inspect a stored object
//! - `update-index`: Stage, unstage and refresh index entries
//! - `ls-files`: List tracked paths
//! - `show-index`: Dump the decoded index file

pub mod cat_file;
pub mod hash_object;
pub mod ls_files;
pub mod show_index;
pub mod update_index;
