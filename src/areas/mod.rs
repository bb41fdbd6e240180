//! Core repository components
//!
//! - `database`: Object database storing compressed blobs
//! - `index`: Staging area (index/cache) and its mutations
//! - `repository`: Repository discovery and coordination of the areas
//! - `workspace`: Working directory access and path naming

pub mod database;
pub mod index;
pub mod repository;
pub mod workspace;
