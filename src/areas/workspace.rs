//! Working tree access
//!
//! Reads workspace files and translates between absolute paths and the
//! `/`-separated, root-relative names the index stores.

use crate::artifacts::objects::blob::Blob;
use crate::errors::{IndexError, IndexResult};
use anyhow::Context;
use bytes::Bytes;
use std::os::unix::ffi::OsStrExt;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute location of a root-relative name
    pub fn resolve(&self, name: impl AsRef<Path>) -> PathBuf {
        normalize(&self.path.join(name))
    }

    /// Root-relative, `/`-separated name of an absolute path
    pub fn relative_name(&self, path: &Path) -> IndexResult<String> {
        let path = normalize(path);
        let relative = path.strip_prefix(&self.path).map_err(|_| {
            IndexError::staging(format!("{}: outside repository", path.display()))
        })?;

        let components = relative
            .components()
            .map(|component| {
                component.as_os_str().to_str().ok_or_else(|| {
                    IndexError::staging(format!("{}: path is not valid UTF-8", path.display()))
                })
            })
            .collect::<IndexResult<Vec<_>>>()?;

        if components.is_empty() {
            return Err(IndexError::staging(format!(
                "{}: is the repository root",
                path.display()
            )));
        }

        Ok(components.join("/"))
    }

    /// Whether anything, including a dangling symlink, sits at `path`
    pub fn exists(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_path);
        let metadata = std::fs::symlink_metadata(&file_path)
            .with_context(|| format!("Failed to stat {}", file_path.display()))?;

        // symlinks are stored as the text of their target
        let content = if metadata.file_type().is_symlink() {
            let target = std::fs::read_link(&file_path)?;
            target.as_os_str().as_bytes().to_vec()
        } else {
            std::fs::read(&file_path)
                .with_context(|| format!("Failed to read {}", file_path.display()))?
        };

        Ok(Bytes::from(content))
    }

    pub fn parse_blob(&self, file_path: &Path) -> anyhow::Result<Blob> {
        let data = self.read_file(file_path)?;
        Ok(Blob::new(data))
    }
}

/// Lexically resolve `.` and `..` without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}
