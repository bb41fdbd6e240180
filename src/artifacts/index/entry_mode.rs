use crate::errors::{IndexError, IndexResult};
use is_executable::IsExecutable;
use std::fs::Metadata;
use std::path::Path;

/// Normalized mode recorded for a live workspace file
#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd)]
pub enum EntryMode {
    #[default]
    Regular,
    Executable,
    Symlink,
}

impl EntryMode {
    pub fn as_u32(&self) -> u32 {
        match self {
            EntryMode::Regular => 0o100644,
            EntryMode::Executable => 0o100755,
            EntryMode::Symlink => 0o120000,
        }
    }

    /// Classify a file from its `lstat` metadata
    pub fn from_metadata(path: &Path, metadata: &Metadata) -> Self {
        if metadata.file_type().is_symlink() {
            EntryMode::Symlink
        } else if path.is_executable() {
            EntryMode::Executable
        } else {
            EntryMode::Regular
        }
    }

    /// Parse a raw octal mode such as `100644`
    ///
    /// Any octal value that fits in 32 bits is accepted, so modes this tool
    /// never produces itself (gitlinks, say) can still be registered.
    pub fn parse_octal(mode: &str) -> IndexResult<u32> {
        if mode.is_empty() {
            return Err(IndexError::InvalidMode(mode.to_string()));
        }

        u32::from_str_radix(mode, 8).map_err(|_| IndexError::InvalidMode(mode.to_string()))
    }
}

impl From<EntryMode> for u32 {
    fn from(mode: EntryMode) -> Self {
        mode.as_u32()
    }
}
