//! File metadata stored in index entries
//!
//! Holds the stat information the index records for a path so that changes
//! can be spotted without reading content. Every field is persisted as a
//! big-endian `u32`; wider OS values keep their low 32 bits.
//!
//! ## Timestamps
//!
//! - `ctime`: status change time (inode modification)
//! - `mtime`: content modification time
//!
//! Both carry a separate nanosecond part.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::errors::{IndexError, IndexResult};
use byteorder::{ByteOrder, NetworkEndian, WriteBytesExt};
use derive_new::new;
use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

/// Size of the ten stat fields in bytes
pub const METADATA_SIZE: usize = 40;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, new)]
pub struct EntryMetadata {
    pub ctime: u32,
    pub ctime_nsec: u32,
    pub mtime: u32,
    pub mtime_nsec: u32,
    pub dev: u32,
    pub ino: u32,
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub size: u32,
}

impl EntryMetadata {
    /// Synthetic metadata for content registered without a workspace file
    pub fn from_cache_info(mode: u32) -> Self {
        EntryMetadata {
            mode,
            ..Default::default()
        }
    }

    pub fn decode(bytes: &[u8]) -> IndexResult<Self> {
        if bytes.len() < METADATA_SIZE {
            return Err(IndexError::malformed(format!(
                "expected {METADATA_SIZE} metadata bytes, found {}",
                bytes.len()
            )));
        }

        let mut fields = [0u32; METADATA_SIZE / 4];
        NetworkEndian::read_u32_into(&bytes[..METADATA_SIZE], &mut fields);
        let [ctime, ctime_nsec, mtime, mtime_nsec, dev, ino, mode, uid, gid, size] = fields;

        Ok(EntryMetadata {
            ctime,
            ctime_nsec,
            mtime,
            mtime_nsec,
            dev,
            ino,
            mode,
            uid,
            gid,
            size,
        })
    }

    pub fn encode_to(&self, bytes: &mut Vec<u8>) -> IndexResult<()> {
        for field in [
            self.ctime,
            self.ctime_nsec,
            self.mtime,
            self.mtime_nsec,
            self.dev,
            self.ino,
            self.mode,
            self.uid,
            self.gid,
            self.size,
        ] {
            bytes.write_u32::<NetworkEndian>(field)?;
        }

        Ok(())
    }

    pub fn times_match(&self, other: &EntryMetadata) -> bool {
        self.ctime == other.ctime
            && self.ctime_nsec == other.ctime_nsec
            && self.mtime == other.mtime
            && self.mtime_nsec == other.mtime_nsec
    }
}

impl TryFrom<(&Path, Metadata)> for EntryMetadata {
    type Error = IndexError;

    fn try_from((file_path, metadata): (&Path, Metadata)) -> IndexResult<Self> {
        if metadata.is_dir() {
            return Err(IndexError::staging(format!(
                "{} is a directory",
                file_path.display()
            )));
        }

        let mode = EntryMode::from_metadata(file_path, &metadata);

        Ok(Self {
            ctime: metadata.ctime() as u32,
            ctime_nsec: metadata.ctime_nsec() as u32,
            mtime: metadata.mtime() as u32,
            mtime_nsec: metadata.mtime_nsec() as u32,
            dev: metadata.dev() as u32,
            ino: metadata.ino() as u32,
            mode: mode.as_u32(),
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size() as u32,
        })
    }
}
