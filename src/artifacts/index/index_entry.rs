//! Index entry representation
//!
//! Each entry in the index represents a tracked path with:
//! - File metadata (mode, size, timestamps, ...)
//! - Content hash (object ID)
//! - Flags, and extended flags when the extended bit is set
//! - The repository-relative name
//!
//! ## Entry Format
//!
//! ```text
//!   40 bytes  metadata (ten big-endian u32 fields)
//!   20 bytes  raw object id
//!    2 bytes  flags
//!  [ 2 bytes  extended flags ]
//!    n bytes  name, then a NUL
//!             NUL padding up to the next multiple of 8
//! ```
//!
//! When the name is 4095 bytes or longer the flags only carry the `0xFFF`
//! marker and the name is read up to its terminator instead.

use crate::artifacts::index::ENTRY_BLOCK;
use crate::artifacts::index::entry_flags::{EntryFlags, FLAGS_SIZE};
use crate::artifacts::index::entry_metadata::{EntryMetadata, METADATA_SIZE};
use crate::artifacts::objects::RAW_OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::hash_content;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{IndexError, IndexResult};
use byteorder::{ByteOrder, NetworkEndian, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Size of an entry up to (not including) the optional extended flags
pub const ENTRY_FIXED_SIZE: usize = METADATA_SIZE + RAW_OBJECT_ID_LENGTH + FLAGS_SIZE;

const EXTENDED_FLAGS_SIZE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    pub metadata: EntryMetadata,
    pub oid: ObjectId,
    pub flags: EntryFlags,
    /// Raw extended flags, present exactly when `flags.extended` is set
    pub extended_flags: Option<u16>,
    /// Path relative to the repository root, `/`-separated
    pub name: String,
}

impl IndexEntry {
    /// Build an entry from a live workspace file
    ///
    /// `path` is the absolute location of the file, `name` the name it is
    /// tracked under.
    pub fn from_path(path: &Path, name: &str) -> IndexResult<Self> {
        let stat = std::fs::symlink_metadata(path)
            .map_err(|_| IndexError::PathNotFound(path.to_path_buf()))?;
        let content = if stat.file_type().is_symlink() {
            let target = std::fs::read_link(path)?;
            target.as_os_str().as_bytes().to_vec()
        } else {
            std::fs::read(path)?
        };

        let metadata = EntryMetadata::try_from((path, stat))?;
        let (_, oid) = hash_content(&ObjectType::Blob, &content);

        Ok(IndexEntry::new(
            metadata,
            oid,
            EntryFlags::for_name(name),
            None,
            name.to_string(),
        ))
    }

    /// Build an entry for content that need not exist in the workspace
    pub fn from_cache_info(mode: u32, oid: ObjectId, name: &str) -> Self {
        IndexEntry::new(
            EntryMetadata::from_cache_info(mode),
            oid,
            EntryFlags::for_name(name),
            None,
            name.to_string(),
        )
    }

    /// Decode one entry from the front of `bytes`
    ///
    /// Returns the entry and whatever follows its padding.
    pub fn decode(bytes: &[u8]) -> IndexResult<(Self, &[u8])> {
        if bytes.len() < ENTRY_FIXED_SIZE {
            return Err(IndexError::malformed(format!(
                "entry needs at least {ENTRY_FIXED_SIZE} bytes, found {}",
                bytes.len()
            )));
        }

        let metadata = EntryMetadata::decode(&bytes[..METADATA_SIZE])?;

        let mut raw_oid = [0u8; RAW_OBJECT_ID_LENGTH];
        raw_oid.copy_from_slice(&bytes[METADATA_SIZE..METADATA_SIZE + RAW_OBJECT_ID_LENGTH]);
        let oid = ObjectId::from_raw(&raw_oid);

        let flags = EntryFlags::decode(&bytes[METADATA_SIZE + RAW_OBJECT_ID_LENGTH..])?;
        let mut offset = ENTRY_FIXED_SIZE;

        let extended_flags = if flags.extended {
            let extended = bytes
                .get(offset..offset + EXTENDED_FLAGS_SIZE)
                .ok_or_else(|| IndexError::malformed("truncated extended flags"))?;
            offset += EXTENDED_FLAGS_SIZE;
            Some(NetworkEndian::read_u16(extended))
        } else {
            None
        };

        let (name, consumed) = Self::decode_name(&bytes[offset..], &flags)?;
        offset += consumed;

        let padded = padded_len(offset);
        if bytes.len() < padded {
            return Err(IndexError::malformed(format!(
                "truncated padding after entry {name}"
            )));
        }

        let entry = IndexEntry {
            metadata,
            oid,
            flags,
            extended_flags,
            name,
        };

        Ok((entry, &bytes[padded..]))
    }

    /// Read the name and its terminator, returning the bytes consumed
    fn decode_name(bytes: &[u8], flags: &EntryFlags) -> IndexResult<(String, usize)> {
        let name_length = if flags.has_long_name() {
            bytes
                .iter()
                .position(|&b| b == 0)
                .ok_or_else(|| IndexError::malformed("missing NUL terminator after long name"))?
        } else {
            let name_length = usize::from(flags.name_length);
            match bytes.get(name_length) {
                Some(0) => name_length,
                Some(_) => {
                    return Err(IndexError::malformed(format!(
                        "expected NUL terminator after {name_length} name bytes"
                    )));
                }
                None => return Err(IndexError::malformed("truncated entry name")),
            }
        };

        let name = std::str::from_utf8(&bytes[..name_length])
            .map_err(|_| IndexError::malformed("entry name is not valid UTF-8"))?;

        Ok((name.to_string(), name_length + 1))
    }

    pub fn encode(&self) -> IndexResult<Bytes> {
        let mut entry_bytes = Vec::with_capacity(padded_len(ENTRY_FIXED_SIZE + self.name.len()));

        self.metadata.encode_to(&mut entry_bytes)?;
        entry_bytes.extend_from_slice(&self.oid.to_raw());
        entry_bytes.extend_from_slice(&self.flags.encode());
        if self.flags.extended {
            entry_bytes.write_u16::<NetworkEndian>(self.extended_flags.unwrap_or_default())?;
        }
        entry_bytes.extend_from_slice(self.name.as_bytes());

        // There must be at least one null byte at the end
        entry_bytes.push(0);
        entry_bytes.resize(padded_len(entry_bytes.len()), 0);

        Ok(Bytes::from(entry_bytes))
    }
}

/// Round a length up to the next multiple of `ENTRY_BLOCK`
fn padded_len(len: usize) -> usize {
    len.div_ceil(ENTRY_BLOCK) * ENTRY_BLOCK
}
