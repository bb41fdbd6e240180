//! Index (staging area)
//!
//! The index records which paths make up the next snapshot, along with the
//! metadata last seen for each of them and the id of their content.
//!
//! ## Index File Format
//!
//! The index file contains:
//! - Header: Signature, version, and entry count
//! - Entries: tracked paths with metadata, sorted byte-wise by name
//! - Extensions: kept verbatim, never interpreted
//! - Checksum: SHA-1 hash of everything before it
//!
//! A checksum mismatch on load is reported as a warning only; the entries
//! are still usable as long as their framing parses.
//!
//! Entries are kept in a plain vector and looked up by a linear scan. A
//! command loads the index once, applies a handful of mutations and writes it
//! back, so there is no secondary lookup structure to keep in sync.

use crate::areas::workspace::Workspace;
use crate::artifacts::index::checksum::{self, Checksum};
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{CHECKSUM_SIZE, HEADER_SIZE, VERSION};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IndexError, IndexResult};
use bytes::Bytes;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug)]
pub struct Index {
    /// Path to the index file (typically `.git/index`)
    path: Box<Path>,
    /// Resolves entry names against the repository root
    workspace: Workspace,
    header: IndexHeader,
    /// Tracked entries, in file order
    entries: Vec<IndexEntry>,
    /// Extension blocks that followed the entries, kept verbatim
    extensions: Bytes,
    /// Checksum read from disk, or written by the last encode
    checksum: [u8; CHECKSUM_SIZE],
    /// Set when the stored checksum did not match the content
    checksum_warning: Option<IndexError>,
}

impl Index {
    pub fn new(path: Box<Path>, workspace: Workspace) -> Self {
        Index {
            path,
            workspace,
            header: IndexHeader::empty(),
            entries: Vec::new(),
            extensions: Bytes::new(),
            checksum: [0; CHECKSUM_SIZE],
            checksum_warning: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> u32 {
        self.header.version
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn extensions(&self) -> &[u8] {
        &self.extensions
    }

    pub fn checksum(&self) -> ObjectId {
        ObjectId::from_raw(&self.checksum)
    }

    /// The checksum mismatch found by the last load, if any
    pub fn checksum_warning(&self) -> Option<&IndexError> {
        self.checksum_warning.as_ref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn clear(&mut self) {
        self.header = IndexHeader::empty();
        self.entries.clear();
        self.extensions = Bytes::new();
        self.checksum = [0; CHECKSUM_SIZE];
        self.checksum_warning = None;
    }

    /// Load the index from disk
    ///
    /// A missing or empty index file yields an empty index.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> IndexResult<()> {
        self.clear();

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        let mut bytes = Vec::new();
        lock.deref_mut().read_to_end(&mut bytes)?;

        if bytes.is_empty() {
            return Ok(());
        }

        self.decode(&bytes)
    }

    /// Replace the contents of this index with the decoded `bytes`
    ///
    /// Format errors leave the index untouched.
    pub fn decode(&mut self, bytes: &[u8]) -> IndexResult<()> {
        let header = self.parse_header(bytes)?;

        let mut rest = &bytes[HEADER_SIZE..];
        let mut entries = Vec::new();
        for _ in 0..header.entries_count {
            let (entry, remaining) = IndexEntry::decode(rest)?;
            entries.push(entry);
            rest = remaining;
        }

        if rest.len() < CHECKSUM_SIZE {
            return Err(IndexError::malformed("missing trailing checksum"));
        }
        let (extensions, stored) = rest.split_at(rest.len() - CHECKSUM_SIZE);

        let computed = checksum::compute(&bytes[..bytes.len() - CHECKSUM_SIZE]);
        let checksum_warning = if stored != computed {
            let mismatch = IndexError::ChecksumMismatch {
                stored: ObjectId::from_raw(&checksum_array(stored)).to_string(),
                computed: ObjectId::from_raw(&computed).to_string(),
            };
            tracing::warn!(index = %self.path.display(), "{mismatch}");
            Some(mismatch)
        } else {
            None
        };

        tracing::debug!(
            entries = entries.len(),
            extensions = extensions.len(),
            "decoded index"
        );

        self.header = header;
        self.entries = entries;
        self.extensions = Bytes::copy_from_slice(extensions);
        self.checksum = checksum_array(stored);
        self.checksum_warning = checksum_warning;

        Ok(())
    }

    fn parse_header(&self, bytes: &[u8]) -> IndexResult<IndexHeader> {
        let header = IndexHeader::decode(bytes)?;

        if header.version != VERSION {
            return Err(IndexError::UnsupportedVersion(header.version));
        }

        Ok(header)
    }

    /// Serialize the index, sorting the entries first
    pub fn encode(&mut self) -> IndexResult<Bytes> {
        self.sort();

        self.header = IndexHeader {
            entries_count: self.entries.len() as u32,
            ..self.header.clone()
        };

        let mut writer = Checksum::new(Vec::new());
        writer.write(&self.header.encode()?)?;

        for entry in &self.entries {
            writer.write(&entry.encode()?)?;
        }

        writer.write(&self.extensions)?;

        let (bytes, checksum) = writer.write_checksum()?;
        self.checksum = checksum;
        self.checksum_warning = None;

        Ok(Bytes::from(bytes))
    }

    /// Persist the index to disk
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the index file during writing.
    pub fn write_updates(&mut self) -> IndexResult<()> {
        let bytes = self.encode()?;

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        lock.deref_mut().write_all(&bytes)?;

        tracing::debug!(entries = self.entries.len(), "wrote index");

        Ok(())
    }

    /// Stable byte-wise sort by name
    pub fn sort(&mut self) {
        self.entries
            .sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
    }

    /// Look up an entry by the absolute path it resolves to
    pub fn lookup(&self, path: &Path) -> Option<&IndexEntry> {
        let path = self.workspace.resolve(path);

        self.entries
            .iter()
            .find(|entry| self.workspace.resolve(&entry.name) == path)
    }

    fn remove_entry(&mut self, name: &str) -> Option<IndexEntry> {
        let position = self.entries.iter().position(|entry| entry.name == name)?;
        let removed = self.entries.remove(position);

        // conflict stages share a name
        self.entries.retain(|entry| entry.name != name);

        Some(removed)
    }

    fn insert_entry(&mut self, entry: IndexEntry) -> IndexEntry {
        self.remove_entry(&entry.name);
        self.entries.push(entry.clone());
        self.sort();

        entry
    }

    /// Stage the current content of a workspace file
    pub fn add(&mut self, path: &Path) -> IndexResult<IndexEntry> {
        let name = self.workspace.relative_name(path)?;

        if !self.workspace.exists(path) {
            return Err(IndexError::staging(format!("{name}: does not exist")));
        }

        let entry = IndexEntry::from_path(path, &name)?;
        tracing::debug!(name = %entry.name, oid = %entry.oid, "add");

        Ok(self.insert_entry(entry))
    }

    /// Restage a file that is already tracked
    pub fn update(&mut self, path: &Path) -> IndexResult<IndexEntry> {
        if self.lookup(path).is_none() {
            let name = self.workspace.relative_name(path)?;
            return Err(IndexError::staging(format!(
                "{name}: cannot add to the index - missing --add option?"
            )));
        }

        self.add(path)
    }

    /// Drop the entry for `path`, whether or not the file still exists
    pub fn force_remove(&mut self, path: &Path) -> Option<IndexEntry> {
        let name = self.lookup(path)?.name.clone();
        tracing::debug!(name = %name, "remove");

        self.remove_entry(&name)
    }

    /// Drop the entry for `path` only once the file is gone from disk
    pub fn remove(&mut self, path: &Path) -> Option<IndexEntry> {
        if self.workspace.exists(path) {
            return None;
        }

        self.force_remove(path)
    }

    /// Re-stat every entry against the workspace
    ///
    /// Entries whose content is unchanged pick up fresh stat data. The names
    /// of entries that are missing or whose content changed are returned and
    /// left as they were.
    pub fn refresh(&mut self) -> Vec<String> {
        let mut needs_update = Vec::new();

        for entry in self.entries.iter_mut() {
            let path = self.workspace.resolve(&entry.name);

            match IndexEntry::from_path(&path, &entry.name) {
                Ok(fresh) if fresh.oid == entry.oid => {
                    if !entry.metadata.times_match(&fresh.metadata) {
                        tracing::debug!(name = %entry.name, "refreshed stat data");
                    }
                    entry.metadata = fresh.metadata;
                }
                Ok(_) => needs_update.push(entry.name.clone()),
                Err(err) => {
                    tracing::debug!(name = %entry.name, error = %err, "cannot refresh");
                    needs_update.push(entry.name.clone());
                }
            }
        }

        needs_update
    }

    /// Stage an object id directly, without reading the workspace
    ///
    /// `path` is relative to the repository root.
    pub fn add_from_cache_info(
        &mut self,
        mode: &str,
        object_id: &str,
        path: &str,
    ) -> IndexResult<IndexEntry> {
        let mode = EntryMode::parse_octal(mode)?;
        let oid = ObjectId::try_parse(object_id)?;
        let name = self.workspace.relative_name(&self.workspace.resolve(path))?;

        tracing::debug!(name = %name, oid = %oid, "add from cache info");

        Ok(self.insert_entry(IndexEntry::from_cache_info(mode, oid, &name)))
    }

    /// Like [`Index::add_from_cache_info`], for a path that is already tracked
    pub fn update_from_cache_info(
        &mut self,
        mode: &str,
        object_id: &str,
        path: &str,
    ) -> IndexResult<IndexEntry> {
        let absolute_path = self.workspace.resolve(path);

        if self.lookup(&absolute_path).is_none() {
            let name = self.workspace.relative_name(&absolute_path)?;
            return Err(IndexError::staging(format!(
                "{name}: cannot add to the index - missing --add option?"
            )));
        }

        self.add_from_cache_info(mode, object_id, path)
    }
}

fn checksum_array(bytes: &[u8]) -> [u8; CHECKSUM_SIZE] {
    let mut array = [0u8; CHECKSUM_SIZE];
    array.copy_from_slice(bytes);
    array
}
