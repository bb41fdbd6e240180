use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::errors::{IndexError, IndexResult};
use byteorder::{ByteOrder, NetworkEndian, WriteBytesExt};
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexHeader {
    pub(crate) version: u32,
    pub(crate) entries_count: u32,
}

impl IndexHeader {
    pub(crate) fn empty() -> Self {
        IndexHeader {
            version: VERSION,
            entries_count: 0,
        }
    }

    pub fn decode(bytes: &[u8]) -> IndexResult<Self> {
        if !bytes.starts_with(SIGNATURE) {
            return Err(IndexError::InvalidSignature);
        }

        if bytes.len() < HEADER_SIZE {
            return Err(IndexError::malformed("truncated index header"));
        }

        let version = NetworkEndian::read_u32(&bytes[4..8]);
        let entries_count = NetworkEndian::read_u32(&bytes[8..12]);

        Ok(IndexHeader {
            version,
            entries_count,
        })
    }

    pub fn encode(&self) -> IndexResult<Vec<u8>> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.extend_from_slice(SIGNATURE);
        bytes.write_u32::<NetworkEndian>(self.version)?;
        bytes.write_u32::<NetworkEndian>(self.entries_count)?;

        Ok(bytes)
    }
}
