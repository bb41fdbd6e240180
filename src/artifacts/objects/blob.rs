//! Blob object
//!
//! Blobs store file content. They contain only the raw file data, without any
//! metadata like filename or permissions (those live in the index).
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`
//! In memory: the raw content bytes

use crate::artifacts::objects::object::{Object, Packable, Unpackable, hash_content};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

#[derive(Debug, Clone, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let (encoded, _) = hash_content(&self.object_type(), &self.content);
        Ok(encoded)
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        Ok(Self::new(Bytes::from(content)))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_id_is_hash_of_encoding() {
        let blob = Blob::new(Bytes::from_static(b"hello"));

        pretty_assertions::assert_eq!(
            blob.object_id().unwrap().as_ref(),
            "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0"
        );
        pretty_assertions::assert_eq!(&blob.serialize().unwrap()[..], b"blob 5\0hello");
    }

    #[test]
    fn test_deserialize_reads_remaining_payload() {
        let blob = Blob::deserialize(std::io::Cursor::new(b"\x00binary\xff".to_vec())).unwrap();
        pretty_assertions::assert_eq!(&blob.content()[..], b"\x00binary\xff");
    }
}
