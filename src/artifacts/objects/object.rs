use crate::artifacts::objects::RAW_OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        Ok(digest(&content))
    }
}

/// Build the canonical `<kind> <length>\0<payload>` encoding and its id
///
/// Accepts any payload, including an empty one.
pub fn hash_content(kind: &ObjectType, payload: &[u8]) -> (Bytes, ObjectId) {
    let header = format!("{} {}\0", kind.as_str(), payload.len());

    let mut encoded = Vec::with_capacity(header.len() + payload.len());
    encoded.extend_from_slice(header.as_bytes());
    encoded.extend_from_slice(payload);

    let oid = digest(&encoded);
    (Bytes::from(encoded), oid)
}

fn digest(data: &[u8]) -> ObjectId {
    let mut raw = [0u8; RAW_OBJECT_ID_LENGTH];
    raw.copy_from_slice(&Sha1::digest(data));
    ObjectId::from_raw(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(b"", "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391")]
    #[case(b"hello", "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0")]
    #[case(b"hello\n", "ce013625030ba8dba906f756967f9e9ca394464a")]
    fn test_hash_content_matches_git_blob_ids(#[case] payload: &[u8], #[case] expected: &str) {
        let (_, oid) = hash_content(&ObjectType::Blob, payload);
        assert_eq!(oid.as_ref(), expected);
    }

    #[test]
    fn test_hash_content_builds_canonical_encoding() {
        let (encoded, _) = hash_content(&ObjectType::Blob, b"hello");
        assert_eq!(&encoded[..], b"blob 5\0hello");
    }

    #[test]
    fn test_hash_content_is_deterministic() {
        let first = hash_content(&ObjectType::Blob, b"\x00\xffbinary");
        let second = hash_content(&ObjectType::Blob, b"\x00\xffbinary");
        assert_eq!(first, second);
    }
}
