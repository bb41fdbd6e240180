use std::io::BufRead;

/// Type tag written in an object's header
///
/// Only blobs are ever produced by this tool; trees and commits are
/// recognized so that objects written by git can still be inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Read the `<type> <size>\0` header, leaving the reader on the payload
    pub fn parse_header(data_reader: &mut impl BufRead) -> anyhow::Result<(ObjectType, usize)> {
        let mut object_type = Vec::new();
        data_reader.read_until(b' ', &mut object_type)?;
        if object_type.pop() != Some(b' ') {
            anyhow::bail!("Missing object type delimiter");
        }

        let object_type = String::from_utf8(object_type)?;

        let mut size = Vec::new();
        data_reader.read_until(b'\0', &mut size)?;
        if size.pop() != Some(b'\0') {
            anyhow::bail!("Missing object size terminator");
        }

        let size = String::from_utf8(size)?.parse::<usize>()?;

        Ok((ObjectType::try_from(object_type.as_str())?, size))
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(anyhow::anyhow!("Invalid object type")),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_header_stops_at_payload() {
        let mut reader = Cursor::new(b"blob 5\0hello".to_vec());
        let (object_type, size) = ObjectType::parse_header(&mut reader).unwrap();

        pretty_assertions::assert_eq!(object_type, ObjectType::Blob);
        pretty_assertions::assert_eq!(size, 5);
        pretty_assertions::assert_eq!(reader.position(), 7);
    }

    #[test]
    fn test_parse_header_without_terminator_fails() {
        let mut reader = Cursor::new(b"blob 5".to_vec());
        assert!(ObjectType::parse_header(&mut reader).is_err());
    }

    #[test]
    fn test_parse_header_with_unknown_type_fails() {
        let mut reader = Cursor::new(b"tag 3\0abc".to_vec());
        assert!(ObjectType::parse_header(&mut reader).is_err());
    }
}
