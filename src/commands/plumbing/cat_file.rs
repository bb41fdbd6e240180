use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::io::Write;

/// What `cat-file` reports about an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    Pretty,
    Size,
    Type,
}

impl Repository {
    pub fn cat_file(&self, object: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let object_id = Self::resolve_object_name(object)?;
        let (object_type, size, _) = self.database().parse_object_header(&object_id)?;

        match mode {
            CatFileMode::Type => writeln!(self.writer(), "{}", object_type)?,
            CatFileMode::Size => writeln!(self.writer(), "{}", size)?,
            CatFileMode::Pretty => match self.database().parse_object_as_blob(&object_id)? {
                Some(blob) => self.writer().write_all(blob.content())?,
                None => {
                    anyhow::bail!("pretty-printing of {object_type} objects is not supported")
                }
            },
        }

        Ok(())
    }

    /// Whether `object` names a stored object with a readable header
    pub fn object_exists(&self, object: &str) -> bool {
        Self::resolve_object_name(object)
            .and_then(|object_id| self.database().parse_object_header(&object_id))
            .is_ok()
    }

    fn resolve_object_name(object: &str) -> anyhow::Result<ObjectId> {
        ObjectId::try_parse(object)
            .map_err(|_| RepositoryError::ObjectNotFound(object.to_string()).into())
    }
}
