use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn hash_object(&self, file_path: &Path, write: bool) -> anyhow::Result<()> {
        if !file_path.is_file() {
            anyhow::bail!(
                "could not open '{}' for reading: No such file or directory",
                file_path.display()
            );
        }

        let blob = self.workspace().parse_blob(file_path)?;
        let object_id = blob.object_id()?;

        writeln!(self.writer(), "{}", object_id)?;

        if write {
            self.database().store(blob)?;
        }

        Ok(())
    }
}
