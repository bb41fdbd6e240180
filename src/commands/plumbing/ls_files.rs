use crate::areas::repository::Repository;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// List tracked paths under `cwd`, relative to it
    pub fn ls_files(&self, cwd: &Path) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate()?;

        for entry in index.entries() {
            let entry_path = self.workspace().resolve(&entry.name);

            if let Ok(relative) = entry_path.strip_prefix(cwd) {
                let name = relative
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");

                writeln!(self.writer(), "{name}")?;
            }
        }

        Ok(())
    }
}
