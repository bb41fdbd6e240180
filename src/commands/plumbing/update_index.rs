use crate::areas::index::Index;
use crate::areas::repository::Repository;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How `update-index` treats the paths it is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Restage paths that are already tracked
    #[default]
    Update,
    Add,
    /// Unstage paths that no longer exist on disk
    Remove,
    ForceRemove,
}

/// A `<mode>,<object>,<path>` triple given to `--cacheinfo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheInfo {
    pub mode: String,
    pub object_id: String,
    pub path: String,
}

impl FromStr for CacheInfo {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.splitn(3, ',');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(mode), Some(object_id), Some(path)) if !path.is_empty() => Ok(CacheInfo {
                mode: mode.to_string(),
                object_id: object_id.to_string(),
                path: path.to_string(),
            }),
            _ => Err(format!("expected <mode>,<object>,<path>, got '{value}'")),
        }
    }
}

impl Repository {
    /// Apply `mode` to each file in order, stopping at the first failure
    ///
    /// Whatever was applied before the failure is still written out.
    pub fn update_index_files(
        &self,
        paths: &[PathBuf],
        mode: UpdateMode,
        verbose: bool,
    ) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate()?;

        let mut failure = None;
        for path in paths {
            if let Err(err) = self.stage_path(&mut index, path, mode, verbose) {
                failure = Some(err.context(format!("Unable to process path {}", path.display())));
                break;
            }
        }

        index.write_updates()?;

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Like [`Repository::update_index_files`] for `--cacheinfo` triples
    ///
    /// Paths are relative to the repository root.
    pub fn update_index_cache_info(
        &self,
        cache_info: &[CacheInfo],
        mode: UpdateMode,
        verbose: bool,
    ) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate()?;

        let mut failure = None;
        for info in cache_info {
            if let Err(err) = self.stage_cache_info(&mut index, info, mode, verbose) {
                failure = Some(err.context(format!(
                    "git update-index: --cacheinfo cannot add {}",
                    info.path
                )));
                break;
            }
        }

        index.write_updates()?;

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn refresh_index(&self) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate()?;

        for name in index.refresh() {
            writeln!(self.writer(), "{name}: needs update")?;
        }

        index.write_updates()?;

        Ok(())
    }

    fn stage_path(
        &self,
        index: &mut Index,
        path: &Path,
        mode: UpdateMode,
        verbose: bool,
    ) -> anyhow::Result<()> {
        match mode {
            UpdateMode::Add | UpdateMode::Update => {
                // the blob must be stored before the index refers to it
                if let Ok(blob) = self.workspace().parse_blob(path) {
                    self.database().store(blob)?;
                }

                let entry = match mode {
                    UpdateMode::Add => index.add(path)?,
                    _ => index.update(path)?,
                };

                self.notify(verbose, "add", &entry.name)
            }
            UpdateMode::Remove => match index.remove(path) {
                Some(entry) => self.notify(verbose, "remove", &entry.name),
                None => Ok(()),
            },
            UpdateMode::ForceRemove => match index.force_remove(path) {
                Some(entry) => self.notify(verbose, "remove", &entry.name),
                None => Ok(()),
            },
        }
    }

    fn stage_cache_info(
        &self,
        index: &mut Index,
        info: &CacheInfo,
        mode: UpdateMode,
        verbose: bool,
    ) -> anyhow::Result<()> {
        let path = self.workspace().resolve(&info.path);

        match mode {
            UpdateMode::Add => {
                let entry = index.add_from_cache_info(&info.mode, &info.object_id, &info.path)?;
                self.notify(verbose, "add", &entry.name)
            }
            UpdateMode::Update if self.workspace().exists(&path) => {
                let entry =
                    index.update_from_cache_info(&info.mode, &info.object_id, &info.path)?;
                self.notify(verbose, "add", &entry.name)
            }
            UpdateMode::Update => {
                tracing::debug!(path = %info.path, "skipping cache info for missing path");
                Ok(())
            }
            UpdateMode::Remove | UpdateMode::ForceRemove => {
                self.stage_path(index, &path, mode, verbose)
            }
        }
    }

    fn notify(&self, verbose: bool, action: &str, name: &str) -> anyhow::Result<()> {
        if verbose {
            writeln!(self.writer(), "{action} '{name}'")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_cache_info_keeps_commas_in_path() {
        let info: CacheInfo = "100644,0123456789abcdef0123456789abcdef01234567,a,b.txt"
            .parse()
            .unwrap();

        assert_eq!(
            info,
            CacheInfo {
                mode: "100644".to_string(),
                object_id: "0123456789abcdef0123456789abcdef01234567".to_string(),
                path: "a,b.txt".to_string(),
            }
        );
    }

    #[rstest]
    #[case("")]
    #[case("100644")]
    #[case("100644,abc")]
    #[case("100644,abc,")]
    fn test_incomplete_cache_info_is_rejected(#[case] value: &str) {
        assert!(value.parse::<CacheInfo>().is_err());
    }
}
