use crate::areas::repository::Repository;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::fs;
use std::io::Write;

const DEFAULT_BRANCH: &str = "main";

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        let git_path = self.git_path();

        if git_path.exists() {
            return Err(RepositoryError::AlreadyInitialized(git_path).into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .git/objects directory")?;

        fs::create_dir_all(git_path.join("refs").join("heads"))
            .context("Failed to create .git/refs/heads directory")?;

        fs::create_dir_all(git_path.join("refs").join("tags"))
            .context("Failed to create .git/refs/tags directory")?;

        fs::write(
            git_path.join("HEAD"),
            format!("ref: refs/heads/{DEFAULT_BRANCH}\n"),
        )
        .context("Failed to create initial HEAD reference")?;

        tracing::debug!(path = %git_path.display(), "initialized repository");

        writeln!(
            self.writer(),
            "Initialized empty XGit repository in {}",
            git_path.display()
        )?;

        Ok(())
    }
}
