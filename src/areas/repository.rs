use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

pub const GIT_DIR: &str = ".git";
const INDEX_FILE: &str = "index";
const OBJECTS_DIR: &str = "objects";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
}

impl Repository {
    /// Open the repository rooted at `path`, creating the directory if needed
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
        }

        let path = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", path.display()))?;

        let git_path = path.join(GIT_DIR);
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let index = Index::new(
            git_path.join(INDEX_FILE).into_boxed_path(),
            workspace.clone(),
        );
        let database = Database::new(git_path.join(OBJECTS_DIR).into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
        })
    }

    /// Open the repository enclosing `start`
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", start.display()))?;
        let root = find_root(&start)?;

        Repository::new(&root, writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> PathBuf {
        self.path.join(GIT_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }
}

/// Walk up from `start` to the first directory holding a `.git` directory
pub fn find_root(start: &Path) -> Result<PathBuf, RepositoryError> {
    start
        .ancestors()
        .find(|dir| dir.join(GIT_DIR).is_dir())
        .map(Path::to_path_buf)
        .ok_or(RepositoryError::NotARepository)
}
