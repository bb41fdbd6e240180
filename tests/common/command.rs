use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};
use xg::areas::index::Index;
use xg::areas::workspace::Workspace;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_xg_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

pub fn run_xg_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("xg").expect("Failed to find xg binary");
    cmd.env_remove("XG_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn index_path(dir: &Path) -> PathBuf {
    dir.join(".git").join("index")
}

/// Decode the index of the repository rooted at `dir`
pub fn load_index(dir: &Path) -> Index {
    let root = dir.canonicalize().expect("Failed to resolve repository root");
    let mut index = Index::new(
        index_path(&root).into_boxed_path(),
        Workspace::new(root.into_boxed_path()),
    );
    index.rehydrate().expect("Failed to load index");
    index
}

pub fn index_names(dir: &Path) -> Vec<String> {
    load_index(dir)
        .entries()
        .iter()
        .map(|entry| entry.name.clone())
        .collect()
}
