use crate::common::command::{repository_dir, run_xg_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn new_repository_initiated_with_git_directory(repository_dir: TempDir) {
    let git_dir = repository_dir.path().canonicalize().unwrap().join(".git");

    run_xg_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Initialized empty XGit repository in",
        ))
        .stdout(predicate::str::contains(git_dir.display().to_string()));

    assert!(git_dir.join("objects").is_dir());
    assert!(git_dir.join("refs").join("heads").is_dir());
    assert!(git_dir.join("refs").join("tags").is_dir());
    assert_eq!(
        std::fs::read_to_string(git_dir.join("HEAD")).unwrap(),
        "ref: refs/heads/main\n"
    );
}

#[rstest]
fn init_creates_missing_target_directory(repository_dir: TempDir) {
    run_xg_command(repository_dir.path(), &["init", "nested/project"])
        .assert()
        .success();

    assert!(
        repository_dir
            .path()
            .join("nested")
            .join("project")
            .join(".git")
            .join("objects")
            .is_dir()
    );
}

#[rstest]
fn init_refuses_existing_repository(repository_dir: TempDir) {
    run_xg_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_xg_command(repository_dir.path(), &["init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists!"));
}
