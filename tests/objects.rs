use crate::common::command::{init_repository_dir, repository_dir, run_xg_command};
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

const HELLO_ID: &str = "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0";

#[rstest]
fn hash_object_prints_blob_id_without_writing(init_repository_dir: TempDir) {
    init_repository_dir.child("a.txt").write_str("hello").unwrap();

    run_xg_command(init_repository_dir.path(), &["hash-object", "a.txt"])
        .assert()
        .success()
        .stdout(format!("{HELLO_ID}\n"));

    assert!(
        !init_repository_dir
            .path()
            .join(".git/objects/b6/fc4c620b67d95f953a5c1c1230aaab5db5a1b0")
            .exists()
    );
}

#[rstest]
fn hash_object_works_outside_repository(repository_dir: TempDir) {
    repository_dir.child("a.txt").write_str("hello").unwrap();

    run_xg_command(repository_dir.path(), &["hash-object", "a.txt"])
        .assert()
        .success()
        .stdout(format!("{HELLO_ID}\n"));
}

#[rstest]
fn hash_object_matches_git(init_repository_dir: TempDir) {
    use fake::Fake;
    use fake::faker::lorem::en::Paragraph;

    let content = Paragraph(2..4).fake::<String>();
    init_repository_dir.child("p.txt").write_str(&content).unwrap();

    let git_output = crate::common::command::run_git_command(
        init_repository_dir.path(),
        &["hash-object", "p.txt"],
    )
    .output()
    .unwrap();

    run_xg_command(init_repository_dir.path(), &["hash-object", "p.txt"])
        .assert()
        .success()
        .stdout(String::from_utf8(git_output.stdout).unwrap());
}

#[rstest]
fn hash_object_missing_file_is_fatal(init_repository_dir: TempDir) {
    run_xg_command(init_repository_dir.path(), &["hash-object", "missing.txt"])
        .assert()
        .code(128)
        .stderr(predicate::str::contains("could not open"));
}

#[rstest]
fn written_object_can_be_inspected(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    init_repository_dir.child("a.txt").write_str("hello").unwrap();

    run_xg_command(dir, &["hash-object", "-w", "a.txt"])
        .assert()
        .success();

    run_xg_command(dir, &["cat-file", "-t", HELLO_ID])
        .assert()
        .success()
        .stdout("blob\n");
    run_xg_command(dir, &["cat-file", "-s", HELLO_ID])
        .assert()
        .success()
        .stdout("5\n");
    run_xg_command(dir, &["cat-file", "-p", HELLO_ID])
        .assert()
        .success()
        .stdout("hello");
    run_xg_command(dir, &["cat-file", "-e", HELLO_ID])
        .assert()
        .success()
        .stdout("");
}

#[rstest]
#[case("0000000000000000000000000000000000000000")]
#[case("nonsense")]
fn unknown_objects(init_repository_dir: TempDir, #[case] object: &str) {
    let dir = init_repository_dir.path();

    run_xg_command(dir, &["cat-file", "-e", object])
        .assert()
        .code(1)
        .stdout("");

    run_xg_command(dir, &["cat-file", "-p", object])
        .assert()
        .code(128)
        .stderr(predicate::str::contains("not a valid object name"));
}

#[rstest]
#[case(&["cat-file", HELLO_ID])]
#[case(&["cat-file", "-p", "-t", HELLO_ID])]
fn cat_file_requires_exactly_one_mode(init_repository_dir: TempDir, #[case] args: &[&str]) {
    run_xg_command(init_repository_dir.path(), args)
        .assert()
        .code(129);
}

#[rstest]
fn cat_file_outside_repository_is_fatal(repository_dir: TempDir) {
    run_xg_command(repository_dir.path(), &["cat-file", "-t", HELLO_ID])
        .assert()
        .code(128)
        .stderr(predicate::str::contains("not a git repository"));
}
