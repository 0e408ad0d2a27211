use assert_cmd::prelude::*;
use predicates::prelude::*;

mod common;
use common::{assertions, fixtures::*, repository::*};

#[cfg(test)]
mod snapshot_command_tests {
    use super::*;

    #[test]
    fn test_snapshot_keeps_working_tree_and_index() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        create_file(&repo.path, "initial.txt", "staged\n")?;
        git_add(&repo, "initial.txt")?;
        create_file(&repo.path, "notes.txt", "untracked\n")?;
        let before = repo.status()?;

        repo.cmd()?
            .args(["snapshot", "before refactor"])
            .assert()
            .success()
            .stdout(predicate::str::contains("before refactor"));

        assert_eq!(repo.status()?, before);
        assert_eq!(repo.stash_subjects()?, vec!["On master: before refactor"]);
        assert_eq!(repo.read_file("notes.txt")?, "untracked\n");
        Ok(())
    }

    #[test]
    fn test_snapshot_without_changes() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;

        repo.cmd()?
            .arg("snapshot")
            .assert()
            .success()
            .stdout("No local changes to save\n");

        assert_eq!(repo.stash_count()?, 0);
        Ok(())
    }

    #[test]
    fn test_snapshot_limited_to_files() -> anyhow::Result<()> {
        let repo = setup_test_repo()?;
        commit_test_files(&repo, &["a.txt", "b.txt"])?;
        create_file(&repo.path, "a.txt", "changed a\n")?;
        create_file(&repo.path, "b.txt", "changed b\n")?;

        repo.cmd()?
            .args(["snapshot", "--quiet", "only a", "--", "a.txt"])
            .assert()
            .success()
            .stdout("");

        let files = repo.git(&["stash", "show", "--name-only", "stash@{0}"])?;
        assert_eq!(files, "a.txt\n");
        assert_eq!(repo.status()?, " M a.txt\n M b.txt\n");
        Ok(())
    }

    #[test]
    fn test_snapshot_replace_drops_matching_messages() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        create_file(&repo.path, "initial.txt", "first\n")?;
        repo.cmd()?.args(["snapshot", "-q", "wip"]).assert().success();
        repo.cmd()?.args(["snapshot", "-q", "other"]).assert().success();

        create_file(&repo.path, "initial.txt", "second\n")?;
        repo.cmd()?
            .args(["snapshot", "-q", "--replace", "wip"])
            .assert()
            .success();

        assert_eq!(
            repo.stash_subjects()?,
            vec!["On master: wip", "On master: other"]
        );
        assert_eq!(repo.read_file("initial.txt")?, "second\n");
        Ok(())
    }

    #[test]
    fn test_snapshot_replace_needs_message() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        create_file(&repo.path, "initial.txt", "changed\n")?;

        repo.cmd()?
            .args(["snapshot", "--replace"])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::starts_with("usage: "));
        Ok(())
    }

    #[test]
    fn test_snapshot_in_empty_repository() -> anyhow::Result<()> {
        let repo = setup_test_repo()?;
        create_file(&repo.path, "new.txt", "new\n")?;

        repo.cmd()?
            .arg("snapshot")
            .assert()
            .failure()
            .stderr(assertions::error_message(
                "cannot snapshot in an empty repository",
            ));
        Ok(())
    }

    #[test]
    fn test_snapshot_files_from_subdirectory() -> anyhow::Result<()> {
        let repo = create_nested_changes_repo()?;

        repo.cmd_in("sub")?
            .args(["snapshot", "-q", "only a", "--", "a.txt"])
            .assert()
            .success();

        let files = repo.git(&["stash", "show", "--name-only", "stash@{0}"])?;
        assert_eq!(files, "sub/a.txt\n");
        assert_eq!(repo.status()?, " M sub/a.txt\n M sub/b.txt\n M top.txt\n");
        Ok(())
    }
}
