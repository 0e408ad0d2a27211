use assert_cmd::prelude::*;
use predicates::prelude::*;

mod common;
use common::{assertions, repository::*};

#[cfg(test)]
mod state_command_tests {
    use super::*;

    #[test]
    fn test_state_empty_repository_without_status_is_empty() -> anyhow::Result<()> {
        let repo = setup_test_repo()?;

        repo.cmd()?
            .args(["state", "--no-show-status"])
            .assert()
            .success()
            .stdout("");
        Ok(())
    }

    #[test]
    fn test_state_shows_status_with_branch() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        create_file(&repo.path, "initial.txt", "changed\n")?;
        create_file(&repo.path, "notes.txt", "new\n")?;

        repo.cmd()?
            .args(["state", "--color", "never"])
            .assert()
            .success()
            .stdout("# status (master)\n M initial.txt\n?? notes.txt\n");
        Ok(())
    }

    #[test]
    fn test_state_clean_message() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;

        repo.cmd()?
            .arg("state")
            .assert()
            .success()
            .stdout("# status (master)\nnothing to commit, working tree clean\n");
        Ok(())
    }

    #[test]
    fn test_state_hides_empty_sections_unless_asked() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        repo.set_config("git-state.status.show-clean-message", "false")?;

        repo.cmd()?.arg("state").assert().success().stdout("");
        repo.cmd()?
            .args(["state", "--show-empty"])
            .assert()
            .success()
            .stdout("# status (master)\n");

        repo.set_config("git-state.show-empty", "true")?;
        repo.cmd()?
            .arg("state")
            .assert()
            .success()
            .stdout("# status (master)\n");
        Ok(())
    }

    #[test]
    fn test_state_runs_configured_extensions_in_order() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        repo.set_config("git-state.extensions.greeting.command", "echo hello")?;
        repo.set_config("git-state.extensions.greeting.name", "Greeting")?;

        repo.cmd()?
            .arg("state")
            .assert()
            .success()
            .stdout("# status (master)\nnothing to commit, working tree clean\n# Greeting\nhello\n");

        repo.cmd()?
            .args(["state", "--order", "greeting", "status"])
            .assert()
            .success()
            .stdout("# Greeting\nhello\n# status (master)\nnothing to commit, working tree clean\n");

        repo.set_config("git-state.order", "greeting")?;
        repo.cmd()?
            .arg("state")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("# Greeting\nhello\n# status"));
        Ok(())
    }

    #[test]
    fn test_state_options_override() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        repo.set_config("git-state.extensions.greeting.command", "echo hello")?;
        repo.set_config("git-state.extensions.greeting.options", "there")?;

        repo.cmd()?
            .args(["state", "-S"])
            .assert()
            .success()
            .stdout("# greeting\nhello there\n");

        repo.cmd()?
            .args(["state", "-S", "--options", "greeting=world"])
            .assert()
            .success()
            .stdout("# greeting\nhello world\n");
        Ok(())
    }

    #[test]
    fn test_state_visibility() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        repo.set_config("git-state.extensions.greeting.command", "echo hello")?;
        repo.set_config("git-state.extensions.greeting.show", "false")?;

        repo.cmd()?
            .args(["state", "-S"])
            .assert()
            .success()
            .stdout("");

        repo.cmd()?
            .args(["state", "-S", "--show-extensions", "greeting"])
            .assert()
            .success()
            .stdout("# greeting\nhello\n");

        repo.cmd()?
            .args(["state", "--ignore-extensions", "--show-extensions", "greeting"])
            .assert()
            .success()
            .stdout(predicate::str::contains("greeting").not());
        Ok(())
    }

    #[test]
    fn test_state_built_in_stashes() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        create_file(&repo.path, "initial.txt", "changed\n")?;
        repo.git(&["stash", "push", "--quiet", "--message", "parked"])?;

        repo.cmd()?
            .args(["state", "-S", "-e", "stashes"])
            .assert()
            .success()
            .stdout("# stashes\nstash@{0}: On master: parked\n");
        Ok(())
    }

    #[test]
    fn test_state_branches_hidden_with_only_default() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;

        repo.cmd()?
            .args(["state", "-S", "-e", "branches"])
            .assert()
            .success()
            .stdout("");

        repo.git(&["branch", "topic"])?;
        repo.cmd()?
            .args(["state", "-S", "-e", "branches"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("# branches\n"))
            .stdout(predicate::str::contains("topic"));
        Ok(())
    }

    #[test]
    fn test_state_pretty_format() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        repo.set_config("git-state.extensions.greeting.command", "echo hello")?;
        repo.set_config("git-state.format", "pretty")?;

        repo.cmd()?
            .arg("state")
            .assert()
            .success()
            .stdout(
                "# status (master)\n\n    nothing to commit, working tree clean\n\n# greeting\n\n    hello\n",
            );
        Ok(())
    }

    #[test]
    fn test_state_failing_extension_degrades_to_empty() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        repo.set_config("git-state.extensions.broken.command", "false")?;

        repo.cmd()?
            .args(["state", "-S"])
            .assert()
            .success()
            .stdout("");
        Ok(())
    }

    #[test]
    fn test_state_extensions_listing() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        repo.set_config("git-state.extensions.greeting.command", "echo hello")?;
        repo.set_config("git-state.extensions.log.show", "true")?;

        repo.cmd()?
            .args(["state", "extensions"])
            .assert()
            .success()
            .stdout("greeting: echo hello\nlog: (built-in)\n");
        Ok(())
    }

    #[test]
    fn test_state_invalid_config_value() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        repo.set_config("git-state.show-empty", "sometimes")?;

        repo.cmd()?
            .arg("state")
            .assert()
            .failure()
            .stderr(assertions::error_message("invalid value for git-state.show-empty"));
        Ok(())
    }

    #[test]
    fn test_state_outside_repository() -> anyhow::Result<()> {
        let repo = setup_test_repo()?;
        let outside = tempfile::TempDir::new()?;

        repo.cmd()?
            .current_dir(outside.path())
            .arg("state")
            .assert()
            .failure()
            .stderr(assertions::not_in_git_repo());
        Ok(())
    }
}
