//! Binary tests for the `ghrest` command

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const USER: &str = include_str!("fixtures/user.json");
const SEARCH_REPOSITORIES: &str = include_str!("fixtures/search_repositories.json");

/// A `ghrest` invocation isolated from the caller's config and credentials
fn ghrest(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ghrest").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("GITHUB_TOKEN")
        .env_remove("GITHUB_USERNAME")
        .env_remove("GITHUB_PASSWORD")
        .env_remove("GHREST_API_URL")
        .env_remove("GHREST_TIMEOUT_SECS");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    ghrest(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("gist"));
}

#[test]
fn test_config_path_is_under_home() {
    let home = TempDir::new().unwrap();
    ghrest(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ghrest"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_set_then_show() {
    let home = TempDir::new().unwrap();
    ghrest(&home)
        .args(["config", "set", "per-page", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("per-page set to: 50"));

    ghrest(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"per-page\s+50").unwrap());
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    ghrest(&home)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key 'colour'"));
}

#[test]
fn test_auth_status_without_credentials() {
    let home = TempDir::new().unwrap();
    ghrest(&home)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not authenticated"));
}

#[test]
fn test_auth_status_masks_token() {
    let home = TempDir::new().unwrap();
    ghrest(&home)
        .args(["auth", "status", "--token", "ghp_abcdefghijklmnop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Authenticated"))
        .stdout(predicate::str::contains("ghp_abcdefghijklmnop").not());
}

#[test]
fn test_user_lookup_against_mock() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/users/octocat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(USER)
        .create();

    ghrest(&home)
        .env("GHREST_API_URL", server.url())
        .args(["user", "octocat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("octocat"));

    mock.assert();
}

#[test]
fn test_search_against_mock() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/search/repositories")
        .match_query(mockito::Matcher::UrlEncoded(
            "q".into(),
            "tetris language:assembly".into(),
        ))
        .with_status(200)
        .with_body(SEARCH_REPOSITORIES)
        .create();

    ghrest(&home)
        .env("GHREST_API_URL", server.url())
        .args(["search", "repositories", "tetris", "language:assembly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("40 result(s)"))
        .stdout(predicate::str::contains("octocat/Hello-World"));

    mock.assert();
}

#[test]
fn test_api_error_exits_nonzero() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/repos/octocat/missing")
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create();

    ghrest(&home)
        .env("GHREST_API_URL", server.url())
        .args(["repo", "octocat/missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Not Found"));
}

#[test]
fn test_label_search_requires_repository_id() {
    let home = TempDir::new().unwrap();
    ghrest(&home)
        .env("GHREST_API_URL", "http://127.0.0.1:9")
        .args(["search", "labels", "bug"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--repository-id"));
}
