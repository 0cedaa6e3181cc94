//
//  gitlab-scm
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use predicates::prelude::*;

const UNREACHABLE_SERVER: &str = "http://127.0.0.1:1";

fn gitlab_scm() -> Command {
    let mut cmd = Command::cargo_bin("gitlab-scm").unwrap();
    for var in [
        "GITLAB_SCM_SERVER",
        "GITLAB_SCM_USERNAME",
        "GITLAB_SCM_PASSWORD",
        "GITLAB_SCM_TOKEN",
        "GITLAB_SCM_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_version() {
    gitlab_scm()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_commands() {
    gitlab_scm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("probe"))
        .stdout(predicate::str::contains("languages"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn test_missing_credentials_exit_code() {
    gitlab_scm()
        .args(["probe", "--server", UNREACHABLE_SERVER])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("username or password is missing"));
}

#[test]
fn test_unreachable_server_exit_code() {
    gitlab_scm()
        .args(["probe", "--server", UNREACHABLE_SERVER, "--token", "t"])
        .assert()
        .code(32)
        .stderr(predicate::str::contains("unreachable"));
}

#[test]
fn test_pinned_version_skips_probe() {
    gitlab_scm()
        .args([
            "probe",
            "--server",
            UNREACHABLE_SERVER,
            "--api-version",
            "v3",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""api_version": "v3""#));
}

#[test]
fn test_unsupported_api_version() {
    gitlab_scm()
        .args(["probe", "--server", UNREACHABLE_SERVER, "--api-version", "v5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn test_top_language_against_v4_server() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/v4/version")
        .with_status(200)
        .with_body(r#"{"version":"16.0.0","revision":"abc"}"#)
        .create();
    server
        .mock("GET", "/api/v4/projects/group%2Fapp/languages")
        .match_header("private-token", "glpat-1")
        .with_status(200)
        .with_body(r#"{"Go":70.5,"Shell":29.5}"#)
        .create();

    gitlab_scm()
        .args([
            "languages",
            "group/app",
            "--top",
            "--server",
            &server.url(),
            "--token",
            "glpat-1",
        ])
        .assert()
        .success()
        .stdout("Go\n");
}
