//! Shared E2E test helpers for `cardnav` binary tests.

#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::Path;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Environment variables that would leak the developer's setup into tests.
const CARDNAV_VARS: &[&str] = &[
    "CARDNAV_DEBUG",
    "CARDNAV_ALLOWED_USERS",
    "CARDNAV_MAX_HISTORY",
    "CARDNAV_SESSION_PATH",
    "CARDNAV_CONTENT",
    "CARDNAV_SESSION",
    "RUST_LOG",
];

/// Build a Command for the `cardnav` binary isolated inside `root`.
///
/// `root` doubles as HOME (so no global config is read), project root and
/// session storage root.
pub fn cardnav_cmd(root: &Path) -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("cardnav");
    cmd.timeout(TIMEOUT_BASIC);
    for var in CARDNAV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", root);
    cmd.arg("-C").arg(root);
    cmd.arg("--session-path").arg(root.join("sessions"));
    cmd
}

/// Writes a small card deck into `root` and returns its path.
pub fn write_deck(root: &Path) -> std::path::PathBuf {
    let path = root.join("cards.json");
    std::fs::write(
        &path,
        r#"{"cards": [
            {"pageId": "home", "title": "Home", "body": "Start here.", "links": ["intro"]},
            {"pageId": "intro", "title": "Intro", "body": "Hello."}
        ]}"#,
    )
    .expect("write card deck");
    path
}
