#![allow(dead_code)]

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

pub const TOGGLE: &str = "DEMO_RUNTIME_VERSION";

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args([
            "-c",
            "user.email=test@example.com",
            "-c",
            "user.name=Test User",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "tag.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

pub fn write_manifest(dir: &Path, extra: &str) {
    let content = format!(
        "[package]\nname = \"demo\"\n\n[runtime]\nenv_var = \"{}\"\n{}",
        TOGGLE, extra
    );
    std::fs::write(dir.join("live-version.toml"), content).unwrap();
}

/// A git checkout with a manifest, one commit and the given tag.
pub fn tagged_project(tag: &str, extra_manifest: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), extra_manifest);
    git(dir.path(), &["init", "-q"]);
    git(dir.path(), &["add", "live-version.toml"]);
    git(dir.path(), &["commit", "-q", "-m", &format!("Initial commit for {}", tag)]);
    git(dir.path(), &["tag", tag]);
    dir
}

pub fn commit_and_tag(dir: &Path, tag: &str) {
    git(dir, &["commit", "-q", "--allow-empty", "-m", "Test commit"]);
    git(dir, &["tag", tag]);
}
