//! Stamps the site build with the release it was cut from.
//!
//! The package version stays 0.0.0; releases are git tags (`v1.4.0`).
//! - SITE_VERSION: CI override, else the nearest tag without its `v`, else "dev"
//! - SITE_GIT_SHA: CI override, else GITHUB_SHA, else `git rev-parse`

use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn main() {
    let version = std::env::var("SITE_VERSION")
        .ok()
        .or_else(|| git(&["describe", "--tags", "--abbrev=0"]))
        .map(|tag| tag.trim_start_matches('v').to_string())
        .unwrap_or_else(|| "dev".into());
    println!("cargo:rustc-env=SITE_VERSION={}", version);

    let git_sha = std::env::var("SITE_GIT_SHA")
        .ok()
        .or_else(|| std::env::var("GITHUB_SHA").ok().map(|s| s.chars().take(7).collect()))
        .or_else(|| git(&["rev-parse", "--short", "HEAD"]))
        .unwrap_or_else(|| "local".into());
    println!("cargo:rustc-env=SITE_GIT_SHA={}", git_sha);

    println!("cargo:rerun-if-env-changed=SITE_VERSION");
    println!("cargo:rerun-if-env-changed=SITE_GIT_SHA");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");
    // New commits and tags change the stamp
    if std::path::Path::new(".git").exists() {
        println!("cargo:rerun-if-changed=.git/HEAD");
        println!("cargo:rerun-if-changed=.git/refs/tags");
    }
}
