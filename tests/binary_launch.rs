//! The binary needs a renderer feature; a plain `cargo build` must fail loudly
//! instead of launching nothing.

#![cfg(not(any(feature = "web", feature = "desktop")))]

use std::process::Command;

#[test]
fn binary_without_renderer_exits_with_hint() {
    let output = Command::new(env!("CARGO_BIN_EXE_portfolio-client"))
        .env("RUST_LOG", "portfolio_client=error")
        .env("NO_COLOR", "1")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let log = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(log.contains("--features web"), "unexpected output: {log}");
}
