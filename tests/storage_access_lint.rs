//! Architecture lint - browser storage and the theme attribute each have a
//! single owner.
//!
//! All reads and writes of localStorage, sessionStorage and document.cookie
//! must go through the PreferenceStore tiers in `src/store/web.rs`, so the
//! fallback chain cannot be bypassed. Only `src/theme/web.rs` may write the
//! `data-theme` attribute; everything else goes through ThemeController.

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// (pattern, owning file, hint)
const OWNED_PATTERNS: &[(&str, &str, &str)] = &[
    (
        "local_storage()",
        "src/store/web.rs",
        "Use PreferenceStore instead of localStorage",
    ),
    (
        "session_storage()",
        "src/store/web.rs",
        "Use PreferenceStore instead of sessionStorage",
    ),
    (
        "set_cookie(",
        "src/store/web.rs",
        "Use PreferenceStore instead of document.cookie",
    ),
    (
        "HtmlDocument",
        "src/store/web.rs",
        "Use PreferenceStore instead of document.cookie",
    ),
    (
        "\"data-theme\"",
        "src/theme/web.rs",
        "Use ThemeController to change the theme",
    ),
    (
        "THEME_ATTRIBUTE",
        "src/theme/web.rs",
        "Use ThemeController to change the theme",
    ),
];

fn rust_sources() -> Vec<(String, String)> {
    WalkDir::new("src")
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().map_or(false, |ext| ext == "rs"))
        .filter_map(|e| {
            let path = e.path().to_string_lossy().replace('\\', "/");
            fs::read_to_string(e.path()).ok().map(|src| (path, src))
        })
        .collect()
}

#[test]
fn owners_exist() {
    for (_, owner, _) in OWNED_PATTERNS {
        assert!(Path::new(owner).exists(), "{} is missing", owner);
    }
}

#[test]
fn browser_storage_and_theme_attribute_have_single_owner() {
    let mut violations = Vec::new();

    for (path, src) in rust_sources() {
        for (line_no, line) in src.lines().enumerate() {
            let code = line.split("//").next().unwrap_or("");
            for (pattern, owner, hint) in OWNED_PATTERNS {
                if path != *owner && code.contains(pattern) {
                    violations.push(format!("{}:{}: `{}` - {}", path, line_no + 1, pattern, hint));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Direct browser storage / theme attribute access outside its owner:\n{}",
        violations.join("\n")
    );
}
