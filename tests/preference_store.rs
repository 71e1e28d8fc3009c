//! Preference store fallback behaviour across storage tiers.
//!
//! Tiers are in-process doubles that can be switched to "unavailable" (API
//! missing) or "denied" (API throws) at any point, as browsers do in private
//! browsing, sandboxed iframes or with cookies disabled.

use portfolio_client::config::SiteConfig;
use portfolio_client::store::{
    CookieJar, CookieTier, MemoryCookieJar, MemoryTier, PreferenceStore, TierKind, TierState,
};

struct Tiers {
    durable: MemoryTier,
    session: MemoryTier,
    cookies: MemoryCookieJar,
}

fn browser_like() -> (Tiers, PreferenceStore) {
    let tiers = Tiers {
        durable: MemoryTier::new(TierKind::Durable),
        session: MemoryTier::new(TierKind::Session),
        cookies: MemoryCookieJar::new(),
    };
    let store = PreferenceStore::default()
        .with_tier(tiers.durable.clone())
        .with_tier(tiers.session.clone())
        .with_tier(CookieTier::new(tiers.cookies.clone()));
    (tiers, store)
}

#[test]
fn set_then_get_returns_value() {
    let (_tiers, store) = browser_like();
    assert!(store.set("yms-theme", "dark"));
    assert_eq!(store.get::<String>("yms-theme").as_deref(), Some("dark"));

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Prefs {
        reduced_motion: bool,
        visits: u32,
    }
    let prefs = Prefs {
        reduced_motion: true,
        visits: 3,
    };
    assert!(store.set("prefs", &prefs));
    assert_eq!(store.get::<Prefs>("prefs"), Some(prefs));
}

#[test]
fn remove_then_get_is_absent() {
    let (tiers, store) = browser_like();
    tiers.session.insert_raw("yms-theme", "\"light\"");
    tiers
        .cookies
        .assign("yms-theme=%22dark%22; path=/; max-age=31536000")
        .unwrap();
    assert!(store.set("yms-theme", "auto"));

    assert!(store.remove("yms-theme"));
    assert_eq!(store.get::<String>("yms-theme"), None);
    assert_eq!(tiers.cookies.value("yms-theme"), None);
}

#[test]
fn falls_back_to_session_when_durable_missing() {
    let (tiers, store) = browser_like();
    tiers.durable.set_state(TierState::Unavailable);

    assert!(store.set("yms-theme", "light"));
    assert_eq!(tiers.session.raw("yms-theme").as_deref(), Some("\"light\""));
    assert_eq!(
        store.locate::<String>("yms-theme"),
        Some((TierKind::Session, "light".to_string()))
    );
}

#[test]
fn falls_back_to_cookie_with_one_year_lifetime() {
    let (tiers, store) = browser_like();
    tiers.durable.set_state(TierState::Denied);
    tiers.session.set_state(TierState::Unavailable);

    assert!(store.set("yms-theme", "dark"));
    assert_eq!(tiers.cookies.value("yms-theme").as_deref(), Some("%22dark%22"));
    assert_eq!(
        store.locate::<String>("yms-theme"),
        Some((TierKind::Cookie, "dark".to_string()))
    );
}

#[test]
fn writes_are_not_replicated() {
    let (tiers, store) = browser_like();
    assert!(store.set("yms-theme", "dark"));

    // Durable storage later disappears: the value went nowhere else
    tiers.durable.set_state(TierState::Unavailable);
    assert_eq!(store.get::<String>("yms-theme"), None);
}

#[test]
fn stale_lower_tier_value_resurfaces() {
    let (tiers, store) = browser_like();
    tiers
        .cookies
        .assign("yms-theme=%22light%22; path=/; max-age=31536000")
        .unwrap();
    assert!(store.set("yms-theme", "dark"));
    assert_eq!(store.get::<String>("yms-theme").as_deref(), Some("dark"));

    // Site data cleared for localStorage only: the old cookie answers
    tiers.durable.clear();
    assert_eq!(store.get::<String>("yms-theme").as_deref(), Some("light"));
}

#[test]
fn nothing_available_never_panics() {
    let (tiers, store) = browser_like();
    tiers.durable.set_state(TierState::Denied);
    tiers.session.set_state(TierState::Denied);
    tiers.cookies.set_state(TierState::Denied);

    assert_eq!(store.get::<String>("yms-theme"), None);
    assert!(!store.set("yms-theme", "dark"));
    assert!(!store.remove("yms-theme"));
}

#[test]
fn configured_store_uses_configured_order() {
    let config = SiteConfig::from_json(r#"{"tiers": ["session", "durable"]}"#).unwrap();
    let store = config.build_store();
    assert_eq!(store.tier_kinds(), vec![TierKind::Session, TierKind::Durable]);

    assert!(store.set("k", "v"));
    assert_eq!(
        store.locate::<String>("k"),
        Some((TierKind::Session, "v".to_string()))
    );
}
