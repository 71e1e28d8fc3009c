//! Configuration management
//!
//! The site ships its settings as JSON. In the browser they are read from
//! `<script id="site-config" type="application/json">`. Native builds layer
//! the JSON file named by `PORTFOLIO_CONFIG` under `PORTFOLIO_*` environment
//! overrides. Missing sources fall back to defaults.

use anyhow::Result;
use serde::Deserialize;

use crate::store::{
    CookieTier, PreferenceStore, StorageTier, TierKind, DEFAULT_COOKIE_MAX_AGE_SECS,
};

/// Element id of the embedded config block
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Env var naming the config file for native builds
pub const CONFIG_PATH_ENV: &str = "PORTFOLIO_CONFIG";

/// Prefix of env overrides (`PORTFOLIO_THEME_KEY`, `PORTFOLIO_CONTACT__RECIPIENT`)
pub const ENV_PREFIX: &str = "PORTFOLIO";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteConfig {
    /// Preference store key holding the theme setting
    #[serde(default = "default_theme_key")]
    pub theme_key: String,

    /// Secondary key the theme is also written under (null disables)
    #[serde(default = "default_theme_backup_key")]
    pub theme_backup_key: Option<String>,

    #[serde(default = "default_cookie_max_age")]
    pub cookie_max_age_secs: u64,

    /// Storage tiers in priority order
    #[serde(default = "default_tiers")]
    pub tiers: Vec<TierKind>,

    #[serde(default)]
    pub contact: ContactConfig,
}

fn default_theme_key() -> String {
    "yms-theme".to_string()
}

fn default_theme_backup_key() -> Option<String> {
    Some("yms-theme-backup".to_string())
}

fn default_cookie_max_age() -> u64 {
    DEFAULT_COOKIE_MAX_AGE_SECS
}

fn default_tiers() -> Vec<TierKind> {
    vec![TierKind::Durable, TierKind::Session, TierKind::Cookie]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            theme_key: default_theme_key(),
            theme_backup_key: default_theme_backup_key(),
            cookie_max_age_secs: default_cookie_max_age(),
            tiers: default_tiers(),
            contact: ContactConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContactConfig {
    #[serde(default = "default_recipient")]
    pub recipient: String,
    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_recipient() -> String {
    "yosefsalim123@gmail.com".to_string()
}

fn default_subject() -> String {
    "Portfolio Contact (Yossef)".to_string()
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient: default_recipient(),
            subject: default_subject(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the preference store for this host, tiers in configured order.
    ///
    /// Browser builds get the real backends. Native builds get in-process
    /// tiers, so preferences last for the life of the process.
    pub fn build_store(&self) -> PreferenceStore {
        let tiers = self
            .tiers
            .iter()
            .map(|kind| host_tier(*kind, self.cookie_max_age_secs))
            .collect();
        PreferenceStore::new(tiers)
    }
}

#[cfg(target_arch = "wasm32")]
fn host_tier(kind: TierKind, cookie_max_age_secs: u64) -> Box<dyn StorageTier> {
    use crate::store::web::{DocumentCookieJar, WebStorageTier};
    match kind {
        TierKind::Durable => Box::new(WebStorageTier::local()),
        TierKind::Session => Box::new(WebStorageTier::session()),
        TierKind::Cookie => {
            Box::new(CookieTier::new(DocumentCookieJar).with_max_age(cookie_max_age_secs))
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn host_tier(kind: TierKind, cookie_max_age_secs: u64) -> Box<dyn StorageTier> {
    use crate::store::{MemoryCookieJar, MemoryTier};
    match kind {
        TierKind::Cookie => {
            Box::new(CookieTier::new(MemoryCookieJar::new()).with_max_age(cookie_max_age_secs))
        }
        other => Box::new(MemoryTier::new(other)),
    }
}

/// Load site configuration, falling back to defaults when no source exists
#[cfg(target_arch = "wasm32")]
pub fn load_config() -> Result<SiteConfig> {
    let embedded = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty());

    match embedded {
        Some(json) => {
            let config = SiteConfig::from_json(&json)?;
            tracing::debug!("Loaded site config: {:?}", config);
            Ok(config)
        }
        None => {
            tracing::debug!("No site config found, using defaults");
            Ok(SiteConfig::default())
        }
    }
}

/// Load site configuration, falling back to defaults when no source exists
#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> Result<SiteConfig> {
    let mut builder = ::config::Config::builder();

    // An explicitly named file must exist
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        tracing::debug!("Reading site config from {}", path);
        builder = builder.add_source(::config::File::new(&path, ::config::FileFormat::Json));
    }

    // Override with environment variables (PORTFOLIO_THEME_KEY, PORTFOLIO_TIERS=cookie,session, etc.)
    let config = builder
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("tiers"),
        )
        .build()?;

    let config: SiteConfig = config.try_deserialize()?;
    tracing::debug!("Loaded site config: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn partial_json_fills_defaults() {
        let config = SiteConfig::from_json(r#"{"theme_key": "site-theme"}"#).unwrap();
        assert_eq!(config.theme_key, "site-theme");
        assert_eq!(config.theme_backup_key.as_deref(), Some("yms-theme-backup"));
        assert_eq!(config.cookie_max_age_secs, 31_536_000);
        assert_eq!(
            config.tiers,
            vec![TierKind::Durable, TierKind::Session, TierKind::Cookie]
        );
    }

    #[test]
    fn null_backup_key_disables_backup() {
        let config = SiteConfig::from_json(r#"{"theme_backup_key": null}"#).unwrap();
        assert_eq!(config.theme_backup_key, None);
    }

    #[test]
    fn tier_order_is_configurable() {
        let config = SiteConfig::from_json(r#"{"tiers": ["cookie", "session"]}"#).unwrap();
        let store = config.build_store();
        assert_eq!(store.tier_kinds(), vec![TierKind::Cookie, TierKind::Session]);
    }

    #[test]
    fn unknown_tier_is_rejected() {
        assert!(SiteConfig::from_json(r#"{"tiers": ["indexeddb"]}"#).is_err());
    }

    #[test]
    #[serial]
    fn load_config_reads_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"contact": {{"recipient": "me@example.com"}}}}"#).unwrap();

        std::env::set_var(CONFIG_PATH_ENV, file.path());
        let config = load_config();
        std::env::remove_var(CONFIG_PATH_ENV);

        let config = config.unwrap();
        assert_eq!(config.contact.recipient, "me@example.com");
        assert_eq!(config.contact.subject, "Portfolio Contact (Yossef)");
    }

    #[test]
    #[serial]
    fn load_config_without_source_uses_defaults() {
        std::env::remove_var(CONFIG_PATH_ENV);
        assert_eq!(load_config().unwrap(), SiteConfig::default());
    }

    #[test]
    #[serial]
    fn load_config_missing_named_file_is_an_error() {
        std::env::set_var(CONFIG_PATH_ENV, "/nonexistent/portfolio-site.json");
        let config = load_config();
        std::env::remove_var(CONFIG_PATH_ENV);

        assert!(config.is_err());
    }

    #[test]
    #[serial]
    fn env_vars_override_defaults_without_a_file() {
        std::env::remove_var(CONFIG_PATH_ENV);
        std::env::set_var("PORTFOLIO_THEME_KEY", "site-theme");
        std::env::set_var("PORTFOLIO_TIERS", "cookie,session");
        let config = load_config();
        std::env::remove_var("PORTFOLIO_THEME_KEY");
        std::env::remove_var("PORTFOLIO_TIERS");

        let config = config.unwrap();
        assert_eq!(config.theme_key, "site-theme");
        assert_eq!(config.tiers, vec![TierKind::Cookie, TierKind::Session]);
        assert_eq!(config.theme_backup_key.as_deref(), Some("yms-theme-backup"));
    }

    #[test]
    #[serial]
    fn env_vars_take_precedence_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"theme_key": "from-file", "contact": {{"recipient": "file@example.com"}}}}"#
        )
        .unwrap();

        std::env::set_var(CONFIG_PATH_ENV, file.path());
        std::env::set_var("PORTFOLIO_CONTACT__RECIPIENT", "env@example.com");
        let config = load_config();
        std::env::remove_var(CONFIG_PATH_ENV);
        std::env::remove_var("PORTFOLIO_CONTACT__RECIPIENT");

        let config = config.unwrap();
        assert_eq!(config.theme_key, "from-file");
        assert_eq!(config.contact.recipient, "env@example.com");
        assert_eq!(config.contact.subject, "Portfolio Contact (Yossef)");
    }
}
