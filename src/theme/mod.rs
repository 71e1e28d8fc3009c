//! Theme management with tiered preference persistence.
//!
//! The stored preference is light, dark or auto. Auto follows the operating
//! system's colour scheme; the resolved [`Appearance`] is what lands on the
//! document root as `data-theme` and is never persisted itself.

use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::store::PreferenceStore;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Persisted theme preference
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    Auto,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::Auto => "auto",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            "auto" => Some(ThemePreference::Auto),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemePreference::Light => "Light",
            ThemePreference::Dark => "Dark",
            ThemePreference::Auto => "Auto",
        }
    }

    /// Toggle order: auto -> dark -> light -> auto
    pub fn next(&self) -> Self {
        match self {
            ThemePreference::Auto => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Auto,
        }
    }

    /// Effective appearance given the OS signal (`None` when unknown)
    pub fn resolve(&self, system_prefers_dark: Option<bool>) -> Appearance {
        match self {
            ThemePreference::Light => Appearance::Light,
            ThemePreference::Dark => Appearance::Dark,
            ThemePreference::Auto if system_prefers_dark == Some(true) => Appearance::Dark,
            ThemePreference::Auto => Appearance::Light,
        }
    }
}

/// Rendered theme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Appearance {
    #[default]
    Light,
    Dark,
}

impl Appearance {
    /// Value of the `data-theme` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Appearance::Light => "light",
            Appearance::Dark => "dark",
        }
    }

    /// Toggle button indicator
    pub fn icon(&self) -> &'static str {
        match self {
            Appearance::Light => "☀️",
            Appearance::Dark => "🌙",
        }
    }
}

/// Where the resolved appearance is rendered (document root + toggle icon)
pub trait ThemeSurface {
    fn apply(&mut self, appearance: Appearance);
}

/// Operating system colour-scheme signal
pub trait ColorSchemeSource {
    /// `Some(true)` if the OS prefers dark, `None` if it cannot tell
    fn prefers_dark(&self) -> Option<bool>;
}

/// Fixed scheme answer, for hosts without a media query API
impl ColorSchemeSource for Option<bool> {
    fn prefers_dark(&self) -> Option<bool> {
        *self
    }
}

/// Owns the theme preference and the single mutation point of the
/// document's theme attribute.
pub struct ThemeController {
    store: PreferenceStore,
    surface: Box<dyn ThemeSurface>,
    scheme: Box<dyn ColorSchemeSource>,
    key: String,
    backup_key: Option<String>,
    preference: ThemePreference,
    appearance: Appearance,
}

impl ThemeController {
    pub fn new(
        store: PreferenceStore,
        surface: impl ThemeSurface + 'static,
        scheme: impl ColorSchemeSource + 'static,
        key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            surface: Box::new(surface),
            scheme: Box::new(scheme),
            key: key.into(),
            backup_key: None,
            preference: ThemePreference::default(),
            appearance: Appearance::default(),
        }
    }

    /// Controller keyed as the site config says, backup key included
    pub fn from_config(
        config: &SiteConfig,
        store: PreferenceStore,
        surface: impl ThemeSurface + 'static,
        scheme: impl ColorSchemeSource + 'static,
    ) -> Self {
        let mut controller = Self::new(store, surface, scheme, config.theme_key.clone());
        controller.backup_key = config.theme_backup_key.clone();
        controller
    }

    /// Also persist every toggle under `key`; read it when the primary key is missing
    pub fn with_backup_key(mut self, key: impl Into<String>) -> Self {
        self.backup_key = Some(key.into());
        self
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    /// Load the saved preference (default auto) and render it
    pub fn start(&mut self) -> Appearance {
        self.preference = self.load_preference().unwrap_or_default();
        tracing::info!("Theme starting with saved preference: {}", self.preference.as_str());
        self.render()
    }

    /// Advance auto -> dark -> light -> auto.
    ///
    /// The new preference is persisted before the document is updated; a
    /// failed write still changes the page for this session.
    pub fn toggle(&mut self) -> ThemePreference {
        let next = self.preference.next();
        tracing::info!(
            "Theme toggle - current: {}, next: {}",
            self.preference.as_str(),
            next.as_str()
        );

        if !self.store.set(&self.key, &next) {
            tracing::warn!("Theme preference not saved, it will reset on reload");
        }
        if let Some(backup) = &self.backup_key {
            if !self.store.set(backup, &next) {
                tracing::warn!("Failed to save backup theme under {}", backup);
            }
        }

        self.preference = next;
        self.render();
        next
    }

    /// React to an OS colour-scheme change. Only auto follows it.
    ///
    /// Returns true if the rendered appearance changed.
    pub fn system_scheme_changed(&mut self, prefers_dark: bool) -> bool {
        if self.preference != ThemePreference::Auto {
            return false;
        }
        let appearance = self.preference.resolve(Some(prefers_dark));
        if appearance == self.appearance {
            return false;
        }
        tracing::info!("System colour scheme changed, now {}", appearance.as_str());
        self.appearance = appearance;
        self.surface.apply(appearance);
        true
    }

    fn load_preference(&self) -> Option<ThemePreference> {
        let keys = std::iter::once(self.key.as_str()).chain(self.backup_key.as_deref());
        for key in keys {
            // Stored as a JSON string; unknown tags are ignored rather than trusted
            if let Some(tag) = self.store.get::<String>(key) {
                match ThemePreference::parse(&tag) {
                    Some(pref) => return Some(pref),
                    None => tracing::warn!("Ignoring unknown theme {:?} under {}", tag, key),
                }
            }
        }
        None
    }

    fn render(&mut self) -> Appearance {
        self.appearance = self.preference.resolve(self.scheme.prefers_dark());
        tracing::debug!(
            "Applying theme {} ({})",
            self.appearance.as_str(),
            self.preference.as_str()
        );
        self.surface.apply(self.appearance);
        self.appearance
    }
}

/// Surface that remembers the last applied appearance.
///
/// Used where there is no document (native builds, tests). Clones share state.
#[derive(Clone, Default)]
pub struct RecordedSurface {
    state: std::rc::Rc<std::cell::Cell<Recorded>>,
}

#[derive(Clone, Copy, Default)]
struct Recorded {
    current: Option<Appearance>,
    applies: usize,
}

impl RecordedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of the theme attribute, if ever set
    pub fn current(&self) -> Option<Appearance> {
        self.state.get().current
    }

    /// Number of times the surface was repainted
    pub fn apply_count(&self) -> usize {
        self.state.get().applies
    }
}

impl ThemeSurface for RecordedSurface {
    fn apply(&mut self, appearance: Appearance) {
        let previous = self.state.get();
        self.state.set(Recorded {
            current: Some(appearance),
            applies: previous.applies + 1,
        });
    }
}
