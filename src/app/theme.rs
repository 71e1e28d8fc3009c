//! Theme context for the Dioxus UI.
//!
//! Wraps the [`ThemeController`] in a signal so components can read the
//! current preference and trigger the toggle.

use dioxus::prelude::*;

use crate::config::SiteConfig;
use crate::theme::{Appearance, ThemeController, ThemePreference};

#[cfg(target_arch = "wasm32")]
use crate::theme::web::ColorSchemeWatch;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

/// Global theme state shared via context
#[derive(Clone, Copy)]
pub struct ThemeContext {
    controller: Signal<ThemeController>,
    preference: Signal<ThemePreference>,
    appearance: Signal<Appearance>,
}

impl ThemeContext {
    pub fn preference(&self) -> ThemePreference {
        (self.preference)()
    }

    pub fn appearance(&self) -> Appearance {
        (self.appearance)()
    }

    /// Cycle auto -> dark -> light and persist
    pub fn toggle(&self) {
        let mut controller = self.controller;
        controller.write().toggle();
        self.sync();
    }

    /// Load the saved preference and render it
    #[cfg(target_arch = "wasm32")]
    fn start(&self) {
        let mut controller = self.controller;
        controller.write().start();
        self.sync();
    }

    #[cfg(target_arch = "wasm32")]
    fn system_scheme_changed(&self, prefers_dark: bool) {
        let mut controller = self.controller;
        if controller.write().system_scheme_changed(prefers_dark) {
            self.sync();
        }
    }

    fn sync(&self) {
        let controller = self.controller.peek();
        let mut preference = self.preference;
        let mut appearance = self.appearance;
        preference.set(controller.preference());
        appearance.set(controller.appearance());
    }
}

#[cfg(target_arch = "wasm32")]
fn build_controller(config: &SiteConfig) -> ThemeController {
    use crate::theme::web::{DocumentRoot, MediaQueryScheme};
    ThemeController::from_config(config, config.build_store(), DocumentRoot, MediaQueryScheme)
}

#[cfg(not(target_arch = "wasm32"))]
fn build_controller(config: &SiteConfig) -> ThemeController {
    use crate::theme::RecordedSurface;
    ThemeController::from_config(config, config.build_store(), RecordedSurface::new(), None::<bool>)
}

/// Initialize theme context provider - call once at app root
pub fn use_theme_provider(config: &SiteConfig) {
    let controller = use_signal(|| {
        #[allow(unused_mut)]
        let mut controller = build_controller(config);
        // Browser storage is only read after hydration (see below)
        #[cfg(not(target_arch = "wasm32"))]
        controller.start();
        controller
    });
    let preference = use_signal(|| controller.peek().preference());
    let appearance = use_signal(|| controller.peek().appearance());

    let ctx = ThemeContext {
        controller,
        preference,
        appearance,
    };
    use_context_provider(|| ctx);

    // Client-side only: read browser storage after hydration, then follow the OS scheme
    #[cfg(target_arch = "wasm32")]
    {
        let _watch: Rc<RefCell<Option<ColorSchemeWatch>>> = use_hook(|| Rc::new(RefCell::new(None)));

        let watch = _watch.clone();
        use_effect(move || {
            if watch.borrow().is_some() {
                return;
            }
            ctx.start();
            *watch.borrow_mut() =
                ColorSchemeWatch::start(move |prefers_dark| ctx.system_scheme_changed(prefers_dark));
        });
    }
}

/// Get theme context - use in any component
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>()
}
