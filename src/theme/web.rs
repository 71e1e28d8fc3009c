//! Browser bindings for the theme controller (WASM only).

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MediaQueryList, MediaQueryListEvent};

use super::{Appearance, ColorSchemeSource, ThemeSurface};

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Attribute on `<html>` read by the stylesheet
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// The document root element
#[derive(Default)]
pub struct DocumentRoot;

impl ThemeSurface for DocumentRoot {
    fn apply(&mut self, appearance: Appearance) {
        let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return;
        };
        if let Err(e) = root.set_attribute(THEME_ATTRIBUTE, appearance.as_str()) {
            tracing::warn!("Failed to set {}: {:?}", THEME_ATTRIBUTE, e);
        }
    }
}

fn dark_scheme_query() -> Option<MediaQueryList> {
    web_sys::window()?.match_media(DARK_SCHEME_QUERY).ok().flatten()
}

/// `matchMedia("(prefers-color-scheme: dark)")`
#[derive(Default)]
pub struct MediaQueryScheme;

impl ColorSchemeSource for MediaQueryScheme {
    fn prefers_dark(&self) -> Option<bool> {
        dark_scheme_query().map(|mql| mql.matches())
    }
}

/// Live subscription to OS colour-scheme changes.
///
/// The listener is removed when the guard is dropped.
pub struct ColorSchemeWatch {
    mql: MediaQueryList,
    on_change: Closure<dyn FnMut(MediaQueryListEvent)>,
}

impl ColorSchemeWatch {
    /// Call `on_change(prefers_dark)` whenever the OS scheme flips.
    ///
    /// Returns None when the browser has no media query support.
    pub fn start(mut on_change: impl FnMut(bool) + 'static) -> Option<Self> {
        let mql = dark_scheme_query()?;
        let closure = Closure::wrap(Box::new(move |e: MediaQueryListEvent| {
            on_change(e.matches());
        }) as Box<dyn FnMut(_)>);

        if let Err(e) =
            mql.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
        {
            tracing::warn!("Failed to watch colour scheme: {:?}", e);
            return None;
        }

        Some(Self {
            mql,
            on_change: closure,
        })
    }
}

impl Drop for ColorSchemeWatch {
    fn drop(&mut self) {
        let _ = self
            .mql
            .remove_event_listener_with_callback("change", self.on_change.as_ref().unchecked_ref());
    }
}
