//! Dioxus application entry point.
//!
//! This module provides the root App component: it loads the site config,
//! installs the theme context and lays out the single-page portfolio.

use dioxus::prelude::*;

pub mod components;
pub mod dom;
pub mod theme;

use crate::config::{load_config, SiteConfig};
use components::{ContactSection, Hero, Layout};
use dom::use_scroll_provider;
use theme::use_theme_provider;

/// Root app component
#[component]
pub fn App() -> Element {
    let config = use_hook(|| {
        load_config().unwrap_or_else(|e| {
            tracing::warn!("Invalid site config, using defaults: {}", e);
            SiteConfig::default()
        })
    });

    // Initialize theme context at app root (handles storage tiers + data-theme)
    use_theme_provider(&config);
    // One set of window scroll/resize listeners shared by every component
    use_scroll_provider();

    rsx! {
        Layout { title: "Yossef Salim - Portfolio",
            Hero {
                title: "Hi, I'm Yossef",
                subtitle: "I build fast, accessible things for the web.",
            }
            ContactSection { contact: config.contact.clone() }
        }
    }
}
