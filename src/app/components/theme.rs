//! Theme toggle button.

use dioxus::prelude::*;

use crate::app::theme::use_theme;

/// Cycles auto -> dark -> light. The icon shows the rendered theme, the
/// tooltip the stored preference.
#[component]
pub fn ThemeToggle() -> Element {
    let theme = use_theme();
    let icon = theme.appearance().icon();
    let label = theme.preference().label();

    rsx! {
        button {
            id: "theme-toggle",
            class: "theme-toggle",
            r#type: "button",
            title: "Theme: {label}",
            "aria-label": "Toggle theme",
            onclick: move |_| theme.toggle(),
            span { class: "theme-toggle__icon", "{icon}" }
        }
    }
}
