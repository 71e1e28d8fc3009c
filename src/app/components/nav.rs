//! Site header with the mobile navigation drawer.

use dioxus::prelude::*;

use super::theme::ThemeToggle;
use crate::app::dom::{scroll_to_anchor, use_scroll_metrics};
use crate::nav::NavDrawer;

#[cfg(target_arch = "wasm32")]
use crate::app::dom::set_body_overflow;

/// (anchor, label) pairs, in page order
const SECTIONS: &[(&str, &str)] = &[
    ("#about", "About"),
    ("#projects", "Projects"),
    ("#skills", "Skills"),
    ("#contact", "Contact"),
];

#[component]
pub fn Nav() -> Element {
    let mut drawer = use_signal(NavDrawer::default);

    #[cfg(target_arch = "wasm32")]
    use_effect(move || set_body_overflow(drawer.read().body_overflow()));

    // Leaving the mobile layout must not leave the page scroll-locked
    let metrics = use_scroll_metrics();
    let viewport_width = use_memo(move || metrics().viewport_width);
    use_effect(move || {
        let width = viewport_width();
        if drawer.peek().is_open() {
            drawer.write().viewport_resized(width as u32);
        }
    });

    let state = drawer();
    let links = SECTIONS.iter().map(move |&(href, label)| {
        rsx! {
            li {
                a {
                    class: "nav__link",
                    href,
                    onclick: move |evt: MouseEvent| {
                        scroll_to_anchor(&evt, href);
                        drawer.write().close();
                    },
                    "{label}"
                }
            }
        }
    });

    rsx! {
        header { class: "nav",
            a {
                class: "nav__brand",
                href: "#top",
                onclick: move |evt: MouseEvent| scroll_to_anchor(&evt, "#top"),
                "Yossef"
            }
            button {
                class: "nav__toggle",
                r#type: "button",
                "aria-controls": "nav-menu",
                "aria-expanded": state.aria_expanded(),
                "aria-label": "Menu",
                onclick: move |_| {
                    drawer.write().toggle();
                },
                "☰"
            }
            ul { id: "nav-menu", class: state.menu_class(), {links} }
            ThemeToggle {}
        }
        if state.is_open() {
            // Clicking anywhere outside the drawer closes it
            div { class: "nav__backdrop", onclick: move |_| drawer.write().close() }
        }
    }
}
