//! Hero banner with a parallax background.

use dioxus::prelude::*;

use crate::app::dom::{scroll_to_anchor, use_scroll_metrics};
use crate::motion::{current_device_profile, parallax_transform};

#[component]
pub fn Hero(title: String, subtitle: String) -> Element {
    let low_end = use_hook(|| {
        let profile = current_device_profile();
        let low_end = profile.is_low_end();
        tracing::info!("Performance mode: {}", if low_end { "low-end" } else { "high-end" });
        low_end
    });
    let metrics = use_scroll_metrics();

    // Parallax is skipped on slow or motion-sensitive devices
    let transform = if low_end {
        String::from("none")
    } else {
        parallax_transform(metrics().scroll_y)
    };

    rsx! {
        section { class: "hero",
            div { class: "hero__bg", style: "transform: {transform}" }
            h1 { class: "hero__title", "{title}" }
            p { class: "hero__subtitle", "data-animate": "fade-up", "{subtitle}" }
            a {
                class: "hero__cta button",
                href: "#contact",
                onclick: move |evt: MouseEvent| scroll_to_anchor(&evt, "#contact"),
                "Get in touch"
            }
        }
    }
}
