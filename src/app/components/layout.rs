//! Page layout: header, scroll progress bar, content and footer.

use chrono::Datelike;
use dioxus::prelude::*;

use super::nav::Nav;
use crate::app::dom::{use_reveal_on_scroll, use_scroll_metrics};
use crate::motion::current_device_profile;

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page title (shown in browser tab)
    pub title: String,
    /// Page content
    pub children: Element,
}

/// Release and commit shown in the footer tooltip
fn build_label() -> String {
    format!("{} ({})", env!("SITE_VERSION"), env!("SITE_GIT_SHA"))
}

/// Main layout component wrapping the page.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let title = props.title.clone();
    let year = chrono::Local::now().year();
    let build = build_label();
    let reveal_mode = use_hook(|| current_device_profile().reveal_mode());
    use_reveal_on_scroll(reveal_mode);
    let metrics = use_scroll_metrics();
    let progress = metrics().progress();

    rsx! {
        document::Title { "{title}" }
        div { class: "progress",
            div { class: "progress__bar", style: "width: {progress}%" }
        }
        Nav {}
        main { id: "top", {props.children} }
        footer { class: "footer", title: "Build {build}",
            small { "© "
                span { id: "year", "{year}" }
                " Yossef Salim"
            }
        }
    }
}
