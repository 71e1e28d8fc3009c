//! Shared UI components for the Dioxus web UI.

pub mod contact_form;
pub mod hero;
pub mod layout;
pub mod nav;
pub mod theme;

pub use contact_form::ContactSection;
pub use hero::Hero;
pub use layout::Layout;
pub use nav::Nav;
pub use theme::ThemeToggle;
