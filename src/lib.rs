//! Portfolio site client
//!
//! Client-side behaviour for the portfolio site, compiled to WASM and
//! rendered with Dioxus.
//!
//! This library provides:
//! - A preference store with localStorage -> sessionStorage -> cookie fallback
//! - A light/dark/auto theme controller following the OS colour scheme
//! - Contact form validation with a mailto fallback
//! - Mobile navigation drawer state and scroll-driven effects

pub mod app;
pub mod config;
pub mod form;
pub mod motion;
pub mod nav;
pub mod store;
pub mod theme;
