//! Browser storage tiers (WASM only).
//!
//! This is the single place that touches `localStorage`, `sessionStorage`
//! and `document.cookie`.

use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, Storage};

use super::{CookieJar, StorageTier, TierError, TierKind};

fn js_error(e: wasm_bindgen::JsValue) -> TierError {
    TierError::Access(format!("{:?}", e))
}

/// `localStorage` or `sessionStorage`.
///
/// The storage object is looked up on every call: private browsing and
/// sandboxed iframes can make the getter itself throw.
pub struct WebStorageTier {
    kind: TierKind,
}

impl WebStorageTier {
    pub fn local() -> Self {
        Self {
            kind: TierKind::Durable,
        }
    }

    pub fn session() -> Self {
        Self {
            kind: TierKind::Session,
        }
    }

    fn storage(&self) -> Result<Storage, TierError> {
        let window = web_sys::window().ok_or(TierError::Unavailable)?;
        let storage = match self.kind {
            TierKind::Session => window.session_storage(),
            _ => window.local_storage(),
        };
        storage.map_err(js_error)?.ok_or(TierError::Unavailable)
    }
}

impl StorageTier for WebStorageTier {
    fn kind(&self) -> TierKind {
        self.kind
    }

    fn read(&self, key: &str) -> Result<Option<String>, TierError> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn write(&self, key: &str, raw: &str) -> Result<(), TierError> {
        self.storage()?.set_item(key, raw).map_err(js_error)
    }

    fn delete(&self, key: &str) -> Result<(), TierError> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}

/// `document.cookie`
#[derive(Default)]
pub struct DocumentCookieJar;

impl DocumentCookieJar {
    fn document(&self) -> Result<HtmlDocument, TierError> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
            .ok_or(TierError::Unavailable)
    }
}

impl CookieJar for DocumentCookieJar {
    fn header(&self) -> Result<String, TierError> {
        self.document()?.cookie().map_err(js_error)
    }

    fn assign(&self, cookie: &str) -> Result<(), TierError> {
        self.document()?.set_cookie(cookie).map_err(js_error)
    }
}
