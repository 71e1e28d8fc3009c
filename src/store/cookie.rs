//! Cookie-backed storage tier.
//!
//! Cookie format: `key=<percent-encoded JSON>; path=/; max-age=<secs>`.
//! Deletion assigns an empty value with `max-age=0` so the browser expires
//! it immediately.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{StorageTier, TierError, TierKind, TierState};

/// One year
pub const DEFAULT_COOKIE_MAX_AGE_SECS: u64 = 31_536_000;

/// Access to a document's cookie string.
///
/// Mirrors `document.cookie`: reading yields every visible `name=value` pair
/// joined by `; `, assigning sets or expires a single cookie.
pub trait CookieJar {
    fn header(&self) -> Result<String, TierError>;
    fn assign(&self, cookie: &str) -> Result<(), TierError>;
}

/// Build the assignment string that stores `raw` under `key`
pub fn set_cookie_string(key: &str, raw: &str, max_age_secs: u64) -> String {
    format!(
        "{}={}; path=/; max-age={}",
        key,
        urlencoding::encode(raw),
        max_age_secs
    )
}

/// Build the assignment string that expires `key`
pub fn expire_cookie_string(key: &str) -> String {
    format!("{}=; path=/; max-age=0", key)
}

/// Find `key` in a cookie header and percent-decode its value.
///
/// Cookies with an empty value count as absent.
pub fn find_cookie(header: &str, key: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == key && !value.is_empty())
        .and_then(|(_, value)| match urlencoding::decode(value) {
            Ok(decoded) => Some(decoded.into_owned()),
            Err(e) => {
                tracing::warn!("cookie {} is not valid UTF-8 after decoding: {}", key, e);
                None
            }
        })
}

/// Storage tier over a [`CookieJar`]
pub struct CookieTier<J> {
    jar: J,
    max_age_secs: u64,
}

impl<J: CookieJar> CookieTier<J> {
    pub fn new(jar: J) -> Self {
        Self {
            jar,
            max_age_secs: DEFAULT_COOKIE_MAX_AGE_SECS,
        }
    }

    pub fn with_max_age(mut self, max_age_secs: u64) -> Self {
        self.max_age_secs = max_age_secs;
        self
    }
}

impl<J: CookieJar> StorageTier for CookieTier<J> {
    fn kind(&self) -> TierKind {
        TierKind::Cookie
    }

    fn read(&self, key: &str) -> Result<Option<String>, TierError> {
        let header = self.jar.header()?;
        Ok(find_cookie(&header, key))
    }

    fn write(&self, key: &str, raw: &str) -> Result<(), TierError> {
        self.jar
            .assign(&set_cookie_string(key, raw, self.max_age_secs))
    }

    fn delete(&self, key: &str) -> Result<(), TierError> {
        self.jar.assign(&expire_cookie_string(key))
    }
}

/// In-process cookie jar with browser assignment semantics.
///
/// Only `max-age` is honoured: a value <= 0 deletes the cookie, anything
/// else stores it. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryCookieJar {
    cookies: Rc<RefCell<BTreeMap<String, String>>>,
    state: Rc<Cell<TierState>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_state(&self, state: TierState) {
        self.state.set(state);
    }

    /// Stored (still encoded) value, bypassing the jar state
    pub fn value(&self, name: &str) -> Option<String> {
        self.cookies.borrow().get(name).cloned()
    }

    fn check(&self) -> Result<(), TierError> {
        match self.state.get() {
            TierState::Available => Ok(()),
            TierState::Unavailable => Err(TierError::Unavailable),
            TierState::Denied => Err(TierError::Access("cookies disabled".into())),
        }
    }
}

impl CookieJar for MemoryCookieJar {
    fn header(&self) -> Result<String, TierError> {
        self.check()?;
        let header = self
            .cookies
            .borrow()
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ");
        Ok(header)
    }

    fn assign(&self, cookie: &str) -> Result<(), TierError> {
        self.check()?;

        let mut parts = cookie.split(';');
        let (name, value) = parts
            .next()
            .and_then(|pair| pair.trim().split_once('='))
            .ok_or_else(|| TierError::Access(format!("malformed cookie assignment: {}", cookie)))?;

        let expired = parts
            .filter_map(|attr| attr.trim().split_once('='))
            .filter(|(attr, _)| attr.eq_ignore_ascii_case("max-age"))
            .any(|(_, secs)| secs.trim().parse::<i64>().map_or(false, |s| s <= 0));

        let mut cookies = self.cookies.borrow_mut();
        if expired {
            cookies.remove(name);
        } else {
            cookies.insert(name.to_string(), value.to_string());
        }
        Ok(())
    }
}
