//! Token Storage
//!
//! Access and refresh tokens are kept in a pair of cookies. Reading goes
//! through the `CookieJar` trait so the cookie logic runs without a browser.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use thiserror::Error;
use wasm_bindgen::JsCast;

use crate::config::config;

pub const TOKEN_KEY: &str = "platzi_auth_token";
pub const REFRESH_TOKEN_KEY: &str = "platzi_refresh_token";
const TOKEN_MAX_AGE_SECS: u64 = 7 * 24 * 60 * 60;

/// Characters that cannot appear raw in a cookie value
const COOKIE_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b',')
    .add(b';')
    .add(b'\\')
    .add(b'%');

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Cookies are not available in this context")]
    Unavailable,
    #[error("Failed to access cookies: {0}")]
    Access(String),
}

/// Raw `document.cookie` style access
pub trait CookieJar {
    /// All visible cookies as `name=value; name2=value2`
    fn read(&self) -> Result<String, StorageError>;
    /// Store one `Set-Cookie` style string
    fn write(&self, cookie: &str) -> Result<(), StorageError>;
}

/// The current page's `document.cookie`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserCookies;

fn html_document() -> Result<web_sys::HtmlDocument, StorageError> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.dyn_into::<web_sys::HtmlDocument>().ok())
        .ok_or(StorageError::Unavailable)
}

impl CookieJar for BrowserCookies {
    fn read(&self) -> Result<String, StorageError> {
        html_document()?
            .cookie()
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }

    fn write(&self, cookie: &str) -> Result<(), StorageError> {
        html_document()?
            .set_cookie(cookie)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }
}

// ========================
// Cookie Strings
// ========================

pub fn format_cookie(name: &str, value: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; path=/; max-age={}; SameSite=Strict",
        name,
        utf8_percent_encode(value, COOKIE_VALUE),
        TOKEN_MAX_AGE_SECS
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn format_removal(name: &str) -> String {
    format!("{}=; path=/; max-age=0", name)
}

/// Value of `name` in a `document.cookie` string; empty counts as missing
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode_str(value).decode_utf8_lossy().into_owned())
        .filter(|value| !value.is_empty())
}

// ========================
// Token Storage
// ========================

pub struct TokenStorage<J: CookieJar = BrowserCookies> {
    jar: J,
    secure: bool,
}

impl TokenStorage<BrowserCookies> {
    /// Page cookies; `Secure` in production builds
    pub fn browser() -> Self {
        Self::new(BrowserCookies, config().is_production)
    }
}

impl<J: CookieJar> TokenStorage<J> {
    pub fn new(jar: J, secure: bool) -> Self {
        Self { jar, secure }
    }

    fn get(&self, name: &str) -> Option<String> {
        match self.jar.read() {
            Ok(cookies) => find_cookie(&cookies, name),
            Err(e) => {
                log::error!("[STORAGE] Failed to read {}: {}", name, e);
                None
            }
        }
    }

    fn set(&self, name: &str, value: &str) -> Result<(), StorageError> {
        self.jar
            .write(&format_cookie(name, value, self.secure))
            .map_err(|e| {
                log::error!("[STORAGE] Failed to store {}: {}", name, e);
                e
            })
    }

    pub fn get_token(&self) -> Option<String> {
        self.get(TOKEN_KEY)
    }

    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.set(TOKEN_KEY, token)
    }

    pub fn get_refresh_token(&self) -> Option<String> {
        self.get(REFRESH_TOKEN_KEY)
    }

    pub fn set_refresh_token(&self, token: &str) -> Result<(), StorageError> {
        self.set(REFRESH_TOKEN_KEY, token)
    }

    pub fn clear_tokens(&self) {
        for name in [TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = self.jar.write(&format_removal(name)) {
                log::error!("[STORAGE] Failed to clear {}: {}", name, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    /// Applies cookie strings the way a browser would for same-path cookies
    #[derive(Default)]
    struct MemoryJar {
        cookies: RefCell<BTreeMap<String, String>>,
        writes: RefCell<Vec<String>>,
    }

    impl CookieJar for MemoryJar {
        fn read(&self) -> Result<String, StorageError> {
            Ok(self
                .cookies
                .borrow()
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; "))
        }

        fn write(&self, cookie: &str) -> Result<(), StorageError> {
            self.writes.borrow_mut().push(cookie.to_string());
            let mut parts = cookie.split("; ");
            let (name, value) = parts
                .next()
                .and_then(|pair| pair.split_once('='))
                .ok_or_else(|| StorageError::Access("malformed cookie".to_string()))?;
            if parts.any(|attr| attr == "max-age=0") {
                self.cookies.borrow_mut().remove(name);
            } else {
                self.cookies.borrow_mut().insert(name.to_string(), value.to_string());
            }
            Ok(())
        }
    }

    struct BrokenJar;

    impl CookieJar for BrokenJar {
        fn read(&self) -> Result<String, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn write(&self, _cookie: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_set_and_get_tokens() {
        let storage = TokenStorage::new(MemoryJar::default(), false);
        storage.set_token("test-token").unwrap();
        storage.set_refresh_token("test-refresh-token").unwrap();
        assert_eq!(storage.get_token().as_deref(), Some("test-token"));
        assert_eq!(storage.get_refresh_token().as_deref(), Some("test-refresh-token"));
    }

    #[test]
    fn test_clear_tokens() {
        let storage = TokenStorage::new(MemoryJar::default(), false);
        storage.set_token("token").unwrap();
        storage.set_refresh_token("refresh-token").unwrap();
        storage.clear_tokens();
        assert_eq!(storage.get_token(), None);
        assert_eq!(storage.get_refresh_token(), None);
    }

    #[test]
    fn test_missing_tokens_are_none() {
        let storage = TokenStorage::new(MemoryJar::default(), false);
        assert_eq!(storage.get_token(), None);
        assert_eq!(storage.get_refresh_token(), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let storage = TokenStorage::new(MemoryJar::default(), true);
        storage.set_token("a.b.c").unwrap();
        let writes = storage.jar.writes.borrow();
        assert_eq!(
            writes[0],
            "platzi_auth_token=a.b.c; path=/; max-age=604800; SameSite=Strict; Secure"
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let cookie = format_cookie("k", "a b;c%", false);
        assert!(cookie.starts_with("k=a%20b%3Bc%25;"));
        assert_eq!(find_cookie("x=1; k=a%20b%3Bc%25", "k").as_deref(), Some("a b;c%"));
    }

    #[test]
    fn test_find_cookie_ignores_empty_and_prefix_names() {
        assert_eq!(find_cookie("platzi_auth_token=", TOKEN_KEY), None);
        assert_eq!(find_cookie("xplatzi_auth_token=zzz", TOKEN_KEY), None);
        assert_eq!(find_cookie("", TOKEN_KEY), None);
    }

    #[test]
    fn test_failures_are_contained() {
        let storage = TokenStorage::new(BrokenJar, false);
        assert_eq!(storage.get_token(), None);
        assert!(storage.set_token("t").is_err());
        storage.clear_tokens();
    }
}
