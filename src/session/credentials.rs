//! Persistence of the access token and role between visits.

use crate::config::CREDENTIAL_COOKIE_DAYS;
use chrono::{DateTime, Duration, Utc};

pub const TOKEN_COOKIE: &str = "accessToken";
pub const ROLE_COOKIE: &str = "role";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub role: String,
}

impl Credentials {
    /// Both parts must be non-empty to count as credentials.
    pub fn new(access_token: &str, role: &str) -> Option<Self> {
        if access_token.is_empty() || role.is_empty() {
            return None;
        }
        Some(Self {
            access_token: access_token.to_string(),
            role: role.to_string(),
        })
    }
}

pub trait CredentialStore {
    fn load(&self) -> Option<Credentials>;
    fn save(&mut self, credentials: &Credentials);
    /// Remove token and role together.
    fn clear(&mut self);
}

/// Keeps credentials for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    saved: Option<Credentials>,
}

impl MemoryCredentialStore {
    pub fn new(saved: Option<Credentials>) -> Self {
        Self { saved }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<Credentials> {
        self.saved.clone()
    }

    fn save(&mut self, credentials: &Credentials) {
        self.saved = Some(credentials.clone());
    }

    fn clear(&mut self) {
        self.saved = None;
    }
}

fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// `document.cookie` assignment that stores `value` until `expires`.
pub fn cookie_assignment(name: &str, value: &str, expires: DateTime<Utc>) -> String {
    format!(
        "{name}={}; expires={}; path=/; SameSite=Lax",
        urlencoding::encode(value),
        http_date(expires)
    )
}

/// `document.cookie` assignment that deletes `name`.
pub fn cookie_removal(name: &str) -> String {
    format!("{name}=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/")
}

/// Look up one cookie in a `document.cookie` string.
pub fn parse_cookie(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key != name || value.is_empty() {
            return None;
        }
        urlencoding::decode(value).ok().map(|v| v.into_owned())
    })
}

pub fn cookie_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(CREDENTIAL_COOKIE_DAYS)
}

#[cfg(target_arch = "wasm32")]
pub use cookie::CookieCredentialStore;

#[cfg(target_arch = "wasm32")]
mod cookie {
    use super::*;
    use wasm_bindgen::JsCast;
    use web_sys::HtmlDocument;

    /// Stores credentials in two browser cookies.
    #[derive(Debug, Default)]
    pub struct CookieCredentialStore;

    impl CookieCredentialStore {
        fn document() -> Option<HtmlDocument> {
            web_sys::window()?
                .document()?
                .dyn_into::<HtmlDocument>()
                .ok()
        }

        fn write(assignment: &str) {
            if let Some(doc) = Self::document() {
                if doc.set_cookie(assignment).is_err() {
                    tracing::warn!("could not write credential cookie");
                }
            }
        }
    }

    impl CredentialStore for CookieCredentialStore {
        fn load(&self) -> Option<Credentials> {
            let header = Self::document()?.cookie().ok()?;
            let token = parse_cookie(&header, TOKEN_COOKIE)?;
            let role = parse_cookie(&header, ROLE_COOKIE)?;
            Credentials::new(&token, &role)
        }

        fn save(&mut self, credentials: &Credentials) {
            let expires = cookie_expiry(Utc::now());
            Self::write(&cookie_assignment(ROLE_COOKIE, &credentials.role, expires));
            Self::write(&cookie_assignment(
                TOKEN_COOKIE,
                &credentials.access_token,
                expires,
            ));
        }

        fn clear(&mut self) {
            Self::write(&cookie_removal(TOKEN_COOKIE));
            Self::write(&cookie_removal(ROLE_COOKIE));
        }
    }
}

/// The store used by the running app on this platform.
#[cfg(target_arch = "wasm32")]
pub fn platform_store() -> Box<dyn CredentialStore> {
    Box::new(CookieCredentialStore)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn platform_store() -> Box<dyn CredentialStore> {
    Box::new(MemoryCredentialStore::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn credentials_need_both_parts() {
        assert!(Credentials::new("tok", "").is_none());
        assert!(Credentials::new("", "admin").is_none());
        assert!(Credentials::new("tok", "admin").is_some());
    }

    #[test]
    fn assignment_encodes_value_and_expiry() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let cookie = cookie_assignment(TOKEN_COOKIE, "a b;c", cookie_expiry(at));
        assert_eq!(
            cookie,
            "accessToken=a%20b%3Bc; expires=Mon, 08 Jan 2024 12:00:00 GMT; path=/; SameSite=Lax"
        );
    }

    #[test]
    fn parse_finds_named_cookie() {
        let header = "theme=dark; accessToken=abc%3D%3D; role=user";
        assert_eq!(parse_cookie(header, TOKEN_COOKIE).as_deref(), Some("abc=="));
        assert_eq!(parse_cookie(header, ROLE_COOKIE).as_deref(), Some("user"));
        assert_eq!(parse_cookie(header, "missing"), None);
        assert_eq!(parse_cookie("accessToken=", TOKEN_COOKIE), None);
    }

    #[test]
    fn removal_expires_in_the_past() {
        assert!(cookie_removal(ROLE_COOKIE).starts_with("role=; expires=Thu, 01 Jan 1970"));
    }

    #[test]
    fn memory_store_round() {
        let mut store = MemoryCredentialStore::default();
        let creds = Credentials::new("tok", "admin").unwrap();
        store.save(&creds);
        assert_eq!(store.load(), Some(creds));
        store.clear();
        assert_eq!(store.load(), None);
    }
}
