//! Shared-password authentication and the admin session cookie.
//!
//! The whole admin surface is gated by a single shared password. A
//! successful login sets one HttpOnly cookie with a fixed value; the check
//! is an exact comparison of that value. There are no users, roles or
//! sessions beyond this.

pub mod middleware;

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

pub const ADMIN_COOKIE_NAME: &str = "admin-authenticated";
pub const ADMIN_COOKIE_VALUE: &str = "true";

/// Cookie lifetime: 24 hours.
const ADMIN_COOKIE_MAX_AGE: u32 = 60 * 60 * 24;

/// Authentication service for the admin surface.
#[derive(Clone)]
pub struct AuthService {
    password: Option<String>,
    production: bool,
}

impl AuthService {
    pub fn new(password: Option<String>, production: bool) -> Self {
        Self {
            password,
            production,
        }
    }

    /// Compare a submitted password against the configured secret.
    /// Always false when no password is configured.
    pub fn verify_password(&self, candidate: &str) -> bool {
        match &self.password {
            Some(password) => candidate == password,
            None => false,
        }
    }

    /// Whether the request carries a valid admin session cookie.
    pub fn is_authenticated(&self, headers: &HeaderMap) -> bool {
        cookie_value(headers, ADMIN_COOKIE_NAME).as_deref() == Some(ADMIN_COOKIE_VALUE)
    }

    /// `Set-Cookie` value establishing the admin session.
    pub fn login_cookie(&self) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}",
            ADMIN_COOKIE_NAME, ADMIN_COOKIE_VALUE, ADMIN_COOKIE_MAX_AGE
        );
        if self.production {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value clearing the admin session.
    pub fn logout_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0",
            ADMIN_COOKIE_NAME
        )
    }
}

/// Pull one cookie's value out of the request's `Cookie` headers.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(raw: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(raw).unwrap());
        headers
    }

    #[test]
    fn verify_password_matches_configured_secret() {
        let auth = AuthService::new(Some("hunter2".to_string()), false);
        assert!(auth.verify_password("hunter2"));
        assert!(!auth.verify_password("Hunter2"));
    }

    #[test]
    fn verify_password_fails_when_unconfigured() {
        let auth = AuthService::new(None, false);
        assert!(!auth.verify_password(""));
        assert!(!auth.verify_password("anything"));
    }

    #[test]
    fn is_authenticated_requires_exact_cookie_value() {
        let auth = AuthService::new(Some("hunter2".to_string()), false);
        assert!(auth.is_authenticated(&headers_with_cookie("admin-authenticated=true")));
        assert!(!auth.is_authenticated(&headers_with_cookie("admin-authenticated=false")));
        assert!(!auth.is_authenticated(&headers_with_cookie("other=true")));
        assert!(!auth.is_authenticated(&HeaderMap::new()));
    }

    #[test]
    fn cookie_is_found_among_others() {
        let headers = headers_with_cookie("theme=dark; admin-authenticated=true; lang=en");
        assert_eq!(
            cookie_value(&headers, ADMIN_COOKIE_NAME),
            Some("true".to_string())
        );
    }

    #[test]
    fn secure_flag_only_in_production() {
        let dev = AuthService::new(None, false);
        assert!(!dev.login_cookie().contains("Secure"));

        let prod = AuthService::new(None, true);
        assert!(prod.login_cookie().contains("Secure"));
    }
}
