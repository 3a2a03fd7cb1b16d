use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "session";

/// Signed-in user, kept in an encrypted cookie for the browser session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub uid: String,
    pub username: String,
    pub email: String,
}

impl UserSession {
    /// Session carried by the request, if any. Undecodable cookies count as none.
    pub fn from_jar(jar: &PrivateCookieJar) -> Option<Self> {
        let cookie = jar.get(SESSION_COOKIE)?;
        match serde_json::from_str(cookie.value()) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Discarding malformed session cookie: {}", e);
                None
            }
        }
    }

    pub fn store(&self, jar: PrivateCookieJar, secure: bool) -> PrivateCookieJar {
        // serializing three strings cannot fail
        let value = serde_json::to_string(self).unwrap_or_default();
        jar.add(session_cookie(SESSION_COOKIE, value, secure))
    }

    pub fn clear(jar: PrivateCookieJar) -> PrivateCookieJar {
        jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
    }
}

/// Browser-session cookie scoped to the whole site.
pub(crate) fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}
