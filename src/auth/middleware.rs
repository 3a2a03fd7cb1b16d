use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::HeaderName, request::Parts, HeaderValue},
    response::Redirect,
};
use axum_extra::extract::cookie::{Key, PrivateCookieJar};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::auth::UserSession;

/// Extractor for routes that need a signed-in user.
///
/// Anonymous requests are redirected to the login page.
#[derive(Debug, Clone)]
pub struct RequireUser(pub UserSession);

#[async_trait]
impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .map_err(|_| Redirect::to("/login"))?;

        UserSession::from_jar(&jar)
            .map(RequireUser)
            .ok_or_else(|| Redirect::to("/login"))
    }
}

/// Security headers middleware
pub fn security_headers_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    )
}
