use axum::{
    response::{Html, Redirect},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::PrivateCookieJar;

use super::views::{self, PageContext};
use crate::auth::{Flash, UserSession};
use crate::state::AppState;

/// Static pages
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/home", get(home))
        .route("/about", get(about))
        .route("/todo", get(todo))
}

/// Session and pending flash for rendering a page.
///
/// The returned jar has the flash removed so it is shown only once.
pub(crate) struct RenderParts {
    pub user: Option<UserSession>,
    pub flash: Option<Flash>,
}

impl RenderParts {
    pub fn take(jar: PrivateCookieJar) -> (PrivateCookieJar, Self) {
        let user = UserSession::from_jar(&jar);
        let (jar, flash) = Flash::take(jar);
        (jar, Self { user, flash })
    }

    pub fn context(&self) -> PageContext<'_> {
        PageContext {
            user: self.user.as_ref(),
            flash: self.flash.as_ref(),
        }
    }
}

async fn root() -> Redirect {
    Redirect::to("/home")
}

async fn home(jar: PrivateCookieJar) -> (PrivateCookieJar, Html<String>) {
    let (jar, parts) = RenderParts::take(jar);
    (jar, views::home(&parts.context()))
}

async fn about(jar: PrivateCookieJar) -> (PrivateCookieJar, Html<String>) {
    let (jar, parts) = RenderParts::take(jar);
    (jar, views::about(&parts.context()))
}

async fn todo(jar: PrivateCookieJar) -> (PrivateCookieJar, Html<String>) {
    let (jar, parts) = RenderParts::take(jar);
    (jar, views::todo(&parts.context()))
}
