use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::{error, info, warn};
use validator::Validate;

use super::pages::RenderParts;
use super::views::{self, PageContext};
use crate::auth::{Flash, RequireUser, UserSession};
use crate::error::AppError;
use crate::models::{
    describe_errors, ForgotPasswordForm, LoginForm, RegisterForm, UserProfile, ValidationError,
    DEFAULT_USERNAME,
};
use crate::state::AppState;

/// Authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
        .route("/logout", get(logout))
        .route("/forgot_password", get(forgot_password_page).post(forgot_password))
        .route("/profile", get(profile))
}

async fn login_page(jar: PrivateCookieJar) -> (PrivateCookieJar, Html<String>) {
    let (jar, parts) = RenderParts::take(jar);
    (jar, views::login(&parts.context(), None))
}

/// Sign in and start a session
#[tracing::instrument(skip(state, jar, form))]
async fn login(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let result = match form.validate() {
        Ok(()) => sign_in(&state, &form).await,
        Err(errors) => Err(ValidationError::Invalid(describe_errors(&errors)).into()),
    };

    match result {
        Ok(session) => {
            let secure = state.secure_cookies();
            let flash = Flash::success(format!("Welcome back, {}!", session.username));
            let jar = flash.store(session.store(jar, secure), secure);
            (jar, Redirect::to("/home")).into_response()
        }
        Err(e) => {
            warn!("Login failed: {}", e);
            let (jar, parts) = RenderParts::take(jar);
            let message = format!("Login failed: {}", e);
            (
                StatusCode::UNAUTHORIZED,
                jar,
                views::login(&parts.context(), Some(&message)),
            )
                .into_response()
        }
    }
}

async fn sign_in(state: &AppState, form: &LoginForm) -> Result<UserSession, AppError> {
    let user = state.identity.sign_in(&form.email, &form.password).await?;
    let username = state
        .records
        .get_user(&user.local_id)
        .await?
        .map(|profile| profile.username)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_USERNAME.to_string());

    // the identity backend reports the canonical address
    let email = if user.email.is_empty() {
        form.email.clone()
    } else {
        user.email
    };

    Ok(UserSession {
        uid: user.local_id,
        username,
        email,
    })
}

async fn register_page(jar: PrivateCookieJar) -> (PrivateCookieJar, Html<String>) {
    let (jar, parts) = RenderParts::take(jar);
    (jar, views::register(&parts.context(), None))
}

/// Create an account, store its profile and start a session
#[tracing::instrument(skip(state, jar, form))]
async fn register(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let result = match form.validate() {
        Ok(()) => sign_up(&state, &form).await,
        Err(errors) => Err(ValidationError::Invalid(describe_errors(&errors)).into()),
    };

    match result {
        Ok(session) => {
            let secure = state.secure_cookies();
            let flash = Flash::success("Registration successful! Welcome!");
            let jar = flash.store(session.store(jar, secure), secure);
            (jar, Redirect::to("/home")).into_response()
        }
        Err(e) => {
            warn!("Registration failed: {}", e);
            let (jar, parts) = RenderParts::take(jar);
            let message = format!("Registration failed: {}", e);
            (
                StatusCode::BAD_REQUEST,
                jar,
                views::register(&parts.context(), Some(&message)),
            )
                .into_response()
        }
    }
}

async fn sign_up(state: &AppState, form: &RegisterForm) -> Result<UserSession, AppError> {
    let user = state.identity.sign_up(&form.email, &form.password).await?;
    let profile = UserProfile {
        username: form.display_name(),
        email: form.email.clone(),
    };
    state.records.put_user(&user.local_id, &profile).await?;

    Ok(UserSession {
        uid: user.local_id,
        username: profile.username,
        email: profile.email,
    })
}

async fn logout(State(state): State<AppState>, jar: PrivateCookieJar) -> (PrivateCookieJar, Redirect) {
    if let Some(session) = UserSession::from_jar(&jar) {
        info!(uid = %session.uid, "Logged out");
    }
    let jar = Flash::info("Logged out successfully.").store(UserSession::clear(jar), state.secure_cookies());
    (jar, Redirect::to("/login"))
}

async fn forgot_password_page(jar: PrivateCookieJar) -> (PrivateCookieJar, Html<String>) {
    let (jar, parts) = RenderParts::take(jar);
    (jar, views::forgot_password(&parts.context()))
}

/// Ask the identity backend to email a reset link
#[tracing::instrument(skip(state, jar, form))]
async fn forgot_password(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<ForgotPasswordForm>,
) -> Response {
    let result = match form.validate() {
        Ok(()) => state.identity.send_password_reset(&form.email).await,
        Err(errors) => Err(ValidationError::Invalid(describe_errors(&errors)).into()),
    };

    match result {
        Ok(()) => {
            let jar = Flash::success("Password reset email sent!").store(jar, state.secure_cookies());
            (jar, Redirect::to("/login")).into_response()
        }
        Err(e) => {
            warn!("Password reset failed: {}", e);
            let (jar, mut parts) = RenderParts::take(jar);
            parts.flash = Some(Flash::danger(format!("Error: {}", e)));
            (jar, views::forgot_password(&parts.context())).into_response()
        }
    }
}

/// Profile and prediction history of the signed-in user
#[tracing::instrument(skip(state, jar, session), fields(uid = %session.uid))]
async fn profile(
    State(state): State<AppState>,
    RequireUser(session): RequireUser,
    jar: PrivateCookieJar,
) -> (PrivateCookieJar, Html<String>) {
    let (jar, parts) = RenderParts::take(jar);
    let mut errors = Vec::new();

    let profile = match state.records.get_user(&session.uid).await {
        Ok(Some(profile)) => profile,
        Ok(None) => UserProfile {
            username: session.username.clone(),
            email: session.email.clone(),
        },
        Err(e) => {
            error!("Failed to load profile: {}", e);
            errors.push(e.to_string());
            UserProfile {
                username: session.username.clone(),
                email: session.email.clone(),
            }
        }
    };

    let history = match state.records.list_predictions(&session.uid).await {
        Ok(history) => history,
        Err(e) => {
            error!("Failed to load prediction history: {}", e);
            errors.push(e.to_string());
            Vec::new()
        }
    };

    let error = (!errors.is_empty()).then(|| format!("Error: {}", errors.join("; ")));
    let ctx = PageContext {
        user: Some(&session),
        flash: parts.flash.as_ref(),
    };
    (jar, views::profile(&ctx, &profile, &history, error.as_deref()))
}
