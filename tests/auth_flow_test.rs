mod common;

use axum::http::StatusCode;
use common::{TestApp, TEST_EMAIL, TEST_UID};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_health_check_endpoint() {
    let mut app = TestApp::new().await;

    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "cardio-predict");
    assert_eq!(body["model_trees"], 3);
}

#[tokio::test]
async fn test_root_redirects_home() {
    let mut app = TestApp::new().await;

    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/home"));
}

#[tokio::test]
async fn test_static_pages_render_for_anonymous_users() {
    let mut app = TestApp::new().await;

    for uri in ["/home", "/about", "/todo", "/login", "/register", "/forgot_password"] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::OK, "{}", uri);
        assert!(response.body.contains(r#"<a href="/login">Login</a>"#), "{}", uri);
    }
}

#[tokio::test]
async fn test_login_starts_session_and_flashes_welcome() {
    let mut app = TestApp::new().await;
    app.login().await;

    let home = app.get("/home").await;
    assert!(home.body.contains("Welcome back, jane!"));
    assert!(home.body.contains(r#"<a href="/logout">Logout</a>"#));

    // flash is shown once
    let again = app.get("/home").await;
    assert!(!again.body.contains("Welcome back"));
}

#[tokio::test]
async fn test_login_defaults_username_without_profile_record() {
    let mut app = TestApp::new().await;
    app.mock_sign_in().await;
    app.mock_user_record(json!(null)).await;

    let response = app
        .post_form("/login", &[("email", TEST_EMAIL), ("password", "secret1")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/home"));

    let home = app.get("/home").await;
    assert!(home.body.contains("Welcome back, User!"));
}

#[tokio::test]
async fn test_login_failure_shows_identity_error() {
    let mut app = TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "INVALID_LOGIN_CREDENTIALS" }
        })))
        .mount(&app.firebase)
        .await;

    let response = app
        .post_form("/login", &[("email", TEST_EMAIL), ("password", "wrong")])
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body.contains("Login failed: INVALID_LOGIN_CREDENTIALS"));
    assert!(!app.has_cookie("session"));
}

#[tokio::test]
async fn test_login_rejects_malformed_email_without_calling_backend() {
    let mut app = TestApp::new().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.firebase)
        .await;

    let response = app
        .post_form("/login", &[("email", "not-an-email"), ("password", "x")])
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body.contains("Login failed:"));
}

#[tokio::test]
async fn test_register_writes_profile_and_starts_session() {
    let mut app = TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signUp"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "localId": TEST_UID,
            "email": TEST_EMAIL,
            "idToken": "token"
        })))
        .expect(1)
        .mount(&app.firebase)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/users/{}.json", TEST_UID)))
        .and(body_json(json!({ "username": "jane", "email": TEST_EMAIL })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "jane",
            "email": TEST_EMAIL
        })))
        .expect(1)
        .mount(&app.firebase)
        .await;

    let response = app
        .post_form(
            "/register",
            &[("email", TEST_EMAIL), ("password", "secret1"), ("username", "jane")],
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/home"));
    assert!(app.has_cookie("session"));

    let home = app.get("/home").await;
    assert!(home.body.contains("Registration successful! Welcome!"));
}

#[tokio::test]
async fn test_register_failure_rerenders_form() {
    let mut app = TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signUp"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "EMAIL_EXISTS" }
        })))
        .mount(&app.firebase)
        .await;

    let response = app
        .post_form(
            "/register",
            &[("email", TEST_EMAIL), ("password", "secret1"), ("username", "jane")],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("Registration failed: EMAIL_EXISTS"));
    assert!(!app.has_cookie("session"));
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let mut app = TestApp::new().await;

    let response = app
        .post_form(
            "/register",
            &[("email", TEST_EMAIL), ("password", "abc"), ("username", "jane")],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("Registration failed:"));
    assert!(response.body.contains("at least 6 characters"));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let mut app = TestApp::new().await;
    app.login().await;

    let response = app.get("/logout").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));
    assert!(!app.has_cookie("session"));

    let login = app.get("/login").await;
    assert!(login.body.contains("Logged out successfully."));

    let profile = app.get("/profile").await;
    assert_eq!(profile.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_profile_requires_login() {
    let mut app = TestApp::new().await;

    let response = app.get("/profile").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_profile_shows_record_and_history() {
    let mut app = TestApp::new().await;
    app.login().await;
    Mock::given(method("GET"))
        .and(path(format!("/predictions/{}.json", TEST_UID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "-NaAa": {
                "data": {
                    "age": 63, "sex": 1, "cp": 3, "trestbps": 145.0, "chol": 233.0,
                    "fbs": 1, "restecg": 0, "thalach": 150.0, "exang": 0,
                    "oldpeak": 2.3, "slope": 0, "ca": 0.0, "thal": 1
                },
                "prediction": "Angina"
            }
        })))
        .mount(&app.firebase)
        .await;

    let response = app.get("/profile").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Username: jane"));
    assert!(response.body.contains(&format!("Email: {}", TEST_EMAIL)));
    assert!(response.body.contains("<td>Angina</td><td>63</td>"));
}

#[tokio::test]
async fn test_profile_reports_storage_failure_inline() {
    let mut app = TestApp::new().await;
    app.login().await;
    Mock::given(method("GET"))
        .and(path(format!("/predictions/{}.json", TEST_UID)))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Permission denied"
        })))
        .mount(&app.firebase)
        .await;

    let response = app.get("/profile").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Error: Permission denied"));
    assert!(response.body.contains("No predictions saved yet."));
}

#[tokio::test]
async fn test_forgot_password_sends_reset_email() {
    let mut app = TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:sendOobCode"))
        .and(body_json(json!({ "requestType": "PASSWORD_RESET", "email": TEST_EMAIL })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "email": TEST_EMAIL })))
        .expect(1)
        .mount(&app.firebase)
        .await;

    let response = app
        .post_form("/forgot_password", &[("email", TEST_EMAIL)])
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));

    let login = app.get("/login").await;
    assert!(login.body.contains("Password reset email sent!"));
}

#[tokio::test]
async fn test_forgot_password_failure_flashes_error() {
    let mut app = TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:sendOobCode"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "EMAIL_NOT_FOUND" }
        })))
        .mount(&app.firebase)
        .await;

    let response = app
        .post_form("/forgot_password", &[("email", TEST_EMAIL)])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"<div class="flash flash-danger">Error: EMAIL_NOT_FOUND</div>"#));
}

#[tokio::test]
async fn test_session_keeps_identity_backend_email() {
    let mut app = TestApp::new().await;
    app.mock_sign_in().await;
    app.mock_user_record(json!(null)).await;
    Mock::given(method("GET"))
        .and(path(format!("/predictions/{}.json", TEST_UID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&app.firebase)
        .await;

    let response = app
        .post_form("/login", &[("email", "JANE@example.com"), ("password", "secret1")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let profile = app.get("/profile").await;
    assert_eq!(profile.status, StatusCode::OK);
    assert!(profile.body.contains(&format!("Email: {}", TEST_EMAIL)));
    assert!(profile.body.contains("Username: User"));
}
