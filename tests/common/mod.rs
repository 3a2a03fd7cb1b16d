#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cardio_predict::api::routes::create_routes;
use cardio_predict::config::{FirebaseConfig, GeminiConfig};
use cardio_predict::{AppConfig, AppState};

pub const TEST_UID: &str = "uid-123";
pub const TEST_EMAIL: &str = "jane@example.com";
pub const GEMINI_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

/// Form values for a complete prediction request.
pub const SAMPLE_FORM: [(&str, &str); 13] = [
    ("age", "63"),
    ("sex", "1"),
    ("cp", "3"),
    ("trestbps", "145"),
    ("chol", "233"),
    ("fbs", "1"),
    ("restecg", "0"),
    ("thalach", "150"),
    ("exang", "0"),
    ("oldpeak", "2.3"),
    ("slope", "0"),
    ("ca", "0"),
    ("thal", "1"),
];

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }
}

/// Router wired to mock Firebase and Gemini backends, with a browser-like cookie store.
pub struct TestApp {
    pub router: Router,
    pub firebase: MockServer,
    pub gemini: MockServer,
    cookies: BTreeMap<String, String>,
}

impl TestApp {
    pub async fn new() -> Self {
        let firebase = MockServer::start().await;
        let gemini = MockServer::start().await;

        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            log_level: "debug".to_string(),
            session_secret: None,
            model_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/heart_model.json"),
            upstream_timeout: Duration::from_secs(5),
            firebase: FirebaseConfig {
                api_key: "test-key".to_string(),
                identity_url: firebase.uri(),
                database_url: firebase.uri(),
                database_secret: None,
            },
            gemini: GeminiConfig {
                api_key: "gem-key".to_string(),
                model: "gemini-1.5-flash".to_string(),
                base_url: gemini.uri(),
            },
        };

        let state = AppState::from_config(config).expect("failed to build state");
        Self {
            router: create_routes(state),
            firebase,
            gemini,
            cookies: BTreeMap::new(),
        }
    }

    pub fn has_cookie(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, Body::empty()).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.send(
            Method::POST,
            uri,
            Some("application/x-www-form-urlencoded"),
            Body::from(body),
        )
        .await
    }

    pub async fn post_json(&mut self, uri: &str, body: Value) -> TestResponse {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&mut self, uri: &str, body: String) -> TestResponse {
        self.send(Method::POST, uri, Some("application/json"), Body::from(body))
            .await
    }

    pub async fn send(
        &mut self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: Body,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, cookie);
        }

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        for set_cookie in response.headers().get_all(header::SET_COOKIE) {
            let raw = set_cookie.to_str().unwrap();
            let pair = raw.split(';').next().unwrap_or_default();
            if let Some((name, value)) = pair.split_once('=') {
                if value.is_empty() {
                    self.cookies.remove(name.trim());
                } else {
                    self.cookies.insert(name.trim().to_string(), value.to_string());
                }
            }
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            location,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn mock_sign_in(&self) {
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "localId": TEST_UID,
                "email": TEST_EMAIL,
                "idToken": "token"
            })))
            .mount(&self.firebase)
            .await;
    }

    pub async fn mock_user_record(&self, record: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/users/{}.json", TEST_UID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(record))
            .mount(&self.firebase)
            .await;
    }

    pub async fn mock_gemini_reply(&self, text: &str) {
        Mock::given(method("POST"))
            .and(path(GEMINI_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": text }] } }]
            })))
            .mount(&self.gemini)
            .await;
    }

    pub async fn mock_gemini_error(&self, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path(GEMINI_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": { "code": status, "message": message }
            })))
            .mount(&self.gemini)
            .await;
    }

    /// Sign in as the test user; the profile record is served as `{username: "jane"}`.
    pub async fn login(&mut self) {
        self.mock_sign_in().await;
        self.mock_user_record(json!({ "username": "jane", "email": TEST_EMAIL }))
            .await;
        let response = self
            .post_form("/login", &[("email", TEST_EMAIL), ("password", "secret1")])
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert!(self.has_cookie("session"));
    }
}
