// Application configuration loaded from the environment

pub mod app;
pub mod upstream;

pub use app::AppConfig;
pub use upstream::{FirebaseConfig, GeminiConfig};
