// Model inference and upstream service clients

pub mod gemini_service;
pub mod heart_model_service;
pub mod identity_service;
pub mod prompts;
pub mod record_store;
pub mod upstream;

pub use gemini_service::GeminiService;
pub use heart_model_service::HeartModelService;
pub use identity_service::IdentityService;
pub use record_store::RecordStore;
