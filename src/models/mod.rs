// Data models and request/response schemas

pub mod assistant;
pub mod heart;
pub mod prediction;
pub mod user;
pub mod validation;

pub use assistant::*;
pub use heart::*;
pub use prediction::*;
pub use user::*;
pub use validation::*;
