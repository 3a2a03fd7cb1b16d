// Browser sessions, flash messages and access guards

pub mod flash;
pub mod middleware;
pub mod session;

pub use flash::{Flash, FlashLevel};
pub use middleware::{security_headers_layer, RequireUser};
pub use session::UserSession;
