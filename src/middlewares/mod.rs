pub mod auth;
pub mod cors;

pub use auth::{current_user, require_admin, require_user, session_id, AuthMiddleware, AuthUser};
pub use cors::create_cors;
