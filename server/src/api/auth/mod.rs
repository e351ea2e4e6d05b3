//! Authentication module

mod context;
pub mod jwt;
mod manager;
pub mod middleware;

pub use context::AuthContext;
pub use jwt::{Claims, JwtError};
pub use manager::{AuthManager, IssuedToken};
pub use middleware::{AuthError, AuthState, extract_token, require_auth};
