//! Authentication feature
//!
//! Login with email and password, HS256 access tokens, and the [`AuthUser`]
//! extractor that guards the client and audit routes.

pub mod commands;
pub mod extractor;
pub mod jwt;
pub mod routes;
pub mod users;

pub use extractor::AuthUser;
pub use jwt::{Claims, JwtKeys};
pub use routes::auth_routes;
pub use users::{InMemoryUserStore, NewUser, PgUserStore, User, UserStore, PASSWORD_HASH_COST};
