//! Client management feature
//!
//! Client records with soft delete. Every mutation and every tracked read
//! writes its own audit record right after the primary write.

pub mod commands;
pub mod queries;
pub mod routes;
pub mod store;
pub mod types;

pub use routes::clients_routes;
pub use store::{ClientStore, InMemoryClientStore, PgClientStore};
pub use types::{Client, ClientMetrics};
