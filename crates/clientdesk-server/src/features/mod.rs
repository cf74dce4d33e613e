//! Feature modules implementing the ClientDesk API
//!
//! Each feature is a vertical slice:
//! - `commands/` - write operations
//! - `queries/` - read operations
//! - `routes.rs` - HTTP handlers and error mapping
//!
//! # Features
//!
//! - **auth**: login, access tokens, the authenticated-actor extractor
//! - **clients**: client records, dashboard metrics
//! - **shared**: pagination, validation, request context

pub mod auth;
pub mod clients;
pub mod shared;
