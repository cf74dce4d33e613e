//! ClientDesk Server Library
//!
//! JSON REST backend for a small client-administration panel.
//!
//! # Overview
//!
//! - **Auth**: email/password login issuing HS256 access tokens
//! - **Clients**: CRUD over client records with soft delete and dashboard metrics
//! - **Audit trail**: one immutable record per mutation, tracked read and login,
//!   with before/after snapshots and request provenance
//!
//! # Architecture
//!
//! Features are vertical slices (`commands/`, `queries/`, `routes.rs`) over
//! store traits with Postgres and in-memory backends. Audit writes are explicit
//! calls at each mutation site and are best effort: a failing audit store is
//! logged and never fails the business operation.
//!
//! # Example
//!
//! ```no_run
//! use clientdesk_server::{api, config::Config, state::AppState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let state = AppState::in_memory(&config.auth);
//!     api::serve(&config, state).await
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod api;
pub mod audit;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;
pub mod seed;
pub mod state;

pub use error::{AppError, AppResult};
