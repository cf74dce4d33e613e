//! ClientDesk Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging bootstrap for the ClientDesk workspace.
//!
//! # Example
//!
//! ```no_run
//! use clientdesk_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> clientdesk_common::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     let _guard = init_logging(&config)?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{CommonError, Result};
