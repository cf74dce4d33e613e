//! Shared utilities and types for feature modules
//!
//! - **context**: request provenance extractor used by audited operations
//! - **pagination**: page/limit parameters and the paged response shape
//! - **validation**: input validation helpers

pub mod context;
pub mod pagination;
pub mod validation;

pub use context::RequestContext;
pub use pagination::{Page, PaginationParams};
pub use validation::{validate_amount, validate_name, NameValidationError};
