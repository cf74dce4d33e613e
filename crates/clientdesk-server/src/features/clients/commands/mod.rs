//! Client write operations. Each one records its audit entry explicitly.

pub mod create;
pub mod delete;
pub mod record_view;
pub mod update;

pub use create::{CreateClientCommand, CreateClientError};
pub use delete::{DeleteClientError, DeleteClientResponse};
pub use record_view::RecordViewError;
pub use update::{UpdateClientCommand, UpdateClientError};
