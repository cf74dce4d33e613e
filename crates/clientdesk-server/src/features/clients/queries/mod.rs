pub mod get;
pub mod list;
pub mod metrics;

pub use get::GetClientError;
pub use list::{ListClientsError, ListClientsQuery};
