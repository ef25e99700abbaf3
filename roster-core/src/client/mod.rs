//! Remote collection client for the employees endpoint.
//!
//! ## Contract
//!
//! | operation | request                     | success                 |
//! |-----------|-----------------------------|-------------------------|
//! | list      | `GET /api/employees`        | 200, array of Employee  |
//! | create    | `POST /api/employees`       | 200/201, Employee       |
//! | update    | `PUT /api/employees/{id}`   | 200, Employee           |
//! | delete    | `DELETE /api/employees/{id}`| 200/204                 |
//!
//! Failures carry `{ "message" }` (or `{ "error" }`) payloads. Every call is a
//! single attempt; nothing is retried.

mod error;
mod http;

use async_trait::async_trait;
use std::fmt;

use crate::models::Employee;

pub use error::{ClientError, ClientResult, UNREACHABLE_MESSAGE};
pub use http::HttpEmployeeClient;

/// Base path of the employees collection.
pub const EMPLOYEES_PATH: &str = "/api/employees";

/// The four remote operations, used for logging and fallback messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Message used when a rejection carries no server-provided text.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch employees",
            Operation::Create => "Failed to create employee",
            Operation::Update => "Failed to update employee",
            Operation::Delete => "Failed to delete employee",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::List => write!(f, "list"),
            Operation::Create => write!(f, "create"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// The remote employees collection.
#[async_trait]
pub trait RemoteCollection: Send + Sync {
    /// Fetch every record, in server order.
    async fn list(&self) -> ClientResult<Vec<Employee>>;

    /// Create a record from a draft. The draft's identifier is never sent.
    async fn create(&self, draft: &Employee) -> ClientResult<Employee>;

    /// Replace the record stored under `id`.
    async fn update(&self, id: &str, record: &Employee) -> ClientResult<Employee>;

    /// Delete the record stored under `id`.
    async fn delete(&self, id: &str) -> ClientResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_messages() {
        assert_eq!(Operation::List.fallback_message(), "Failed to fetch employees");
        assert_eq!(Operation::Delete.fallback_message(), "Failed to delete employee");
        assert_eq!(Operation::Update.to_string(), "update");
    }
}
