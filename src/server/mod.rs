//! Server-side modules for the Roster employees API.

pub mod routes;
pub mod storage;

pub use routes::{check_employee, router, ApiError, AppState};
pub use storage::{init_db, EmployeeRepository, StorageError};
