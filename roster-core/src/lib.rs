//! Roster Core Library
//!
//! Employee records and the logic that keeps a local, in-memory copy of the
//! remote employees collection in step with the server.

pub mod client;
pub mod controller;
pub mod models;
pub mod notify;
pub mod session;
pub mod store;
pub mod validation;

pub use client::{ClientError, ClientResult, HttpEmployeeClient, Operation, RemoteCollection};
pub use controller::{Outcome, SubmitError, SyncController, ViewState};
pub use models::{Employee, Gender};
pub use notify::{Notification, Notifier, NotifyKind, RecordingNotifier};
pub use session::{EditSession, FormMode};
pub use store::{CollectionStore, StoreError};
pub use validation::{is_valid_email, validate, ValidationError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
