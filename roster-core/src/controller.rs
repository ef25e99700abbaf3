//! Synchronization controller.
//!
//! Keeps the [`CollectionStore`] consistent with the remote collection:
//!
//! 1. `mount` lists the collection (`Loading` -> `Ready` or `Failed`)
//! 2. create/update/delete intents each spawn one task
//! 3. a task's completion applies exactly one store mutation and one
//!    notification
//!
//! Intents are not serialized. Concurrent tasks reconcile in completion
//! order, so the last response to arrive wins for a given record.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;

use crate::client::{ClientError, Operation, RemoteCollection};
use crate::models::Employee;
use crate::notify::{Notifier, NotifyKind};
use crate::session::EditSession;
use crate::store::CollectionStore;
use crate::validation::{validate, ValidationError};

/// Top-level lifecycle of the collection view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Not mounted yet
    Idle,
    Loading,
    Ready,
    /// Initial listing failed; mutations are still allowed
    Failed,
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Idle => write!(f, "idle"),
            ViewState::Loading => write!(f, "loading"),
            ViewState::Ready => write!(f, "ready"),
            ViewState::Failed => write!(f, "failed"),
        }
    }
}

/// How a mutation task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(Employee),
    Updated(Employee),
    Deleted(String),
    Failed(ClientError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed(_))
    }
}

/// Reasons an intent is refused before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("No employee form is open")]
    NoSession,

    #[error("The employee being edited has no identifier")]
    MissingIdentifier,
}

struct Shared {
    remote: Arc<dyn RemoteCollection>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ViewState>,
    store: Mutex<CollectionStore>,
    session: Mutex<EditSession>,
}

/// Owns the view state, the store and the edit session.
///
/// Cloning is cheap and every clone drives the same state.
#[derive(Clone)]
pub struct SyncController {
    shared: Arc<Shared>,
}

impl SyncController {
    pub fn new(remote: Arc<dyn RemoteCollection>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            shared: Arc::new(Shared {
                remote,
                notifier,
                state: Mutex::new(ViewState::Idle),
                store: Mutex::new(CollectionStore::new()),
                session: Mutex::new(EditSession::new()),
            }),
        }
    }

    pub async fn state(&self) -> ViewState {
        *self.shared.state.lock().await
    }

    /// Locks the store for reading by the presentation layer.
    pub async fn store(&self) -> MutexGuard<'_, CollectionStore> {
        self.shared.store.lock().await
    }

    /// Snapshot of the current records.
    pub async fn records(&self) -> Vec<Employee> {
        self.shared.store.lock().await.records().to_vec()
    }

    /// Locks the edit session so the form can be opened, filled or closed.
    pub async fn session(&self) -> MutexGuard<'_, EditSession> {
        self.shared.session.lock().await
    }

    /// Enters `Loading` and finishes the initial load in the background.
    pub async fn mount(&self) -> JoinHandle<ViewState> {
        self.begin_load().await;
        let controller = self.clone();
        tokio::spawn(async move { controller.finish_load().await })
    }

    /// Lists the collection and replaces the store with the result.
    pub async fn load(&self) -> ViewState {
        self.begin_load().await;
        self.finish_load().await
    }

    async fn begin_load(&self) {
        *self.shared.state.lock().await = ViewState::Loading;
        self.shared.store.lock().await.set_loading(true);
    }

    async fn finish_load(&self) -> ViewState {
        let shared = &self.shared;
        let result = shared.remote.list().await;

        let next = {
            let mut store = shared.store.lock().await;
            store.set_loading(false);
            match result {
                Ok(records) => {
                    tracing::info!(count = records.len(), "employees loaded");
                    store.replace_all(records);
                    ViewState::Ready
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to load employees");
                    store.fail(e.to_string());
                    ViewState::Failed
                }
            }
        };

        *shared.state.lock().await = next;
        next
    }

    /// Submits the open form: create when no record is under edit, update
    /// otherwise.
    pub async fn submit(&self) -> Result<JoinHandle<Outcome>, SubmitError> {
        let (draft, target) = {
            let session = self.shared.session.lock().await;
            if !session.is_open() {
                return Err(SubmitError::NoSession);
            }
            (
                session.draft().clone(),
                session.target_id().map(str::to_string),
            )
        };

        match target {
            None => self.create(draft),
            Some(id) => self.update(&id, draft),
        }
    }

    /// Validates `draft` and spawns its create request.
    pub fn create(&self, draft: Employee) -> Result<JoinHandle<Outcome>, SubmitError> {
        validate(&draft)?;

        let shared = Arc::clone(&self.shared);
        Ok(tokio::spawn(shared.run_create(draft)))
    }

    /// Validates `record` and spawns its update request for `id`.
    pub fn update(&self, id: &str, record: Employee) -> Result<JoinHandle<Outcome>, SubmitError> {
        if id.is_empty() {
            return Err(SubmitError::MissingIdentifier);
        }
        validate(&record)?;

        let shared = Arc::clone(&self.shared);
        Ok(tokio::spawn(shared.run_update(id.to_string(), record)))
    }

    /// Spawns a delete request. The record stays in the store until the
    /// server confirms.
    pub fn delete(&self, id: &str) -> JoinHandle<Outcome> {
        let shared = Arc::clone(&self.shared);
        tokio::spawn(shared.run_delete(id.to_string()))
    }
}

impl Shared {
    async fn run_create(self: Arc<Self>, draft: Employee) -> Outcome {
        let result = match self.remote.create(&draft).await {
            Ok(created) if !created.has_id() => Err(ClientError::MissingIdentifier),
            other => other,
        };

        let created = match result {
            Ok(created) => created,
            Err(e) => return self.reject(Operation::Create, e),
        };

        if let Err(e) = self.store.lock().await.append(created.clone()) {
            tracing::error!(error = %e, "created employee could not be stored");
        }
        self.session.lock().await.close();

        tracing::info!(id = %created.id, "employee created");
        self.notifier.notify(
            &format!("{} has been added.", draft.full_name()),
            NotifyKind::Success,
        );
        Outcome::Created(created)
    }

    async fn run_update(self: Arc<Self>, id: String, record: Employee) -> Outcome {
        let result = match self.remote.update(&id, &record).await {
            Ok(updated) if !updated.has_id() => Err(ClientError::MissingIdentifier),
            other => other,
        };

        let updated = match result {
            Ok(updated) => updated,
            Err(e) => return self.reject(Operation::Update, e),
        };

        if updated.id != id {
            tracing::warn!(requested = %id, confirmed = %updated.id, "server confirmed a different identifier");
        }
        self.store.lock().await.replace_by_id(updated.clone());
        self.session.lock().await.close();

        tracing::info!(id = %updated.id, "employee updated");
        self.notifier.notify(
            &format!("{} has been updated.", record.full_name()),
            NotifyKind::Success,
        );
        Outcome::Updated(updated)
    }

    async fn run_delete(self: Arc<Self>, id: String) -> Outcome {
        if let Err(e) = self.remote.delete(&id).await {
            return self.reject(Operation::Delete, e);
        }

        self.store.lock().await.remove_by_id(&id);

        tracing::info!(%id, "employee deleted");
        self.notifier
            .notify("Employee deleted successfully.", NotifyKind::Success);
        Outcome::Deleted(id)
    }

    /// Failure path shared by every mutation: the store is left alone.
    fn reject(&self, operation: Operation, error: ClientError) -> Outcome {
        tracing::warn!(%operation, error = %error, "employee mutation failed");
        self.notifier.notify(&error.to_string(), NotifyKind::Error);
        Outcome::Failed(error)
    }
}
