//! Edit-session state: which record, if any, the form is editing.

use crate::models::{Employee, Gender};

/// What a form submission will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Holds at most one record under edit plus the form draft.
///
/// Submissions route to create while `current` is empty and to update
/// (using `current`'s identifier) otherwise.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    current: Option<Employee>,
    draft: Employee,
    open: bool,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a blank creation form. Gender defaults to Male.
    pub fn start_create(&mut self) {
        self.current = None;
        self.draft = Employee {
            gender: Gender::Male,
            ..Employee::default()
        };
        self.open = true;
    }

    /// Opens the form on `record`, replacing any previous draft entirely.
    pub fn start_edit(&mut self, record: Employee) {
        self.draft = record.clone();
        self.current = Some(record);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.current = None;
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> FormMode {
        match self.current {
            Some(_) => FormMode::Edit,
            None => FormMode::Create,
        }
    }

    /// The record being edited, if any.
    pub fn current(&self) -> Option<&Employee> {
        self.current.as_ref()
    }

    /// Identifier a submission would update.
    pub fn target_id(&self) -> Option<&str> {
        self.current.as_ref().map(|r| r.id.as_str())
    }

    pub fn draft(&self) -> &Employee {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Employee {
        &mut self.draft
    }
}
