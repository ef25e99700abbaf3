use clap::Args;
use roster_core::{Employee, Gender, Outcome, SyncController, ViewState};
use std::io::{self, Write};
use tokio::task::JoinHandle;

use super::{AlreadyReported, OutputFormat};
use crate::console::render_table;

/// Field values that may be set on create or changed on update.
#[derive(Args, Default)]
pub struct FieldArgs {
    /// First name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Gender (Male, Female, Other)
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number
    #[arg(long = "phone")]
    pub phone_number: Option<String>,

    /// Job title
    #[arg(long)]
    pub job_title: Option<String>,

    /// Department
    #[arg(long)]
    pub department: Option<String>,
}

impl FieldArgs {
    fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.gender.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.job_title.is_none()
            && self.department.is_none()
    }

    /// Overwrites the draft's fields with every value that was given.
    fn apply(&self, draft: &mut Employee) {
        if let Some(first_name) = &self.first_name {
            draft.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            draft.last_name = last_name.clone();
        }
        if let Some(gender) = self.gender {
            draft.gender = gender;
        }
        if let Some(email) = &self.email {
            draft.email = email.clone();
        }
        if let Some(phone_number) = &self.phone_number {
            draft.phone_number = phone_number.clone();
        }
        if let Some(job_title) = &self.job_title {
            draft.job_title = job_title.clone();
        }
        if let Some(department) = &self.department {
            draft.department = department.clone();
        }
    }
}

#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl ListCommand {
    pub async fn run(&self, controller: &SyncController) -> Result<(), Box<dyn std::error::Error>> {
        let state = controller.mount().await.await?;
        let store = controller.store().await;

        if state == ViewState::Failed {
            let message = store.error().unwrap_or("Failed to fetch employees");
            return Err(message.into());
        }

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(store.records())?);
            }
            OutputFormat::Text => {
                println!("{}", render_table(store.records()));
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct CreateCommand {
    #[command(flatten)]
    fields: FieldArgs,
}

impl CreateCommand {
    pub async fn run(&self, controller: &SyncController) -> Result<(), Box<dyn std::error::Error>> {
        {
            let mut session = controller.session().await;
            session.start_create();
            self.fields.apply(session.draft_mut());
        }

        let handle = controller.submit().await?;
        if let Outcome::Created(created) = finish(handle).await? {
            println!("{}", created);
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct UpdateCommand {
    /// Employee ID
    id: String,

    #[command(flatten)]
    fields: FieldArgs,
}

impl UpdateCommand {
    pub async fn run(&self, controller: &SyncController) -> Result<(), Box<dyn std::error::Error>> {
        if self.fields.is_empty() {
            return Err("Nothing to update. Provide at least one option.".into());
        }

        let record = find(controller, &self.id).await?;
        {
            let mut session = controller.session().await;
            session.start_edit(record);
            self.fields.apply(session.draft_mut());
        }

        let handle = controller.submit().await?;
        if let Outcome::Updated(updated) = finish(handle).await? {
            println!("{}", updated);
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct DeleteCommand {
    /// Employee ID
    id: String,

    /// Skip confirmation prompt
    #[arg(long, short)]
    force: bool,
}

impl DeleteCommand {
    pub async fn run(&self, controller: &SyncController) -> Result<(), Box<dyn std::error::Error>> {
        let record = find(controller, &self.id).await?;

        if !self.force {
            print!("Delete employee '{}'? [y/N] ", record.full_name());
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        finish(controller.delete(&record.id)).await?;
        Ok(())
    }
}

/// Loads the collection and looks up one record.
async fn find(controller: &SyncController, id: &str) -> Result<Employee, Box<dyn std::error::Error>> {
    if controller.load().await == ViewState::Failed {
        let store = controller.store().await;
        return Err(store.error().unwrap_or("Failed to fetch employees").into());
    }

    let store = controller.store().await;
    match store.get(id) {
        Some(record) => Ok(record.clone()),
        None => Err(format!("Employee not found: {}", id).into()),
    }
}

/// Waits for a mutation task. Failures were already shown by the notifier.
async fn finish(handle: JoinHandle<Outcome>) -> Result<Outcome, Box<dyn std::error::Error>> {
    let outcome = handle.await?;
    if outcome.is_success() {
        Ok(outcome)
    } else {
        Err(Box::new(AlreadyReported))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_args_apply_only_given_values() {
        let mut draft = Employee::new("Ann", "Lee", "ann@example.com").with_department("Ops");
        let fields = FieldArgs {
            department: Some("Research".to_string()),
            gender: Some(Gender::Other),
            ..FieldArgs::default()
        };

        assert!(!fields.is_empty());
        fields.apply(&mut draft);
        assert_eq!(draft.department, "Research");
        assert_eq!(draft.gender, Gender::Other);
        assert_eq!(draft.first_name, "Ann");
    }

    #[test]
    fn test_empty_field_args() {
        assert!(FieldArgs::default().is_empty());
    }
}
