//! Interactive session over one controller.
//!
//! Mutations run in the background, so several can be in flight at once.
//! Their results show up through the notifier as they complete.

use clap::Args;
use roster_core::{Outcome, SyncController, ViewState};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use crate::console::render_table;

const HELP: &str = "\
Commands:
  list                 Show the employees table
  reload               Fetch the collection again
  new                  Open an empty employee form
  edit <id>            Open the form on an existing employee
  set <field> <value>  Set a form field
  show                 Show the open form
  submit               Send the open form
  cancel               Close the form without sending
  delete <id>          Delete an employee
  help                 Show this help
  quit                 Wait for pending requests and exit";

#[derive(Args)]
pub struct ShellCommand {}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    List,
    Reload,
    New,
    Edit(String),
    Set(String, String),
    Show,
    Submit,
    Cancel,
    Delete(String),
    Help,
    Quit,
    Empty,
}

fn parse(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let required = |what: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("Usage: {} {}", word, what))
        } else {
            Ok(rest.to_string())
        }
    };

    match word {
        "" => Ok(Input::Empty),
        "list" | "ls" => Ok(Input::List),
        "reload" => Ok(Input::Reload),
        "new" => Ok(Input::New),
        "edit" => required("<id>").map(Input::Edit),
        "set" => {
            let args = required("<field> <value>")?;
            let (field, value) = args.split_once(char::is_whitespace).unwrap_or((&args, ""));
            Ok(Input::Set(field.to_string(), value.trim().to_string()))
        }
        "show" => Ok(Input::Show),
        "submit" => Ok(Input::Submit),
        "cancel" => Ok(Input::Cancel),
        "delete" | "rm" => required("<id>").map(Input::Delete),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" => Ok(Input::Quit),
        other => Err(format!("Unknown command '{}'. Type 'help'.", other)),
    }
}

impl ShellCommand {
    pub async fn run(&self, controller: &SyncController) -> Result<(), Box<dyn std::error::Error>> {
        let mut pending: Vec<JoinHandle<Outcome>> = Vec::new();

        if controller.mount().await.await? == ViewState::Failed {
            if let Some(error) = controller.store().await.error() {
                eprintln!("✗ {}", error);
            }
        }
        println!("{} employee(s) loaded. Type 'help' for commands.", controller.records().await.len());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("roster> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            pending.retain(|handle| !handle.is_finished());

            match parse(&line) {
                Ok(Input::Quit) => break,
                Ok(input) => {
                    if let Err(message) = execute(controller, input, &mut pending).await {
                        eprintln!("✗ {}", message);
                    }
                }
                Err(message) => eprintln!("{}", message),
            }
        }

        if !pending.is_empty() {
            println!("Waiting for {} pending request(s)...", pending.len());
        }
        for handle in pending {
            handle.await?;
        }
        Ok(())
    }
}

async fn execute(
    controller: &SyncController,
    input: Input,
    pending: &mut Vec<JoinHandle<Outcome>>,
) -> Result<(), String> {
    match input {
        Input::List => {
            let store = controller.store().await;
            if store.is_loading() {
                println!("Loading...");
            } else if let Some(error) = store.error() {
                println!("{}", error);
            } else {
                println!("{}", render_table(store.records()));
            }
        }
        Input::Reload => {
            let state = controller.load().await;
            let store = controller.store().await;
            match state {
                ViewState::Failed => return Err(store.error().unwrap_or_default().to_string()),
                _ => println!("{} employee(s) loaded.", store.len()),
            }
        }
        Input::New => {
            controller.session().await.start_create();
            println!("New employee form opened.");
        }
        Input::Edit(id) => {
            let record = controller
                .store()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| format!("Employee not found: {}", id))?;
            println!("Editing {}.", record.full_name());
            controller.session().await.start_edit(record);
        }
        Input::Set(field, value) => {
            let mut session = controller.session().await;
            if !session.is_open() {
                return Err("No employee form is open".to_string());
            }
            session.draft_mut().set_field(&field, &value)?;
        }
        Input::Show => {
            let session = controller.session().await;
            if !session.is_open() {
                return Err("No employee form is open".to_string());
            }
            let draft = session.draft();
            println!("mode:         {:?}", session.mode());
            println!("first_name:   {}", draft.first_name);
            println!("last_name:    {}", draft.last_name);
            println!("gender:       {}", draft.gender);
            println!("email:        {}", draft.email);
            println!("phone_number: {}", draft.phone_number);
            println!("job_title:    {}", draft.job_title);
            println!("department:   {}", draft.department);
        }
        Input::Submit => {
            let handle = controller.submit().await.map_err(|e| e.to_string())?;
            pending.push(handle);
        }
        Input::Cancel => {
            controller.session().await.close();
        }
        Input::Delete(id) => {
            pending.push(controller.delete(&id));
        }
        Input::Help => println!("{}", HELP),
        Input::Empty | Input::Quit => {}
    }
    Ok(())
}
