//! Command dispatch for the admin CLI.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{bail, Context};
use tradedesk_admin::{
    AdminConfig, AdminService, AlwaysConfirm, Authorizer, ColumnDraft, Confirm, FieldValue,
    Fields, Outcome, RecordId, SessionGate,
};
use tradedesk_store::RocksStore;

use crate::ui;
use crate::{ColumnsCommand, Command, UsersCommand};

const CLEAR_DATA_PROMPT: &str = "Delete all users and restore the default columns?";

/// Asks on the terminal; anything but `y`/`yes` declines.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let mut stderr = io::stderr();
        if write!(stderr, "{prompt} [y/N] ").and_then(|()| stderr.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Application state for one CLI invocation.
pub(crate) struct App {
    admin: AdminService<RocksStore>,
    gate: SessionGate<RocksStore>,
    confirm: Box<dyn Confirm>,
}

impl App {
    /// Open the store and hydrate the admin service.
    pub(crate) fn open(config: &AdminConfig, assume_yes: bool) -> anyhow::Result<Self> {
        let store = Arc::new(
            RocksStore::open(&config.data_dir)
                .with_context(|| format!("opening {}", config.data_dir.display()))?,
        );
        let admin = AdminService::open(Arc::clone(&store))?;
        let gate = SessionGate::from_config(store, config);
        let confirm: Box<dyn Confirm> = if assume_yes {
            Box::new(AlwaysConfirm)
        } else {
            Box::new(StdinConfirm)
        };
        Ok(Self {
            admin,
            gate,
            confirm,
        })
    }

    /// Run a single command.
    ///
    /// Everything except the session commands needs an open admin session.
    pub(crate) fn run(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Login { username, password } => {
                self.gate.login(&username, &password)?;
                println!("Logged in.");
            }
            Command::Logout => {
                self.gate.logout()?;
                println!("Logged out.");
            }
            Command::Status => {
                let state = if self.gate.is_authorized()? {
                    "open"
                } else {
                    "closed"
                };
                println!("Admin session: {state}");
            }
            Command::Columns(cmd) => {
                self.gate.require_authorized()?;
                self.run_columns(cmd)?;
            }
            Command::Users(cmd) => {
                self.gate.require_authorized()?;
                self.run_users(cmd)?;
            }
            Command::Stats => {
                self.gate.require_authorized()?;
                print!("{}", ui::render_stats(&self.admin.stats()));
            }
            Command::Clear => {
                self.gate.require_authorized()?;
                if self.confirm.confirm(CLEAR_DATA_PROMPT) {
                    self.admin.clear_data()?;
                    println!("Admin data cleared.");
                } else {
                    println!("Cancelled.");
                }
            }
        }
        Ok(())
    }

    fn run_columns(&mut self, command: ColumnsCommand) -> anyhow::Result<()> {
        match command {
            ColumnsCommand::List => {
                print!("{}", ui::render_columns(self.admin.columns()));
            }
            ColumnsCommand::Add(args) => {
                let draft = ColumnDraft {
                    key: args.key,
                    label: args.label,
                    column_type: args.column_type,
                    options: args.options,
                    required: args.required,
                };
                let columns = self.admin.add_column_from_draft(draft)?;
                print!("{}", ui::render_columns(columns));
            }
            ColumnsCommand::Remove { key } => {
                let outcome = self.admin.remove_column(&key, self.confirm.as_ref())?;
                report(&outcome, &format!("Removed column {key}."), &format!("No column {key}."));
            }
        }
        Ok(())
    }

    fn run_users(&mut self, command: UsersCommand) -> anyhow::Result<()> {
        match command {
            UsersCommand::List { search } => {
                let term = search.unwrap_or_default();
                let records = self.admin.search(&term);
                let empty_hint = if self.admin.records().is_empty() {
                    "No users found. Add your first user!"
                } else {
                    "No users found. Try adjusting your search."
                };
                print!("{}", ui::render_records(self.admin.columns(), &records, empty_hint));
            }
            UsersCommand::Add { fields } => {
                let fields = self.to_fields(fields, Fields::new())?;
                let record = self.admin.add_record(&fields)?;
                println!("Added user {}.", record.id);
            }
            UsersCommand::Update { id, fields } => {
                let id: RecordId = id.parse()?;
                let Some(form) = self.admin.edit_form(&id) else {
                    println!("No user {id}.");
                    return Ok(());
                };
                let fields = self.to_fields(fields, form)?;
                let outcome = self.admin.update_record(&id, &fields)?;
                report(&outcome, &format!("Updated user {id}."), &format!("No user {id}."));
            }
            UsersCommand::Delete { id } => {
                let id: RecordId = id.parse()?;
                let outcome = self.admin.delete_record(&id, self.confirm.as_ref())?;
                report(&outcome, &format!("Deleted user {id}."), &format!("No user {id}."));
            }
        }
        Ok(())
    }

    /// Apply `key=value` pairs on top of `base`, typing each value by its column.
    fn to_fields(&self, pairs: Vec<(String, String)>, mut base: Fields) -> anyhow::Result<Fields> {
        for (key, raw) in pairs {
            let Some(column) = self.admin.schema().get(&key) else {
                bail!("unknown column `{key}`");
            };
            base.insert(key, FieldValue::parse_for(column.column_type, &raw));
        }
        Ok(base)
    }
}

fn report<T>(outcome: &Outcome<T>, applied: &str, not_found: &str) {
    match outcome {
        Outcome::Applied(_) => println!("{applied}"),
        Outcome::Cancelled => println!("Cancelled."),
        Outcome::NotFound => println!("{not_found}"),
    }
}
