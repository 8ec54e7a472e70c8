//! Tradedesk admin CLI - manage users and their columns.
//!
//! This is the entry point for the `tdadmin` binary.

mod app;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tradedesk_admin::{AdminConfig, AdminError, ColumnType};

use app::App;

/// Tradedesk admin CLI - manage users and their columns.
#[derive(Parser, Debug)]
#[command(name = "tdadmin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory of the admin database.
    #[arg(long, env = "TRADEDESK_DATA_DIR", default_value = "./tradedesk-data")]
    data_dir: PathBuf,

    /// Configured admin username.
    #[arg(long, env = "TRADEDESK_ADMIN_USERNAME", hide_env_values = true)]
    admin_username: Option<String>,

    /// Configured admin password.
    #[arg(long, env = "TRADEDESK_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    /// How long a login stays valid, in hours.
    #[arg(long, env = "TRADEDESK_SESSION_TTL_HOURS", default_value_t = 24)]
    session_ttl_hours: u64,

    /// Answer yes to every confirmation prompt.
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open an admin session.
    Login {
        /// Username to check.
        #[arg(long)]
        username: String,
        /// Password to check.
        #[arg(long)]
        password: String,
    },
    /// Close the admin session. Stored data is kept.
    Logout,
    /// Show whether an admin session is open.
    Status,
    /// Manage table columns.
    #[command(subcommand)]
    Columns(ColumnsCommand),
    /// Manage users.
    #[command(subcommand)]
    Users(UsersCommand),
    /// Show user and column counts.
    Stats,
    /// Delete all users and restore the default columns.
    Clear,
}

#[derive(Subcommand, Debug)]
enum ColumnsCommand {
    /// List columns in display order.
    List,
    /// Append a column.
    Add(AddColumnArgs),
    /// Remove a non-required column and its data.
    Remove {
        /// Key of the column to remove.
        key: String,
    },
}

#[derive(Args, Debug)]
struct AddColumnArgs {
    /// Field name used in every user record.
    #[arg(long)]
    key: String,
    /// Display name.
    #[arg(long)]
    label: String,
    /// Input type.
    #[arg(long = "type", default_value = "text", value_parser = parse_column_type)]
    column_type: ColumnType,
    /// Comma-separated options for select columns.
    #[arg(long, default_value = "")]
    options: String,
    /// Mark the column as required.
    #[arg(long)]
    required: bool,
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    /// List users, optionally filtered.
    List {
        /// Case-insensitive text to match against any field.
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Add a user.
    Add {
        /// Field value as `key=value`; repeat for each field.
        #[arg(long = "field", short = 'f', value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },
    /// Edit a user. Unspecified fields keep their current value.
    Update {
        /// ID of the user.
        id: String,
        /// Field value as `key=value`; repeat for each field.
        #[arg(long = "field", short = 'f', value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },
    /// Delete a user.
    Delete {
        /// ID of the user.
        id: String,
    },
}

fn parse_column_type(raw: &str) -> Result<ColumnType, String> {
    raw.parse().map_err(|e: tradedesk_admin::CoreError| e.to_string())
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field key in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.debug {
        "tradedesk=debug,warn"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", describe_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AdminConfig {
        data_dir: cli.data_dir,
        admin_username: cli.admin_username,
        admin_password: cli.admin_password,
        session_ttl_hours: cli.session_ttl_hours,
    };
    tracing::debug!(data_dir = %config.data_dir.display(), "Opening admin store");

    let mut app = App::open(&config, cli.yes)?;
    app.run(cli.command)
}

/// Admin rule violations print as a bare message; other failures keep their
/// cause chain.
fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<AdminError>() {
        Some(admin) if admin.is_user_facing() => admin.to_string(),
        Some(admin) if admin.is_retriable() => format!("Error: {err:#} (try again)"),
        _ => format!("Error: {err:#}"),
    }
}
