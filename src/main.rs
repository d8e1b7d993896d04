//! Timetable - Dynamic cycle timetable generator
//!
//! CLI entry point.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use timetable::calendar::holiday::parse_date;
use timetable::calendar::resolver::{resolve, ScheduleRequest, ScheduleResult};
use timetable::calendar::table::CycleTable;
use timetable::cli::{render_saved_list, render_success, ScheduleDisplay};
use timetable::export::{export, write_csv, PageLayout};
use timetable::log::{GenerationOutcome, JsonlLogger};
use timetable::source;
use timetable::store::{CredentialStore, OwnerId, SqliteStore, TimetableId, TimetableStore};
use timetable::{OutputConfig, TimetableConfig};

/// Dynamic cycle timetable generator
///
/// Maps a repeating N-day cycle onto a semester, skipping Sundays, odd
/// Saturdays and holidays, and exports or saves the result.
#[derive(Parser, Debug)]
#[command(name = "timetable", version, about)]
struct Cli {
    /// SQLite database holding users and saved timetables
    #[arg(long, global = true, default_value = "timetable.db")]
    db: PathBuf,

    /// Directory for log files (.timetable by default)
    #[arg(long, global = true, default_value = ".timetable")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Username and password of a registered owner
#[derive(Args, Debug)]
struct Credentials {
    /// Username
    #[arg(long)]
    user: String,

    /// Password
    #[arg(long, env = "TIMETABLE_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Path to the timetable.toml configuration file
    #[arg(long, default_value = "timetable.toml")]
    config: PathBuf,

    /// CSV or Excel cycle table, overriding the configured one
    #[arg(long)]
    table: Option<PathBuf>,

    /// Cycle day on the start date, overriding the configured one
    #[arg(long)]
    first_day: Option<String>,

    /// Extra holiday (DD-MM-YYYY); repeatable
    #[arg(long = "holiday", value_parser = parse_holiday)]
    holidays: Vec<NaiveDate>,

    /// Export to this file (.csv, .xlsx, .pdf or .txt); repeatable
    #[arg(long = "output", short = 'o')]
    outputs: Vec<PathBuf>,

    /// Also write the schedule as CSV to stdout
    #[arg(long)]
    stdout: bool,

    /// Save the schedule under this name
    #[arg(long, requires = "user")]
    save: Option<String>,

    /// Owner to save as
    #[arg(long, requires = "save")]
    user: Option<String>,

    /// Owner's password
    #[arg(long, env = "TIMETABLE_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a semester timetable
    Generate(GenerateArgs),

    /// Write the built-in cycle table as an editable CSV or Excel sheet
    Template {
        /// Output file, .csv or .xlsx (CSV to stdout if omitted)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Register a new user
    Register {
        /// Username
        #[arg(long)]
        user: String,

        /// Contact email
        #[arg(long)]
        email: Option<String>,

        /// Password
        #[arg(long, env = "TIMETABLE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// List saved timetables
    List {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Print or export a saved timetable
    Show {
        /// Timetable id, as shown by `list`
        id: TimetableId,

        #[command(flatten)]
        credentials: Credentials,

        /// Export to this file instead of printing CSV to stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Delete a saved timetable
    Delete {
        /// Timetable id, as shown by `list`
        id: TimetableId,

        #[command(flatten)]
        credentials: Credentials,
    },
}

fn parse_holiday(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}

/// Apply command-line overrides to the configured request.
fn build_request(config: &TimetableConfig, args: &GenerateArgs) -> Result<ScheduleRequest> {
    let table: CycleTable = match &args.table {
        Some(path) => source::load_table(path)?,
        None => config.load_table()?,
    };

    let mut request = config.request(table);
    if let Some(first_day) = &args.first_day {
        request.first_day.clone_from(first_day);
    }
    for date in &args.holidays {
        request.holidays.insert(*date);
    }
    Ok(request)
}

fn open_store(path: &Path) -> Result<SqliteStore> {
    SqliteStore::open(path)
        .with_context(|| format!("Failed to open timetable database: {}", path.display()))
}

fn sign_in(store: &SqliteStore, credentials: &Credentials) -> Result<OwnerId> {
    store
        .verify(&credentials.user, &credentials.password)
        .with_context(|| format!("Sign-in failed for '{}'", credentials.user))
}

/// Fail unless the timetable belongs to the owner.
fn ensure_owned(store: &SqliteStore, owner: OwnerId, id: TimetableId) -> Result<()> {
    let owned = store
        .list(owner)
        .context("Failed to list saved timetables")?
        .iter()
        .any(|meta| meta.id == id);
    if !owned {
        bail!("No saved timetable #{id} for this user");
    }
    Ok(())
}

fn export_all(
    schedule: &ScheduleResult,
    outputs: &[PathBuf],
    layout: &PageLayout,
) -> Result<Vec<String>> {
    let mut written = Vec::with_capacity(outputs.len());
    for path in outputs {
        let format = export(schedule, path, layout)
            .with_context(|| format!("Failed to export to {}", path.display()))?;
        render_success(&format!("Wrote {} export: {}", format.name(), path.display()));
        written.push(path.display().to_string());
    }
    Ok(written)
}

fn run_generate(cli: &Cli, args: &GenerateArgs) -> Result<()> {
    let config = TimetableConfig::from_path(&args.config)
        .with_context(|| format!("Failed to load config from '{}'", args.config.display()))?;
    let request = build_request(&config, args)?;
    let schedule = resolve(&request).context("Failed to generate timetable")?;

    let display = ScheduleDisplay::new(&schedule);
    display.print_header(&config.output.title);
    display.print_preview(config.output.preview_rows);
    display.print_summary();

    let layout = PageLayout::from(&config.output);
    let exports = export_all(&schedule, &args.outputs, &layout)?;

    if args.stdout {
        write_csv(&schedule, io::stdout().lock()).context("Failed to write CSV to stdout")?;
    }

    let saved_id = match (&args.save, &args.user) {
        (Some(name), Some(user)) => {
            let password = args
                .password
                .clone()
                .context("--password (or TIMETABLE_PASSWORD) is required with --save")?;
            let mut store = open_store(&cli.db)?;
            let owner = sign_in(
                &store,
                &Credentials {
                    user: user.clone(),
                    password,
                },
            )?;
            let id = store
                .create(owner, name, &schedule)
                .context("Failed to save timetable")?;
            render_success(&format!("Saved as #{id} '{name}'"));
            Some(id)
        }
        _ => None,
    };

    let logger = JsonlLogger::new(&cli.log_dir).context("Failed to initialize JSONL logger")?;
    let mut outcome = GenerationOutcome::new(
        request.start,
        request.end,
        &request.first_day,
        &schedule.summary(),
    );
    outcome.exports = exports;
    outcome.saved_id = saved_id;
    logger
        .append(&outcome)
        .context("Failed to write to JSONL log")?;

    Ok(())
}

fn is_xlsx(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"))
}

fn run_template(output: Option<&Path>) -> Result<()> {
    let table = CycleTable::builtin();
    match output {
        Some(path) if is_xlsx(path) => {
            source::write_template_xlsx(&table, path).context("Failed to write template")?;
            render_success(&format!("Wrote cycle table template: {}", path.display()));
        }
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            source::write_template(&table, BufWriter::new(file))
                .context("Failed to write template")?;
            render_success(&format!("Wrote cycle table template: {}", path.display()));
        }
        None => source::write_template(&table, io::stdout().lock())
            .context("Failed to write template")?,
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Generate(args) => run_generate(&cli, args)?,
        Command::Template { output } => run_template(output.as_deref())?,
        Command::Register {
            user,
            email,
            password,
        } => {
            let mut store = open_store(&cli.db)?;
            store
                .register(user, email.as_deref(), password)
                .with_context(|| format!("Failed to register '{user}'"))?;
            render_success(&format!("User '{user}' registered. Please sign in."));
        }
        Command::List { credentials } => {
            let store = open_store(&cli.db)?;
            let owner = sign_in(&store, credentials)?;
            let saved = store.list(owner).context("Failed to list saved timetables")?;
            render_saved_list(&saved);
        }
        Command::Show {
            id,
            credentials,
            output,
        } => {
            let store = open_store(&cli.db)?;
            let owner = sign_in(&store, credentials)?;
            ensure_owned(&store, owner, *id)?;
            let schedule = store
                .get(*id)
                .with_context(|| format!("Failed to load timetable #{id}"))?;
            match output {
                Some(path) => {
                    let layout = PageLayout::from(&OutputConfig::default());
                    export_all(&schedule, std::slice::from_ref(path), &layout)?;
                }
                None => write_csv(&schedule, io::stdout().lock())
                    .context("Failed to write CSV to stdout")?,
            }
        }
        Command::Delete { id, credentials } => {
            let mut store = open_store(&cli.db)?;
            let owner = sign_in(&store, credentials)?;
            ensure_owned(&store, owner, *id)?;
            store
                .delete(*id)
                .with_context(|| format!("Failed to delete timetable #{id}"))?;
            render_success(&format!("Deleted timetable #{id}"));
        }
    }

    Ok(())
}
