mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{
    activity, backup, completions, intake, leads, listings, staff, worklist, Context,
};
use crate::error::{exit_code_for, report_error};
use leadline_config as config;
use leadline_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "leadline", version, about = "leadline CRM CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Public intake: brochure download request
    Brochure(intake::BrochureArgs),
    /// Public intake: contact-form query
    Query(intake::QueryArgs),
    /// Staff: log a call/visit against an existing lead
    Log(activity::LogArgs),
    #[command(subcommand)]
    Leads(LeadCommand),
    History(leads::HistoryArgs),
    Worklist(worklist::WorklistArgs),
    #[command(subcommand)]
    Listing(listings::ListingCommand),
    #[command(subcommand)]
    Staff(staff::StaffCommand),
    Backup(backup::BackupArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[derive(Debug, Subcommand)]
enum LeadCommand {
    Ls(leads::ListArgs),
    Show(leads::ShowArgs),
    #[command(name = "set-status")]
    SetStatus(leads::SetStatusArgs),
    Note(leads::NoteArgs),
    Rm(leads::DeleteArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    let json = cli.json;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose, json);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    let command = match command {
        Command::Completions(args) => return completions::emit(args),
        command => command,
    };

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let db_path = paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
    if verbose {
        debug!(path = %db_path.display(), "database path resolved");
    }

    let store = Store::open(&db_path)
        .with_context(|| format!("open database {}", db_path.display()))?;
    store.migrate().with_context(|| "run migrations")?;

    let ctx = Context {
        store: &store,
        json,
        config: &app_config,
    };

    match command {
        Command::Brochure(args) => intake::brochure(&ctx, args),
        Command::Query(args) => intake::query(&ctx, args),
        Command::Log(args) => activity::log(&ctx, args),
        Command::Leads(cmd) => match cmd {
            LeadCommand::Ls(args) => leads::list(&ctx, args),
            LeadCommand::Show(args) => leads::show(&ctx, args),
            LeadCommand::SetStatus(args) => leads::set_status(&ctx, args),
            LeadCommand::Note(args) => leads::note(&ctx, args),
            LeadCommand::Rm(args) => leads::delete(&ctx, args),
        },
        Command::History(args) => leads::history(&ctx, args),
        Command::Worklist(args) => worklist::worklist(&ctx, args),
        Command::Listing(cmd) => match cmd {
            listings::ListingCommand::Add(args) => listings::add(&ctx, args),
            listings::ListingCommand::Ls(args) => listings::list(&ctx, args),
            listings::ListingCommand::Show(args) => listings::show(&ctx, args),
            listings::ListingCommand::Retire(args) => listings::retire(&ctx, args),
            listings::ListingCommand::Rm(args) => listings::remove(&ctx, args),
        },
        Command::Staff(cmd) => match cmd {
            staff::StaffCommand::Add(args) => staff::add(&ctx, args),
            staff::StaffCommand::Ls(args) => staff::list(&ctx, args),
            staff::StaffCommand::Deactivate(args) => staff::deactivate(&ctx, args),
        },
        Command::Backup(args) => backup::backup(&ctx, args),
        Command::Completions(_) => {
            unreachable!("completions command handled before store initialization")
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
