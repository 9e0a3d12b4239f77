// crates/hpfd-cli/src/main.rs
// ============================================================================
// Module: Health Plan Form Data CLI Entry Point
// Description: Command dispatcher for offline migration, fixtures, and inspection.
// Purpose: Give operators a safe, scriptable front end to the offline tools.
// Dependencies: clap, hpfd-core, hpfd-config, hpfd-migrator, hpfd-fixtures, serde_json.
// ============================================================================

//! ## Overview
//! `hpfd` wraps the offline tooling. Library crates return report values;
//! this binary renders them as single-line JSON on stdout and routes every
//! failure through [`emit_error`] with a non-zero exit code. All messages go
//! through the i18n catalog.
//!
//! Security posture: input files are untrusted; reads are size-limited.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use hpfd_cli::i18n::Locale;
use hpfd_cli::i18n::set_locale;
use hpfd_cli::t;
use hpfd_config::HpfdConfig;
use hpfd_core::DomainDocument;
use hpfd_core::ISO_DATE_FORMAT;
use hpfd_core::MAX_DOCUMENT_BYTES;
use hpfd_core::MigrationTrace;
use hpfd_core::to_domain_traced;
use hpfd_fixtures::FixtureHarness;
use hpfd_migrator::CorpusMigrator;
use hpfd_migrator::read_bytes_with_limit;
use serde::Serialize;
use thiserror::Error;
use time::Date;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable selecting the output language.
const LANG_ENV: &str = "HPFD_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "hpfd", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `HPFD_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Optional config file path (defaults to hpfd.toml or `HPFD_CONFIG`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Migrate every stored document in a corpus directory.
    Migrate(MigrateCommand),
    /// Fixture regression utilities.
    Fixtures {
        /// Selected fixtures subcommand.
        #[command(subcommand)]
        command: FixturesCommand,
    },
    /// Decode, migrate, and print one stored document as JSON.
    Inspect(InspectCommand),
}

/// Arguments for `migrate`.
#[derive(Args, Debug)]
struct MigrateCommand {
    /// Corpus directory (defaults to `migrator.corpus_dir`).
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,
    /// Ledger file (defaults to `migrator.ledger_file` inside the corpus).
    #[arg(long, value_name = "FILE")]
    ledger: Option<PathBuf>,
}

/// Fixture subcommands.
#[derive(Subcommand, Debug)]
enum FixturesCommand {
    /// Write today's fixtures for every mock.
    Generate(FixturesArgs),
    /// Compare mocks with the newest fixtures; fails on drift.
    Check(FixturesArgs),
    /// Load every stored fixture through the read path.
    Verify(FixturesDirArgs),
}

/// Arguments shared by fixture commands that write files.
#[derive(Args, Debug)]
struct FixturesArgs {
    /// Fixture directory and extension overrides.
    #[command(flatten)]
    target: FixturesDirArgs,
    /// Date stamped on written fixtures (defaults to today, UTC).
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<String>,
}

/// Fixture directory override.
#[derive(Args, Debug)]
struct FixturesDirArgs {
    /// Fixture directory (defaults to `fixtures.dir`).
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,
}

/// Arguments for `inspect`.
#[derive(Args, Debug)]
struct InspectCommand {
    /// Stored document to read.
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

/// Supported output languages.
#[derive(ValueEnum, Debug, Clone, Copy)]
enum LangArg {
    /// English.
    En,
    /// Spanish.
    Es,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Es => Self::Es,
        }
    }
}

/// JSON rendering of `inspect`.
#[derive(Debug, Serialize)]
struct InspectOutput<'a> {
    /// Display name of the submission.
    submission_name: String,
    /// Migrations applied while reading.
    trace: &'a MigrationTrace,
    /// Mapped document.
    document: &'a DomainDocument,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Migrate(command) => command_migrate(cli.config.as_deref(), &command),
        Commands::Fixtures {
            command,
        } => command_fixtures(cli.config.as_deref(), command),
        Commands::Inspect(command) => command_inspect(&command),
    }
}

/// Prints the top-level help text.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Runs the corpus migrator.
fn command_migrate(config_path: Option<&Path>, command: &MigrateCommand) -> CliResult<ExitCode> {
    let config = load_config(config_path)?;
    let dir = command.dir.clone().unwrap_or_else(|| config.migrator.corpus_path());
    let ledger = command.ledger.clone().unwrap_or_else(|| config.migrator.ledger_path(&dir));
    let report = CorpusMigrator::from_config(&config.migrator)
        .run(&dir, &ledger)
        .map_err(|err| CliError::new(t!("migrate.failed", error = err)))?;
    write_json(&report)?;
    Ok(ExitCode::SUCCESS)
}

/// Dispatches fixture subcommands.
fn command_fixtures(config_path: Option<&Path>, command: FixturesCommand) -> CliResult<ExitCode> {
    let config = load_config(config_path)?;
    let harness = FixtureHarness::from_config(&config.fixtures);
    let dir_or_default = |dir: Option<PathBuf>| dir.unwrap_or_else(|| config.fixtures.dir_path());
    let fixture_error =
        |err: hpfd_fixtures::FixtureError| CliError::new(t!("fixtures.failed", error = err));
    match command {
        FixturesCommand::Generate(args) => {
            let today = resolve_date(args.date.as_deref())?;
            let report =
                harness.generate(&dir_or_default(args.target.dir), today).map_err(fixture_error)?;
            write_json(&report)?;
            Ok(ExitCode::SUCCESS)
        }
        FixturesCommand::Check(args) => {
            let today = resolve_date(args.date.as_deref())?;
            let report =
                harness.check(&dir_or_default(args.target.dir), today).map_err(fixture_error)?;
            write_json(&report)?;
            if !report.drift_detected() {
                return Ok(ExitCode::SUCCESS);
            }
            let names: Vec<&str> = report
                .fixtures
                .iter()
                .filter(|outcome| outcome.previous_digest.as_ref() != Some(&outcome.digest))
                .map(|outcome| outcome.name)
                .collect();
            Ok(emit_error(&t!("fixtures.check.drift", names = names.join(", "))))
        }
        FixturesCommand::Verify(args) => {
            let report =
                harness.verify_history(&dir_or_default(args.dir)).map_err(fixture_error)?;
            write_json(&report)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Prints one stored document with its migration trace.
fn command_inspect(command: &InspectCommand) -> CliResult<ExitCode> {
    let path = command.file.display();
    let bytes = read_bytes_with_limit(&command.file, MAX_DOCUMENT_BYTES)
        .map_err(|err| CliError::new(t!("input.read_failed", path = path, error = err)))?;
    let (document, trace) = to_domain_traced(&bytes)
        .map_err(|err| CliError::new(t!("inspect.failed", path = path, error = err)))?;
    write_json(&InspectOutput {
        submission_name: document.submission_name(),
        trace: &trace,
        document: &document,
    })?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads and validates configuration.
fn load_config(path: Option<&Path>) -> CliResult<HpfdConfig> {
    HpfdConfig::load(path).map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

/// Parses `--date` or falls back to today in UTC.
fn resolve_date(value: Option<&str>) -> CliResult<Date> {
    match value {
        Some(value) => Date::parse(value, ISO_DATE_FORMAT)
            .map_err(|_| CliError::new(t!("fixtures.date.invalid", value = value))),
        None => Ok(OffsetDateTime::now_utc().date()),
    }
}

/// Resolves the locale from flag, then environment, then English.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a value as one line of JSON to stdout.
fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let line = serde_json::to_string(value)
        .map_err(|err| CliError::new(t!("output.encode_failed", error = err)))?;
    write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
