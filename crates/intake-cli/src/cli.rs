//! CLI argument definitions for the permit intake pipeline.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "permit-intake",
    version,
    about = "Permit intake - questionnaire export pipeline",
    long_about = "Collects structured questionnaire answers for a freight-transport \
                  permit application, validates them, and renders them into the \
                  official spreadsheet submission templates.\n\n\
                  Every placement decision and validation finding is recorded in a \
                  review report for human checking before submission."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full export pipeline and write filled templates.
    Export(ExportArgs),

    /// Normalize and validate answers without writing templates.
    Validate(ValidateArgs),

    /// List catalog fields grouped by wizard step.
    Fields(FieldsArgs),

    /// Manage stored cases.
    #[command(subcommand)]
    Case(CaseCommand),
}

/// Configuration sources shared by every pipeline command.
#[derive(Args)]
pub struct ConfigArgs {
    /// Field catalog JSON (top-level `fields` list).
    #[arg(
        long = "catalog",
        value_name = "PATH",
        default_value = "config/schema.json"
    )]
    pub catalog: PathBuf,

    /// Mapping configuration TOML (`[[templates]]` array).
    #[arg(
        long = "mapping",
        value_name = "PATH",
        default_value = "config/mapping.toml"
    )]
    pub mapping: PathBuf,
}

/// Where the answers for a run come from: a stored case or an ad hoc file.
#[derive(Args)]
pub struct AnswerSourceArgs {
    /// Case id to load answers from the store.
    #[arg(long = "case", value_name = "CASE_ID", conflicts_with = "answers")]
    pub case: Option<String>,

    /// Ad hoc answers JSON file (object of field_id to value).
    #[arg(long = "answers", value_name = "PATH")]
    pub answers: Option<PathBuf>,

    /// Case store directory.
    #[arg(long = "store", value_name = "DIR", default_value = "data/cases")]
    pub store: PathBuf,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub source: AnswerSourceArgs,

    /// Directory holding the source template documents.
    #[arg(long = "templates", value_name = "DIR", default_value = "templates")]
    pub templates: PathBuf,

    /// Root directory for export artifacts.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "exports")]
    pub output_dir: PathBuf,

    /// Also dump answers, issues and notes as JSON next to the outputs.
    #[arg(long = "debug-json")]
    pub debug_json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub source: AnswerSourceArgs,
}

#[derive(Args)]
pub struct FieldsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Subcommand)]
pub enum CaseCommand {
    /// Create a new draft case.
    New(CaseNewArgs),

    /// List stored cases, newest update first.
    List(CaseListArgs),

    /// Merge answers from a JSON file into a case and re-validate.
    Set(CaseSetArgs),
}

#[derive(Args)]
pub struct CaseNewArgs {
    /// Case title.
    #[arg(long = "title", default_value = "新規案件")]
    pub title: String,

    /// Case store directory.
    #[arg(long = "store", value_name = "DIR", default_value = "data/cases")]
    pub store: PathBuf,
}

#[derive(Args)]
pub struct CaseListArgs {
    /// Case store directory.
    #[arg(long = "store", value_name = "DIR", default_value = "data/cases")]
    pub store: PathBuf,
}

#[derive(Args)]
pub struct CaseSetArgs {
    /// Case id to update.
    #[arg(value_name = "CASE_ID")]
    pub case_id: String,

    /// Answers JSON file (object of field_id to value).
    #[arg(long = "answers", value_name = "PATH")]
    pub answers: PathBuf,

    /// Case store directory.
    #[arg(long = "store", value_name = "DIR", default_value = "data/cases")]
    pub store: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
