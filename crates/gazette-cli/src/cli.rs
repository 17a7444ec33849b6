//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gazette - Extract contract notices from official-gazette documents.
#[derive(Debug, Parser)]
#[command(name = "gazette")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (default: ~/.gazette/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub secrets: SecretArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Secrets that override the configuration file.
#[derive(Debug, Default, clap::Args)]
pub struct SecretArgs {
    /// Search index password
    #[arg(long, env = "GAZETTE_SEARCH_PASSWORD", hide_env_values = true, global = true)]
    pub search_password: Option<String>,

    /// Assistant API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Assistant id
    #[arg(long, env = "GAZETTE_ASSISTANT_ID", global = true)]
    pub assistant_id: Option<String>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process every document listed by the search index
    Run,

    /// Process the given documents only
    Process(ProcessArgs),

    /// Show whether a document carries a processed marker
    Status(StatusArgs),

    /// Segment a local text file and show the acts and prompts
    Segment(SegmentArgs),

    /// Create the store schema
    InitDb,

    /// Print the effective configuration (secrets redacted)
    Config,
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Document ids to process
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Arguments for the status command.
#[derive(Debug, Parser)]
pub struct StatusArgs {
    /// Document id
    pub id: String,
}

/// Arguments for the segment command.
#[derive(Debug, Parser)]
pub struct SegmentArgs {
    /// Text file holding one gazette document
    pub file: PathBuf,

    /// Only show contract excerpts
    #[arg(long)]
    pub in_scope: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command() {
        let cli = Cli::try_parse_from(["gazette", "run"]).unwrap();
        assert!(matches!(cli.command, Command::Run));
        assert_eq!(cli.format, CliFormat::Table);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_process_requires_ids() {
        assert!(Cli::try_parse_from(["gazette", "process"]).is_err());

        let cli = Cli::try_parse_from(["gazette", "process", "doc-1", "doc-2"]).unwrap();
        match cli.command {
            Command::Process(args) => assert_eq!(args.ids, vec!["doc-1", "doc-2"]),
            _ => panic!("Expected Process command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "gazette",
            "segment",
            "page.txt",
            "--in-scope",
            "--format",
            "json",
            "--config",
            "/tmp/gazette.toml",
        ])
        .unwrap();

        assert_eq!(cli.format, CliFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/gazette.toml")));
        match cli.command {
            Command::Segment(args) => {
                assert!(args.in_scope);
                assert_eq!(args.file, PathBuf::from("page.txt"));
            }
            _ => panic!("Expected Segment command"),
        }
    }

    #[test]
    fn test_secret_flag() {
        let cli = Cli::try_parse_from(["gazette", "init-db", "--api-key", "sk-test"]).unwrap();
        assert_eq!(cli.secrets.api_key.as_deref(), Some("sk-test"));
        assert!(matches!(cli.command, Command::InitDb));
    }
}
