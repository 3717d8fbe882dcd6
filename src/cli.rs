//! CLI interface for NOVA

use crate::config::OutputFormat;
use crate::processing::roadmap::Timeframe;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "nova")]
#[command(version)]
#[command(about = "NOVA career intelligence: résumé scoring, roadmaps and job matches")]
#[command(long_about = "Analyze a résumé against a target role, build a 3- or 6-month career roadmap, \
rank matching jobs and export the results as console text, JSON, Markdown, HTML or PDF")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a résumé for a target role
    Analyze {
        /// Path to résumé file (PDF, TXT, MD, DOC, DOCX)
        #[arg(short, long)]
        resume: PathBuf,

        /// Target role, e.g. "Data Scientist"
        #[arg(short, long)]
        field: String,

        /// Target hourly rate in USD
        #[arg(short, long)]
        salary: Option<f64>,

        /// Your name, shown on the report
        #[arg(short, long)]
        name: Option<String>,

        /// Roadmap length: 3-month or 6-month
        #[arg(short, long, value_parser = parse_timeframe)]
        timeframe: Option<Timeframe>,

        /// Output format: console, json, markdown, html, pdf
        #[arg(short, long, value_parser = parse_output_format)]
        output: Option<OutputFormat>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,

        /// Ignore configured API keys and use offline data
        #[arg(long)]
        offline: bool,
    },

    /// List job openings for a role
    Jobs {
        /// Target role
        #[arg(short, long)]
        field: String,

        /// Minimum hourly rate
        #[arg(short, long)]
        salary: Option<f64>,

        /// Search location
        #[arg(short, long)]
        location: Option<String>,

        /// Ignore configured API keys and use offline data
        #[arg(long)]
        offline: bool,
    },

    /// Show market salary bands for a role
    Salary {
        /// Target role
        #[arg(short, long)]
        field: String,

        /// Market location
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Telegram notifications
    Notify {
        #[command(subcommand)]
        action: NotifyAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum NotifyAction {
    /// Send a message built from a saved JSON report
    Send {
        /// Report saved with `analyze --output json --save <file>`
        #[arg(short, long)]
        report: PathBuf,

        /// Telegram chat id
        #[arg(long)]
        chat_id: String,

        /// Message kind
        #[arg(short, long, value_enum, default_value_t = NotifyKind::Digest)]
        kind: NotifyKind,
    },

    /// Check the bot token
    Verify,

    /// Look up the chat id of a user who has messaged the bot
    ChatId {
        /// Telegram username, with or without @
        username: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotifyKind {
    Digest,
    JobAlert,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        "pdf" => Ok(OutputFormat::Pdf),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html, pdf", format)),
    }
}

pub fn parse_timeframe(value: &str) -> Result<Timeframe, String> {
    value.parse()
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "nova", "analyze", "--resume", "cv.pdf", "--field", "Data Scientist",
            "--salary", "90", "--timeframe", "3-month", "--output", "pdf", "--offline",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze { field, salary, timeframe, output, offline, .. } => {
                assert_eq!(field, "Data Scientist");
                assert_eq!(salary, Some(90.0));
                assert_eq!(timeframe, Some(Timeframe::ThreeMonth));
                assert_eq!(output, Some(OutputFormat::Pdf));
                assert!(offline);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_parse_notify_send() {
        let cli = Cli::try_parse_from([
            "nova", "notify", "send", "--report", "r.json", "--chat-id", "42", "--kind", "job-alert",
        ])
        .unwrap();

        match cli.command {
            Commands::Notify { action: NotifyAction::Send { chat_id, kind, .. } } => {
                assert_eq!(chat_id, "42");
                assert_eq!(kind, NotifyKind::JobAlert);
            }
            _ => panic!("expected notify send"),
        }
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("docx").is_err());
    }

    #[test]
    fn test_file_extension_validation() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("cv"), &["pdf"]).is_err());
    }
}
