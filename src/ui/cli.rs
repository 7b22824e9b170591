// Command-line interface definitions and parsing for sectxt-audit

use crate::config::CliConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check each site for a security.txt file, resuming a previous run
    Query(QueryArgs),
    /// Reduce a domain ranking CSV to its Domain column
    Preprocess {
        /// Path to the ranking CSV (e.g. the Majestic Million)
        ranking: PathBuf,
        /// Path to write the single-column CSV to
        out: PathBuf,
        /// Disable the progress spinner
        #[arg(long)]
        no_progress: bool,
    },
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Path to CSV with the sites to check
    pub sites: PathBuf,

    /// Path to output results to; appended to when it already exists
    pub out: PathBuf,

    // Probing
    /// Path to check under each domain, in order (repeatable)
    #[arg(long = "path", value_name = "PATH", help_heading = "Probing")]
    pub paths: Vec<String>,

    /// Per-request timeout in seconds (default: 5)
    #[arg(short = 't', long, value_name = "SECONDS", help_heading = "Probing")]
    pub timeout: Option<u64>,

    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Probing")]
    pub user_agent: Option<String>,

    /// Stop after checking this many sites
    #[arg(long, value_name = "COUNT", help_heading = "Probing")]
    pub limit: Option<u64>,

    /// Scheme of probed origins
    #[arg(long, hide = true)]
    pub scheme: Option<String>,

    // Output & Logging
    /// Path to write logs to (default: ./query.log)
    #[arg(long, value_name = "FILE", help_heading = "Output & Logging")]
    pub log_file: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", help_heading = "Output & Logging")]
    pub log_level: Option<String>,

    /// Disable the progress bar
    #[arg(long, help_heading = "Output & Logging")]
    pub no_progress: bool,

    /// Print nothing but errors
    #[arg(short = 'q', long, help_heading = "Output & Logging")]
    pub quiet: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Convert query arguments into a CliConfig
pub fn cli_to_config(args: &QueryArgs) -> CliConfig {
    CliConfig {
        timeout: args.timeout,
        candidate_paths: if args.paths.is_empty() {
            None
        } else {
            Some(args.paths.clone())
        },
        log_file: args.log_file.clone(),
        log_level: args.log_level.clone(),
        user_agent: args.user_agent.clone(),
        scheme: args.scheme.clone(),
        config_file: args.config.clone(),
        no_config: args.no_config,
        no_progress: args.no_progress || args.quiet,
    }
}
