use clap::Parser;
use sectxt_audit::batch::{BatchRunner, RunSummary};
use sectxt_audit::config::{CliConfig, Config};
use sectxt_audit::logging::{self, FacadeLog};
use sectxt_audit::preprocess::extract_domains;
use sectxt_audit::probe::HttpFetcher;
use sectxt_audit::progress::ProgressReporter;
use sectxt_audit::ui::{Cli, Commands, QueryArgs, cli_to_config};

use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Query(ref args) => run_query(args).await,
        Commands::Preprocess {
            ref ranking,
            ref out,
            no_progress,
        } => run_preprocess(ranking, out, !no_progress),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Probe every remaining site and append the results
pub async fn run_query(args: &QueryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(args);
    let config = load_and_merge_config(&cli_config)?;
    config.validate()?;

    logging::init_logger(&config.log_file_path(), config.log_level_filter())?;
    log::info!(
        "Configuration: timeout={}s, paths={:?}, scheme={}",
        config.timeout_duration().as_secs(),
        config.candidate_paths(),
        config.scheme()
    );

    let fetcher = HttpFetcher::from_config(&config)?;
    let runner = BatchRunner::from_config(&config, Arc::new(fetcher), Arc::new(FacadeLog))
        .with_limit(args.limit);

    let mut progress = if config.show_progress.unwrap_or(true) {
        Some(ProgressReporter::new(true))
    } else {
        None
    };

    let summary = runner
        .run(&args.sites, &args.out, progress.as_mut())
        .await
        .inspect_err(|e| logging::log_error("Run aborted", Some(e)))?;

    if !args.quiet {
        print_summary(&summary, &args.out);
    }
    Ok(())
}

/// Reduce a ranking file to its Domain column
pub fn run_preprocess(
    ranking: &Path,
    out: &Path,
    show_progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut progress = show_progress.then(|| ProgressReporter::new(true));
    let written = extract_domains(ranking, out, progress.as_mut())?;
    println!("Wrote {written} records to {}", out.display());
    Ok(())
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file)?
    } else {
        Config::load_from_standard_locations()
    };

    // CLI takes precedence
    config.merge_with_cli(cli_config);
    Ok(config)
}

fn print_summary(summary: &RunSummary, out: &Path) {
    if summary.resumed_from > 0 {
        println!(
            "Resumed at site {} of {}",
            summary.resumed_from, summary.total_domains
        );
    }
    println!(
        "Checked {} sites, found {} valid security.txt file(s)",
        summary.processed, summary.found
    );
    if summary.is_complete() {
        println!("All sites checked, results in {}", out.display());
    } else {
        println!(
            "{} sites left, run again to continue",
            summary.remaining()
        );
    }
}
