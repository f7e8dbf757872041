//! `license-rater` binary.
//!
//! Parses arguments ([`cli`]), loads config, extracts and rates dependencies
//! through the library, then renders the report. Exit code `0` on success, `2`
//! for an unsupported file type, `1` for any other error.

mod cli;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, OutputFormat};
use license_rater::detector::detect_file_kind;
use license_rater::report::{spreadsheet, terminal};
use license_rater::{
    extract_dependencies, load_config, rate_dependency, RegistryClient, ScanError,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        let code = e
            .downcast_ref::<ScanError>()
            .map_or(1, ScanError::exit_code);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Usage errors take precedence over config problems
    detect_file_kind(&cli.path)?;

    let base_dir = cli
        .path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut config = load_config(base_dir, cli.config.as_deref())?;
    if cli.offline {
        config.registry.offline = true;
    }

    let deps = extract_dependencies(&cli.path)?;
    let interactive = cli.format == OutputFormat::Terminal && !cli.quiet;

    if interactive {
        eprintln!(
            "  {} {} dependencies found in {}",
            "→".cyan(),
            deps.len(),
            cli.path.display()
        );
    }

    let client = RegistryClient::new(&config.registry)?;

    let pb = if interactive && !deps.is_empty() {
        let pb = ProgressBar::new(deps.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut records = Vec::with_capacity(deps.len());
    for dep in &deps {
        if let Some(pb) = &pb {
            pb.set_message(dep.name.clone());
        }
        records.push(rate_dependency(&client, dep).await);
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    match cli.format {
        OutputFormat::Terminal => terminal::render(&records, &cli.path, cli.quiet),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
    }

    if cli.export || cli.output.is_some() {
        let output = cli.output.unwrap_or(config.export.path);
        spreadsheet::write(&records, &output)?;
        if !cli.quiet {
            eprintln!("Report exported to: {}", output.display());
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("license_rater=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
