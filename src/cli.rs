use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-rater",
    about = "Extract library references from a source file and rate their licenses",
    version
)]
pub struct Cli {
    /// File to scan: .py, .java, pom .xml or requirements*.txt
    pub path: PathBuf,

    /// Export the report as a spreadsheet (CSV)
    #[arg(short, long)]
    pub export: bool,

    /// Spreadsheet path; implies --export [default: license_report.csv]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Console output format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Do not contact package registries; unresolved licenses are reported as Unknown
    #[arg(long)]
    pub offline: bool,

    /// Config file [default: <file dir>/.license-rater/config.toml, fallback ~/.config/license-rater/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only print the summary line
    #[arg(short, long)]
    pub quiet: bool,

    /// Log each registry lookup
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}
