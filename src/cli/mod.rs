//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// End-to-end API and browser UI test suites
#[derive(Parser, Debug)]
#[command(name = "qa-automation")]
#[command(version)]
#[command(about = "Run the REST API and browser login test suites")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the REST API suite
    Api(ApiArgs),

    /// Run the browser UI suite
    Ui(UiArgs),

    /// List available test cases
    List(ListArgs),

    /// Show or create configuration
    Config(ConfigArgs),
}

/// Arguments for the api command
#[derive(Parser, Debug)]
pub struct ApiArgs {
    /// API base URL, including the version prefix
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Run only these cases (e.g. TC-API-001,TC-API-PERF)
    #[arg(long = "case", value_delimiter = ',')]
    pub cases: Vec<String>,

    /// Skip specific cases (comma-separated codes)
    #[arg(long)]
    pub skip: Option<String>,

    /// HTML/Markdown/text report path
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Export results to a .json or .csv file
    #[arg(short, long)]
    pub export: Option<PathBuf>,
}

/// Arguments for the ui command
#[derive(Parser, Debug)]
pub struct UiArgs {
    /// Web application base URL
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Run only these cases (e.g. TC-AUTH-001,TC-AUTH-DDT)
    #[arg(long = "case", value_delimiter = ',')]
    pub cases: Vec<String>,

    /// Skip specific cases (comma-separated codes)
    #[arg(long)]
    pub skip: Option<String>,

    /// HTML/Markdown/text report path
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Export results to a .json or .csv file
    #[arg(short, long)]
    pub export: Option<PathBuf>,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Restrict to one suite (api, ui)
    #[arg(short, long)]
    pub suite: Option<String>,

    /// Show detailed test information
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Output path (.yaml, .yml or .json)
        #[arg(default_value = "qa-automation.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Describe supported environment variables
    Env,
}

/// Split a comma-separated list, dropping blanks
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
