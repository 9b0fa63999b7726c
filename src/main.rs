//! QA Automation - end-to-end API and browser UI test suites
//!
//! A CLI that runs two independent suites against a deployed environment:
//! scripted REST API scenarios and Page Object Model login scenarios driven
//! through Chrome.
//!
//! ## Features
//!
//! - 13 API scenarios: users, products, auth, rate limiting, response time
//! - 10 UI scenarios plus a data-driven invalid input matrix
//! - Console output as table, JSON, CSV or one-line summary
//! - Self-contained HTML report per run, JSON/CSV export
//!
//! ## Usage
//!
//! ```bash
//! # Run the API suite
//! qa-automation api --base-url https://api.example.com/v1
//!
//! # Run two UI cases with a visible browser
//! qa-automation ui --case TC-AUTH-001,TC-AUTH-010 --headed
//!
//! # List available cases
//! qa-automation list --detailed
//!
//! # Write a starter configuration
//! qa-automation config init qa-automation.yaml
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

mod api;
mod assert;
mod cli;
mod config;
mod executor;
mod http;
mod metrics;
mod models;
mod output;
mod results;
#[cfg(test)]
mod testing;
mod ui;
mod utils;

use api::ApiSuite;
use cli::Args;
use config::AppConfig;
use executor::{ScenarioSuite, SuiteRunner};
use models::{Suite, TestCase};
use output::{OutputFormat, ResultFormatter};
use results::{export_summary, ReportGenerator};
use ui::UiSuite;
use utils::{init_logger, LogLevel};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(LogLevel::from_verbose(args.verbose));

    let passed = match args.command {
        cli::Command::Api(api_args) => {
            let mut config = AppConfig::resolve(args.config.as_deref())?;
            if let Some(url) = api_args.base_url {
                config.api.base_url = url;
            }
            config.validate()?;
            let options = RunOptions::new(
                Suite::Api,
                &api_args.cases,
                api_args.skip.as_deref(),
                api_args.report.unwrap_or_else(|| config.api.report.clone()),
                api_args.format.as_deref().unwrap_or(&config.format),
                api_args.export,
            )?;
            run_suite(&ApiSuite::new(config.api), options).await?
        }
        cli::Command::Ui(ui_args) => {
            let mut config = AppConfig::resolve(args.config.as_deref())?;
            if let Some(url) = ui_args.base_url {
                config.ui.base_url = url;
            }
            if ui_args.headed {
                config.ui.headless = false;
            }
            config.validate()?;
            let options = RunOptions::new(
                Suite::Ui,
                &ui_args.cases,
                ui_args.skip.as_deref(),
                ui_args.report.unwrap_or_else(|| config.ui.report.clone()),
                ui_args.format.as_deref().unwrap_or(&config.format),
                ui_args.export,
            )?;
            run_suite(&UiSuite::new(config.ui), options).await?
        }
        cli::Command::List(list_args) => {
            list_tests(list_args)?;
            true
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args, args.config.as_deref())?;
            true
        }
    };

    if !passed {
        std::process::exit(1);
    }

    Ok(())
}

/// Case selection and output settings for one suite run
struct RunOptions {
    cases: Vec<TestCase>,
    skip: Vec<TestCase>,
    report: PathBuf,
    format: OutputFormat,
    export: Option<PathBuf>,
}

impl RunOptions {
    fn new(
        suite: Suite,
        cases: &[String],
        skip: Option<&str>,
        report: PathBuf,
        format: &str,
        export: Option<PathBuf>,
    ) -> Result<Self> {
        let format = OutputFormat::from_str(format)
            .ok_or_else(|| anyhow::anyhow!("Unknown output format: {format}"))?;

        let cases = if cases.is_empty() {
            TestCase::for_suite(suite)
        } else {
            parse_cases(suite, cases)?
        };
        let skip = match skip {
            Some(list) => parse_cases(suite, &cli::split_list(list))?,
            None => Vec::new(),
        };

        Ok(Self {
            cases,
            skip,
            report,
            format,
            export,
        })
    }
}

/// Resolve case codes, rejecting unknown codes and other suites' cases
fn parse_cases(suite: Suite, codes: &[String]) -> Result<Vec<TestCase>> {
    codes
        .iter()
        .map(|code| {
            let case = TestCase::from_code(code)
                .ok_or_else(|| anyhow::anyhow!("Unknown test case: {code}"))?;
            if case.suite() != suite {
                anyhow::bail!("{code} belongs to the {} suite", case.suite());
            }
            Ok(case)
        })
        .collect()
}

async fn run_suite<S: ScenarioSuite>(suite: &S, options: RunOptions) -> Result<bool> {
    info!("Running {} suite against {}", suite.suite(), suite.target());

    let runner = SuiteRunner::new(options.cases).skip(options.skip);
    let summary = runner.run(suite).await;

    let formatter = ResultFormatter::new(options.format);
    println!("{}", formatter.format_summary(&summary));

    ReportGenerator::new().write(&summary, &options.report)?;

    if let Some(path) = &options.export {
        export_summary(&summary, path)?;
    }

    Ok(summary.is_successful())
}

fn list_tests(args: cli::ListArgs) -> Result<()> {
    let cases = match args.suite.as_deref() {
        Some(name) => {
            let suite = Suite::from_str(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown suite: {name} (use api or ui)"))?;
            TestCase::for_suite(suite)
        }
        None => TestCase::all(),
    };

    println!("\nTest Cases ({} total)\n", cases.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut current_category = "";

    for test_case in cases {
        let category = test_case.category();
        if category != current_category {
            println!("\n{} / {category}:", test_case.suite());
            println!("──────────────────────────────────────────────────────────────────────");
            current_category = category;
        }

        if args.detailed {
            println!(
                "  {:12} {:45} [{}]",
                test_case.code(),
                test_case.name(),
                test_case.category()
            );
        } else {
            println!("  {:12} {}", test_case.code(), test_case.name());
        }
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    Ok(())
}

fn manage_config(args: cli::ConfigArgs, explicit: Option<&Path>) -> Result<()> {
    use config::{print_env_help, EnvConfig};

    match args.action {
        cli::ConfigAction::Show => {
            let config = AppConfig::resolve(explicit)?;
            println!("{}", serde_yaml::to_string(&config)?);
        }

        cli::ConfigAction::Init { path, force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {}. Use --force to overwrite.",
                    path.display()
                );
            }

            AppConfig::default().save(&path)?;
            println!("✓ Configuration file created: {}", path.display());
            println!("\nEdit the file to customize your settings.");
        }

        cli::ConfigAction::Env => {
            print_env_help();
            println!();
            EnvConfig::load().print_summary();
        }
    }

    Ok(())
}
