//! petstore-contract CLI - contract tests for a pet-store REST API

mod storage;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use petstore_core::{Config, SchemaKind, TOOL_ERROR_EXIT, VerdictPolicy};
use petstore_runner::{Harness, SuiteRunner, catalog};

#[derive(Parser)]
#[command(name = "petstore-contract")]
#[command(about = "Contract tests for a pet-store REST API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "terminal")]
    output: OutputFormat,

    /// Strict mode (cleanup failures fail the run)
    #[arg(long, global = true, default_value_t = true, action = ArgAction::Set)]
    strict: bool,

    /// Same as `--strict false`
    #[arg(long, global = true)]
    no_strict: bool,

    /// Debug logging for every HTTP step
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the contract suite
    Run {
        /// Config file (default: .petstore.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override base_url (after PETSTORE_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,

        /// Only run cases whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,

        /// Stop after the first failing case
        #[arg(long)]
        stop_on_failure: bool,

        /// Where to save the run report (default: ~/.petstore-contract/reports)
        #[arg(long)]
        report_dir: Option<PathBuf>,
    },

    /// List contract cases
    List,

    /// Print a JSON Schema
    Schema {
        #[arg(value_enum)]
        target: SchemaTarget,
    },

    /// Initialize config file
    Init,

    /// Show resolved config and check the service is reachable
    Doctor {
        /// Config file (default: .petstore.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override base_url (after PETSTORE_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    Terminal,
    Json,
    Silent,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum SchemaTarget {
    Pet,
    Order,
    Inventory,
    ApiError,
    /// The run report written by `run`
    Report,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.output);

    match run(cli) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(3)
        }
    }
}

fn init_tracing(verbose: bool, output: OutputFormat) {
    let default = if verbose {
        "petstore_runner=debug,petstore_contract=debug"
    } else if output == OutputFormat::Silent {
        "petstore_runner=warn"
    } else {
        "petstore_runner=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// `--config` file or the default locations, then `PETSTORE_BASE_URL`, then `--base-url`.
fn resolve_config(path: Option<&Path>, base_url: Option<String>) -> Result<Config> {
    let cfg = match path {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    let cfg = cfg.with_env_overrides().with_base_url_override(base_url);
    cfg.validate()?;
    tracing::debug!(base_url = %cfg.base_url, timeout_secs = cfg.timeout_secs, "config resolved");
    Ok(cfg)
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Run {
            config,
            base_url,
            filter,
            stop_on_failure,
            report_dir,
        } => {
            let cfg = resolve_config(config.as_deref(), base_url)?;
            let harness = Harness::from_config(&cfg)?;
            let cases = catalog();
            let runner = SuiteRunner::new(&harness)
                .with_base_url(cfg.trimmed_base_url())
                .with_filter(filter.clone())
                .with_stop_on_failure(stop_on_failure);

            if cli.output != OutputFormat::Silent {
                eprintln!("Config:");
                eprintln!("  base_url: {}", cfg.base_url);
                eprintln!("  timeout:  {}s", cfg.timeout_secs);
                if !cfg.headers.is_empty() {
                    eprintln!("  headers:  {} configured", cfg.headers.len());
                }
                if let Some(filter) = &filter {
                    eprintln!("  filter:   {filter}");
                }
                eprintln!();
            }

            let started_at = Utc::now();
            let start = Instant::now();
            let report = runner.run(&cases);
            let duration_secs = start.elapsed().as_secs_f64();

            if report.total() == 0 {
                eprintln!(
                    "Error: No cases were run. Check --filter (see `petstore-contract list`)."
                );
                return Ok(TOOL_ERROR_EXIT);
            }

            let policy = VerdictPolicy {
                strict: cli.strict && !cli.no_strict,
            };
            let verdict = policy.verdict(&report);

            match cli.output {
                OutputFormat::Terminal => {
                    println!("{}", report.to_terminal());
                    println!("\n{}: {}", verdict.status, verdict.reason);
                    println!("  Exit code: {}", verdict.exit_code);
                }
                OutputFormat::Json => {
                    let json_output = serde_json::json!({
                        "verdict": verdict,
                        "report": report,
                    });
                    println!("{}", serde_json::to_string_pretty(&json_output)?);
                }
                OutputFormat::Silent => {}
            }

            let report_data = storage::ReportData {
                config: &cfg,
                report: &report,
                verdict: &verdict,
                started_at,
                duration_secs,
            };
            match storage::save_report(&report_data, report_dir.as_deref()) {
                Ok(path) => {
                    if cli.output != OutputFormat::Silent {
                        eprintln!("Report saved: {}", path.display());
                    }
                }
                Err(e) => eprintln!("Warning: failed to save report: {e}"),
            }

            Ok(verdict.exit_code)
        }

        Commands::List => {
            let cases = catalog();
            match cli.output {
                OutputFormat::Json => {
                    let listing: Vec<_> = cases
                        .iter()
                        .map(|c| {
                            serde_json::json!({
                                "name": c.name,
                                "feature": c.feature.as_str(),
                                "title": c.title,
                            })
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&listing)?);
                }
                OutputFormat::Terminal => {
                    for case in &cases {
                        println!("{:<36} {}", case.name, case.title);
                    }
                    println!("\n{} cases", cases.len());
                }
                OutputFormat::Silent => {}
            }
            Ok(0)
        }

        Commands::Schema { target } => {
            let text = match schema_kind(target) {
                Some(kind) => serde_json::to_string_pretty(&kind.document())?,
                None => petstore_core::report::generate_schema(),
            };
            println!("{text}");
            Ok(0)
        }

        Commands::Init => {
            let config_path = ".petstore.toml";
            if Path::new(config_path).exists() {
                eprintln!("{config_path} already exists");
                return Ok(1);
            }

            std::fs::write(config_path, Config::example())?;
            println!("Created {config_path}");
            println!("\nEdit the file to configure:");
            println!("  - base_url: service to test (with the /api/v3 prefix)");
            println!("  - timeout_secs: per-request timeout");
            println!("  - headers: API keys");
            Ok(0)
        }

        Commands::Doctor { config, base_url } => {
            println!("petstore-contract doctor");
            println!("========================\n");

            let has_file = [".petstore.toml", ".petstore.json", "petstore.toml"]
                .iter()
                .any(|p| Path::new(p).exists());
            println!(
                "[{}] Config file (.petstore.toml)",
                if config.is_some() || has_file { "OK" } else { "--" }
            );

            let cfg = resolve_config(config.as_deref(), base_url)?;
            println!("[OK] base_url: {}", cfg.base_url);
            println!("[OK] timeout:  {}s", cfg.timeout_secs);

            let harness = Harness::from_config(&cfg)?;
            let reachable = match harness.api().inventory() {
                Ok(resp) if resp.status == 200 => {
                    println!("[OK] GET /store/inventory -> 200");
                    true
                }
                Ok(resp) => {
                    println!("[NG] GET /store/inventory -> {}", resp.status);
                    false
                }
                Err(e) => {
                    println!("[NG] {e}");
                    false
                }
            };

            if config.is_none() && !has_file {
                println!("\nCreate config file:");
                println!("  petstore-contract init");
            }

            if reachable {
                println!("\nReady to run!");
                Ok(0)
            } else {
                Ok(2)
            }
        }
    }
}

const fn schema_kind(target: SchemaTarget) -> Option<SchemaKind> {
    match target {
        SchemaTarget::Pet => Some(SchemaKind::Pet),
        SchemaTarget::Order => Some(SchemaKind::Order),
        SchemaTarget::Inventory => Some(SchemaKind::Inventory),
        SchemaTarget::ApiError => Some(SchemaKind::ApiError),
        SchemaTarget::Report => None,
    }
}
