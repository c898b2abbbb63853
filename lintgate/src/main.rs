//! `lintgate`: run flake8 inside the `backend_api` virtualenv as a CI gate.
//!
//! Exits 0 when the lint tool passes and exactly 1 when it fails for any
//! reason. Setup failures (config, project dir, venv, missing tool) exit 2.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use lintgate::exit_codes;
use lintgate::gate::run_gate;
use lintgate::io::config::{ConfigOverrides, DEFAULT_CONFIG_FILE, GateConfig, load_config};
use lintgate::io::lint::ProcessLintRunner;
use lintgate::logging;

#[derive(Parser)]
#[command(
    name = "lintgate",
    version,
    about = "Run the project linter in its virtualenv as a pass/fail gate"
)]
struct Cli {
    /// Config file. Defaults to `lintgate.toml` when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Project directory to lint.
    #[arg(long)]
    project_dir: Option<PathBuf>,

    /// Virtual environment, relative to the project directory.
    #[arg(long = "venv")]
    venv_dir: Option<PathBuf>,

    /// Kill the lint tool and fail after this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,

    /// Arguments for the lint tool, replacing the configured ones.
    #[arg(last = true)]
    lint_args: Vec<String>,
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("lintgate: {:#}", err);
            exit_codes::SETUP_FAILED
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let base_dir = std::env::current_dir().context("read current directory")?;
    let print_config = cli.print_config;
    let config = effective_config(cli, &base_dir)?;

    if print_config {
        print!("{}", config.to_toml()?);
        return Ok(exit_codes::PASS);
    }

    let inherited_path = std::env::var_os("PATH");
    let outcome = run_gate(
        &config,
        &base_dir,
        inherited_path.as_deref(),
        &ProcessLintRunner,
    )?;
    Ok(outcome.exit_code())
}

/// Load the config file, then layer command-line overrides on top.
fn effective_config(cli: Cli, base_dir: &Path) -> Result<GateConfig> {
    let (path, required) = match cli.config {
        Some(path) => (base_dir.join(path), true),
        None => (base_dir.join(DEFAULT_CONFIG_FILE), false),
    };
    let mut config = load_config(&path, required)?;
    config.apply(ConfigOverrides {
        project_dir: cli.project_dir,
        venv_dir: cli.venv_dir,
        timeout_secs: cli.timeout_secs,
        lint_args: cli.lint_args,
    });
    config.validate(&path)?;
    Ok(config)
}
