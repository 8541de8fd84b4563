//! abro-authz - authorization engine and decision service
//!
//! `serve` runs the HTTP decision service, `check` answers one query offline
//! and `validate` loads a policy file without serving it.

#![allow(missing_docs)]

use abro_authz::config::DEFAULT_CONFIG_PATH;
use abro_authz::utils::logging::{LogFormat, init_logging};
use abro_authz::{AuthorizationEngine, AuthzService, Config};
use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(name = "abro-authz", author, version, about, long_about = None)]
struct Cli {
    /// Path to the policy file
    #[arg(short, long, env = "ABRO_AUTHZ_CONFIG", default_value = DEFAULT_CONFIG_PATH, global = true)]
    config: PathBuf,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Log output format (text or json)
    #[arg(long, default_value = "text", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP decision service (default)
    Serve,

    /// Evaluate a single query against the policy file
    Check(CheckArgs),

    /// Load and validate the policy file
    Validate,
}

/// Either `--permission`, or `--resource-type`/`--resource-id`/`--action`
#[derive(Args, Debug)]
struct CheckArgs {
    /// Actor to evaluate
    #[arg(long)]
    actor: String,

    /// Permission name such as `hr.approve_leave`
    #[arg(long, conflicts_with_all = ["resource_type", "resource_id", "action"])]
    permission: Option<String>,

    /// Resource type such as `employee.profile`
    #[arg(long, requires_all = ["resource_id", "action"])]
    resource_type: Option<String>,

    /// Resource id, compared with the actor for self-scoped roles
    #[arg(long)]
    resource_id: Option<String>,

    /// Action on the resource
    #[arg(long)]
    action: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.log_format);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // Alternate Display prints the whole context chain
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&cli.config).await,
        Command::Check(args) => check(&cli.config, args).await,
        Command::Validate => validate(&cli.config).await,
    }
}

async fn load_config(path: &Path) -> anyhow::Result<Config> {
    Config::from_file(path)
        .await
        .with_context(|| format!("failed to load policy file {}", path.display()))
}

async fn serve(path: &Path) -> anyhow::Result<ExitCode> {
    let config = if path.exists() {
        load_config(path).await?
    } else {
        warn!(
            "Policy file {} not found, starting with defaults",
            path.display()
        );
        let mut config = Config::default();
        config.apply_env()?;
        config
    };

    info!("Serving on http://{}", config.server().address());

    let service = AuthzService::new(config).context("failed to build authorization engine")?;
    service.run().await?;
    Ok(ExitCode::SUCCESS)
}

async fn check(path: &Path, args: CheckArgs) -> anyhow::Result<ExitCode> {
    let config = load_config(path).await?;
    let engine = AuthorizationEngine::from_config(&config)?;

    let decision = match (&args.permission, &args.resource_type) {
        (Some(permission), None) => engine.check_permission_detailed(&args.actor, permission),
        (None, Some(resource_type)) => engine.check_resource_detailed(
            &args.actor,
            resource_type,
            args.resource_id.as_deref().unwrap_or_default(),
            args.action.as_deref().unwrap_or_default(),
        ),
        _ => bail!("pass either --permission or --resource-type/--resource-id/--action"),
    };

    let role = decision
        .role
        .as_ref()
        .map_or("<none>", |role| role.as_str());

    if decision.granted {
        println!("allowed (role {})", role);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("denied: {} (role {})", decision.reason.as_str(), role);
        Ok(ExitCode::FAILURE)
    }
}

async fn validate(path: &Path) -> anyhow::Result<ExitCode> {
    let config = load_config(path).await?;
    let engine = AuthorizationEngine::from_config(&config)?;

    println!(
        "{}: ok ({:?} resolution, {} roles, {} permissions, {} assignments)",
        path.display(),
        engine.resolution(),
        engine.role_count(),
        engine.permission_count(),
        engine.assignment_count()
    );
    Ok(ExitCode::SUCCESS)
}
