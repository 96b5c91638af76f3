use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;

use rotator::cli::{Cli, Commands};
use rotator::config::{StaticConfig, init_config};
use rotator::errors::RotatorError;

#[actix_web::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_startup_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command() {
        Commands::GenerateConfig { output, force } => generate_config(output.as_deref(), force),
        #[cfg(feature = "server")]
        Commands::Serve => serve(&cli.config).await,
        #[cfg(not(feature = "server"))]
        Commands::Serve => bail!("this build does not include the `server` feature"),
    }
}

#[cfg(feature = "server")]
async fn serve(config_path: &str) -> Result<()> {
    let config = init_config(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;

    // guard 必须存活到进程结束，否则缓冲中的日志会丢失
    let _log_guard =
        rotator::system::init_logging(&config.logging).context("Failed to initialize logging")?;

    tracing::info!(
        "rotator {} starting (config: {})",
        env!("CARGO_PKG_VERSION"),
        config_path
    );

    rotator::runtime::modes::run_server().await
}

fn generate_config(output: Option<&str>, force: bool) -> Result<()> {
    let sample = StaticConfig::generate_sample_config();

    match output {
        None => {
            println!("{}", sample);
            Ok(())
        }
        Some(path) => {
            if std::path::Path::new(path).exists() && !force {
                bail!("{} already exists, use --force to overwrite", path);
            }
            std::fs::write(path, sample).with_context(|| format!("Failed to write {}", path))?;
            println!("{} {}", "Sample configuration written to".green(), path);
            Ok(())
        }
    }
}

fn print_startup_error(err: &anyhow::Error) {
    match err.chain().find_map(|cause| cause.downcast_ref::<RotatorError>()) {
        Some(rotator_err) => {
            eprintln!("{}", format!("{:#}", err).red());
            eprintln!("{}", rotator_err.format_colored());
        }
        None => eprintln!("{} {:#}", "[ERROR]".red().bold(), err),
    }
}
