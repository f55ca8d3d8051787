//! Property Manager rule builder entry point.
//!
//! Binary name: `papi`
//!
//! Parses CLI arguments, sets up tracing, then dispatches to the command
//! handler.

mod cli;

use clap::Parser;
use clap_complete::generate;
use papi_observe::tracing_setup::{LogFormat, TracingOptions, init_tracing, shutdown_tracing};

use cli::{Cli, Commands, ConfigCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let default_filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,papi_core=debug,papi_infra=debug",
        _ => "trace",
    };
    init_tracing(&TracingOptions {
        default_filter: default_filter.to_string(),
        format: if cli.json {
            LogFormat::Json
        } else {
            LogFormat::Text
        },
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Init {
            origin,
            cp_code,
            rule_format,
            secure,
            output,
        } => {
            let options = cli::init::StarterOptions {
                origin,
                cp_code,
                rule_format,
                secure,
            };
            cli::init::init(&options, output.as_deref(), cli.json).await?;
        }

        Commands::Normalize {
            input,
            output,
            check,
        } => {
            cli::normalize::normalize(&input, output.as_deref(), check, cli.json).await?;
        }

        Commands::Catalog { kind, name } => {
            cli::catalog::show_catalog(kind, name.as_deref(), cli.json)?;
        }

        Commands::Config { action } => match action {
            ConfigCommand::Show { config } => {
                cli::config::show_config(config, cli.json).await?;
            }
        },

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "papi", &mut std::io::stdout());
        }
    }

    Ok(())
}
