//! gputel - GPU telemetry collector
//!
//! A command-line tool and HTTP service reporting NVIDIA and Apple Silicon
//! GPU telemetry.

use clap::Parser;
use gputel::cli::args::{generate_completions, Cli, Commands};
use gputel::commands::{run_list, run_serve, run_snapshot};
use gputel::config::{Config, ConfigBuilder};
use gputel::error::AppError;
use gputel::services::Collector;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG, when set, takes precedence over --verbose
    let explicit_filter = std::env::var_os("RUST_LOG").is_some();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .format_timestamp(None)
        .init();
    if !explicit_filter {
        log::set_max_level(log_level(cli.verbose));
    }

    let result = match load_config(&cli) {
        Ok(config) => {
            if !explicit_filter {
                log::set_max_level(log_level(config.general.verbose));
            }
            run(&cli, &config).await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn log_level(verbose: bool) -> log::LevelFilter {
    if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    }
}

fn load_config(cli: &Cli) -> Result<Config, AppError> {
    let (bind, port) = match &cli.command {
        Commands::Serve(args) => (args.bind.clone(), args.port),
        _ => (None, None),
    };

    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_verbose(cli.verbose.then_some(true))
        .with_command_timeout(cli.timeout)
        .with_nvidia_smi(cli.nvidia_smi.clone())
        .with_bind(bind)
        .with_port(port)
        .build()?;

    Ok(config)
}

async fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    let collector = Collector::from_config(&config.collector);

    match &cli.command {
        Commands::Snapshot => run_snapshot(&collector, cli.format).await,

        Commands::List => run_list(&collector, cli.format).await,

        Commands::Serve(_) => run_serve(&config.server, collector).await,

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Collection(message) if message.contains("timed out") => {
            eprintln!();
            eprintln!("Hint: A GPU tool did not respond in time.");
            eprintln!("      Raise the limit with --timeout or collector.command_timeout_seconds.");
        }
        AppError::Collection(message) if message.contains("nvidia-smi") => {
            eprintln!();
            eprintln!("Hint: nvidia-smi was found but failed to report GPUs.");
            eprintln!("      Check that the NVIDIA driver is loaded by running 'nvidia-smi'.");
        }
        AppError::Server(_) => {
            eprintln!();
            eprintln!("Hint: Is another process already listening on this port?");
            eprintln!("      Choose a different one with --port.");
        }
        _ => {}
    }
}
