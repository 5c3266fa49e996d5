//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// GPU telemetry collector
///
/// Report utilization, memory, temperature, power, clocks and fan speed for
/// NVIDIA GPUs (via nvidia-smi) and Apple Silicon GPUs.
#[derive(Parser, Debug)]
#[command(name = "gputel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "GPUTEL_CONFIG")]
    pub config: Option<String>,

    /// Name or path of the nvidia-smi binary
    #[arg(long, global = true, env = "GPUTEL_NVIDIA_SMI")]
    pub nvidia_smi: Option<String>,

    /// Timeout in seconds for each external tool invocation
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect one telemetry snapshot and print it
    Snapshot,

    /// List detected GPUs
    List,

    /// Serve snapshots over HTTP (GET /gpu)
    Serve(ServeArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "GPUTEL_BIND")]
    pub bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT", value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_snapshot() {
        let args = Cli::try_parse_from(["gputel", "snapshot"]).unwrap();
        assert!(matches!(args.command, Commands::Snapshot));
    }

    #[test]
    fn test_cli_parse_verbose_and_format() {
        let args = Cli::try_parse_from(["gputel", "-v", "--format", "json", "list"]).unwrap();
        assert!(args.verbose);
        assert!(matches!(args.format, OutputFormat::Json));
        assert!(matches!(args.command, Commands::List));
    }

    #[test]
    fn test_cli_parse_serve() {
        let args = Cli::try_parse_from([
            "gputel",
            "serve",
            "--bind",
            "127.0.0.1",
            "--port",
            "8080",
        ])
        .unwrap();
        if let Commands::Serve(serve) = args.command {
            assert_eq!(serve.bind.as_deref(), Some("127.0.0.1"));
            assert_eq!(serve.port, Some(8080));
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_cli_global_collector_options() {
        let args = Cli::try_parse_from([
            "gputel",
            "snapshot",
            "--timeout",
            "3",
            "--nvidia-smi",
            "/usr/bin/nvidia-smi",
        ])
        .unwrap();
        assert_eq!(args.timeout, Some(3));
        assert_eq!(args.nvidia_smi.as_deref(), Some("/usr/bin/nvidia-smi"));
    }

    #[test]
    fn test_cli_timeout_validation() {
        let result = Cli::try_parse_from(["gputel", "snapshot", "--timeout", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }
}
