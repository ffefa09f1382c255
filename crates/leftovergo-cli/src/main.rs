use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use leftovergo_core::app::{BuildError, DeliveryPolicy, MarketplaceConfig};
use leftovergo_core::LeftoverError;

mod demo;
mod logging;

use crate::logging::LogFormat;

#[derive(Debug, Parser)]
#[command(author, version, about = "LeftOverGo surplus-food marketplace")]
struct Cli {
    #[command(flatten)]
    logging: LoggingArgs,

    #[command(subcommand)]
    command: Command,
}

/// Logging settings.
#[derive(Debug, Args)]
struct LoggingArgs {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a donor → receiver → delivery walkthrough and print each role's view.
    Demo(DemoArgs),
}

#[derive(Debug, Args)]
struct DemoArgs {
    /// Let any delivery partner mark a picked-up listing as delivered.
    #[arg(long)]
    lenient_delivery: bool,

    /// Start without the sample listing.
    #[arg(long)]
    no_seed: bool,

    /// Completed deliveries shown on the delivery dashboard.
    #[arg(long, default_value_t = leftovergo_core::app::DEFAULT_RECENT_COMPLETED_LIMIT)]
    recent_completed_limit: usize,
}

impl DemoArgs {
    fn config(&self) -> MarketplaceConfig {
        MarketplaceConfig {
            delivery_policy: if self.lenient_delivery {
                DeliveryPolicy::AnyDeliveryPartner
            } else {
                DeliveryPolicy::AssignedPartnerOnly
            },
            seed_sample_listing: !self.no_seed,
            recent_completed_limit: self.recent_completed_limit,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("logging setup failed: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("{0}")]
    Domain(#[from] LeftoverError),

    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    logging::init(&cli.logging.log_level, cli.logging.log_format)?;

    match cli.command {
        Command::Demo(args) => demo::run(args.config()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_flags_map_to_config() {
        let cli = Cli::try_parse_from([
            "leftovergo",
            "demo",
            "--lenient-delivery",
            "--no-seed",
            "--recent-completed-limit",
            "5",
        ])
        .unwrap();
        let Command::Demo(args) = cli.command;
        let config = args.config();
        assert_eq!(config.delivery_policy, DeliveryPolicy::AnyDeliveryPartner);
        assert!(!config.seed_sample_listing);
        assert_eq!(config.recent_completed_limit, 5);
    }

    #[test]
    fn demo_defaults_match_marketplace_defaults() {
        let cli = Cli::try_parse_from(["leftovergo", "demo"]).unwrap();
        let Command::Demo(args) = cli.command;
        assert_eq!(args.config(), MarketplaceConfig::default());
    }
}
