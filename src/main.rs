use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use kurs::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for kurs::AppCommand {
    fn from(cmd: Commands) -> kurs::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => {
                kurs::AppCommand::Convert { amount, from, to }
            }
            Commands::Rates { base } => kurs::AppCommand::Rates { base },
            Commands::Currencies => kurs::AppCommand::Currencies,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        amount: f64,
        /// Currency to convert from (defaults to the configured base)
        from: Option<String>,
        /// Currency to convert to (defaults to the configured target)
        to: Option<String>,
    },
    /// Display all exchange rates for a base currency
    Rates {
        /// Base currency (defaults to the configured base)
        base: Option<String>,
    },
    /// List supported currencies
    Currencies,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => kurs::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = kurs::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
providers:
  exchangerate_api:
    base_url: "https://api.exchangerate-api.com"
  exchange_host:
    base_url: "https://api.exchangerate.host"
  fawaz:
    base_url: "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest"

base: "USD"
target: "INR"
timeout_secs: 10
rate_ttl_secs: 300
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
