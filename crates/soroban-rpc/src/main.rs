//! soroban-rpc - Soroban transaction simulation gateway
//!
//! This binary serves the `simulateTransaction` JSON-RPC method in front of a
//! stellar-core instance, and offers a few offline helpers.
//!
//! # Quick Start
//!
//! ```bash
//! # Serve JSON-RPC on 0.0.0.0:8000 against a local standalone core
//! soroban-rpc run
//!
//! # Simulate one transaction without starting a server
//! soroban-rpc simulate --transaction AAAAAgAAAAB...
//!
//! # Build a signed install transaction for a contract
//! soroban-rpc install-tx --wasm contract.wasm
//! ```
//!
//! # Configuration
//!
//! - A TOML configuration file (`--config <FILE>`)
//! - Built-in network presets (`--testnet`, `--futurenet`; standalone by default)
//! - Environment variables (prefixed with `SOROBAN_RPC_`)
//!
//! See `soroban-rpc sample-config` for an example configuration.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use soroban_rpc_app::logging::{self, LogConfig, LogFormat};
use soroban_rpc_app::run_cmd::{run_server, server_state};
use soroban_rpc_app::{simulate, AppConfig, SimulateTransactionRequest};
use soroban_rpc_crypto::SecretKey;
use soroban_rpc_tx::builder::{build_install_contract_code_tx, DEFAULT_FEE};

/// Soroban transaction simulation gateway
#[derive(Parser)]
#[command(name = "soroban-rpc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Log output format (overrides the config file)
    #[arg(long, global = true)]
    log_format: Option<CliLogFormat>,

    /// Use testnet configuration
    #[arg(long, global = true, conflicts_with = "futurenet")]
    testnet: bool,

    /// Use futurenet configuration
    #[arg(long, global = true)]
    futurenet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Log output format for CLI
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum CliLogFormat {
    #[default]
    Text,
    Json,
}

impl From<CliLogFormat> for LogFormat {
    fn from(fmt: CliLogFormat) -> Self {
        match fmt {
            CliLogFormat::Text => LogFormat::Text,
            CliLogFormat::Json => LogFormat::Json,
        }
    }
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Serve JSON-RPC
    Run,

    /// Simulate a single transaction against the configured core
    Simulate {
        /// Base64 XDR transaction envelope
        #[arg(long, value_name = "BASE64")]
        transaction: String,
    },

    /// Print a signed, base64 install-contract-code transaction
    InstallTx {
        /// Contract code to install
        #[arg(long, value_name = "FILE")]
        wasm: PathBuf,

        /// Source account sequence number
        #[arg(long, default_value = "1")]
        sequence: i64,

        /// Transaction fee in stroops
        #[arg(long, default_value_t = DEFAULT_FEE)]
        fee: u32,

        /// Signing seed (S...); defaults to the network root account
        #[arg(long, env = "SOROBAN_RPC_SECRET_KEY", value_name = "SEED")]
        secret_key: Option<String>,
    },

    /// Print sample configuration
    SampleConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let log_handle = init_logging(&cli, &config)?;
    tracing::debug!(network = %config.network.passphrase, "Configuration loaded");

    match cli.command {
        Commands::Run => run_server(config, Some(log_handle)).await,
        Commands::Simulate { transaction } => cmd_simulate(config, transaction).await,
        Commands::InstallTx {
            wasm,
            sequence,
            fee,
            secret_key,
        } => cmd_install_tx(&config, &wasm, sequence, fee, secret_key.as_deref()),
        Commands::SampleConfig => cmd_sample_config(),
    }
}

/// Initialize logging from the config file, then CLI flags.
fn init_logging(cli: &Cli, config: &AppConfig) -> anyhow::Result<logging::LogLevelHandle> {
    let mut log_config = config.logging.to_log_config();
    if cli.trace {
        log_config = log_config.with_level("trace");
    } else if cli.verbose {
        log_config = log_config.with_level("debug");
    }

    if let Some(format) = cli.log_format {
        log_config = match format {
            CliLogFormat::Text => LogConfig {
                format: format.into(),
                ..log_config
            },
            CliLogFormat::Json => LogConfig {
                format: format.into(),
                ansi_colors: false,
                ..log_config
            },
        };
    }

    logging::init_with_handle(&log_config)
}

/// Load configuration from file or use a preset.
fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let config = if let Some(ref config_path) = cli.config {
        AppConfig::from_file_with_env(config_path)?
    } else {
        let mut config = if cli.testnet {
            AppConfig::testnet()
        } else if cli.futurenet {
            AppConfig::futurenet()
        } else {
            AppConfig::standalone()
        };
        config.apply_env_overrides();
        config
    };
    config.validate()?;
    Ok(config)
}

/// Simulate command handler.
async fn cmd_simulate(config: AppConfig, transaction: String) -> anyhow::Result<()> {
    let state = server_state(&config)?;
    let response = simulate(&state, &SimulateTransactionRequest { transaction }).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    if let Some(error) = &response.error {
        anyhow::bail!("simulation failed: {}", error);
    }
    Ok(())
}

/// Install-tx command handler.
fn cmd_install_tx(
    config: &AppConfig,
    wasm: &Path,
    sequence: i64,
    fee: u32,
    secret_key: Option<&str>,
) -> anyhow::Result<()> {
    let code = std::fs::read(wasm)?;
    let key = match secret_key {
        Some(seed) => SecretKey::from_strkey(seed)?,
        None => SecretKey::network_root(&config.network.passphrase),
    };

    let (envelope, hash) =
        build_install_contract_code_tx(code, sequence, fee, &config.network_id(), &key)?;
    tracing::info!(
        source = %key.public_key().to_strkey(),
        code_hash = %hash.to_hex(),
        "Built install transaction"
    );
    println!("{}", soroban_rpc_common::xdr::to_base64(&envelope)?);
    Ok(())
}

/// Sample config command handler.
fn cmd_sample_config() -> anyhow::Result<()> {
    println!("{}", AppConfig::sample_config());
    Ok(())
}
