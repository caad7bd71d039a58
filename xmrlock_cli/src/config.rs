use crate::settings::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Proof-gated atomic locks for Monero swaps.
///
/// Generates swap secrets and lock parameters, verifies them, and dry-runs a lock against an in-memory ledger.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Config {
    /// Path to the configuration file. The default is `$HOME/.xmrlock/config.yml`.
    #[arg(long = "config-file", short = 'c', env = "XMRLOCK_CONFIG")]
    pub config_file: Option<PathBuf>,
    /// Output format. Overrides the configuration file.
    #[arg(long = "format", short = 'f', value_enum)]
    pub output_format: Option<OutputFormat>,
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Generate swap secrets, or recover a spend key from a revealed secret.
    #[command(subcommand, name = "secret")]
    Secret(SecretCommand),
    /// Check lock parameters.
    #[command(subcommand, name = "params")]
    Params(ParamsCommand),
    /// Run a lock through its lifecycle locally.
    #[command(subcommand, name = "lock")]
    Lock(LockCommand),
    /// Print the canonical test vector.
    #[command(name = "vectors", alias = "vector")]
    Vectors,
}

#[derive(Debug, Subcommand)]
pub enum SecretCommand {
    /// Split a spend key and produce the hashlock, adaptor point and DLEQ proof.
    #[command(name = "new", alias = "create")]
    New {
        /// The Monero spend key, as hex. If omitted, a random key is generated.
        #[arg(long = "spend-key")]
        spend_key: Option<String>,
        /// Write the public lock parameters (JSON) to this file.
        #[arg(long = "lock-params")]
        lock_params: Option<PathBuf>,
    },
    /// Recover the spend key from the base share and the secret revealed by the lock.
    #[command(name = "recover")]
    Recover {
        /// The base share of the spend key, as hex.
        #[arg(long = "base")]
        base: String,
        /// The 32-byte secret published when the lock was released, as hex.
        #[arg(long = "revealed")]
        revealed: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ParamsCommand {
    /// Validate the adaptor point and DLEQ proof in a lock parameters file.
    #[command(name = "verify", alias = "check")]
    Verify {
        /// Path to the lock parameters JSON file.
        file: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum LockCommand {
    /// Create, fund and release a lock against an in-memory ledger, saving each state.
    #[command(name = "simulate", alias = "sim")]
    Simulate(SimulateCommand),
}

#[derive(Debug, Args)]
pub struct SimulateCommand {
    /// Path to a swap secrets file, as printed by `xmrlock secret new --format json`.
    pub file: PathBuf,
    /// Amount to lock, in whole tokens.
    #[arg(long = "amount", short = 'a', default_value = "1")]
    pub amount: String,
    /// Decimal places of the simulated token.
    #[arg(long = "decimals", default_value_t = 18)]
    pub decimals: u32,
}

pub struct GlobalOptions {
    pub config_file: Option<PathBuf>,
    pub output_format: Option<OutputFormat>,
}

impl Config {
    pub fn to_parts(self) -> (GlobalOptions, CliCommand) {
        let global = GlobalOptions { config_file: self.config_file, output_format: self.output_format };
        (global, self.command)
    }
}
