use std::time::Duration;

use clap::{
    Parser,
    Subcommand,
};
use enrollment_client::{
    config::{
        Commitment,
        ConfirmationPolicy,
        ProgramConfig,
    },
    connection::Cluster,
};
use solana_sdk::pubkey::Pubkey;

#[derive(Parser, Debug)]
#[command(name = "enroll", about = "Enrolls a wallet with the prerequisites program", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// devnet, testnet, mainnet-beta or localnet.
    #[arg(long, global = true, default_value_t = Cluster::Devnet)]
    pub cluster: Cluster,

    /// Overrides the cluster's RPC endpoint.
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// Overrides the cluster's subscription endpoint.
    #[arg(long, global = true)]
    pub ws_url: Option<String>,

    #[arg(long, global = true)]
    pub program_id: Option<Pubkey>,

    #[arg(long, global = true)]
    pub collection: Option<Pubkey>,

    /// processed, confirmed or finalized.
    #[arg(long, global = true, default_value_t = Commitment::Confirmed)]
    pub commitment: Commitment,

    #[arg(long, global = true)]
    pub skip_preflight: bool,

    /// Seconds to wait for confirmation after sending.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Prints the wallet's enrollment account without touching the network.
    Address,
    /// Creates the enrollment account with a GitHub handle.
    Initialize {
        /// Falls back to GITHUB_HANDLE.
        #[arg(long)]
        github: Option<String>,
    },
    /// Mints the enrollment NFT into the collection.
    SubmitTs,
}

impl Cli {
    pub fn program_config(&self) -> ProgramConfig {
        let mut config = ProgramConfig::default();
        if let Some(program_id) = self.program_id {
            config.program_id = program_id;
        }
        if let Some(collection) = self.collection {
            config.collection = collection;
        }
        config
    }

    pub fn policy(&self) -> ConfirmationPolicy {
        let defaults = ConfirmationPolicy::default();
        ConfirmationPolicy {
            commitment: self.commitment,
            skip_preflight: self.skip_preflight,
            confirmation_timeout: self
                .timeout_secs
                .map_or(defaults.confirmation_timeout, Duration::from_secs),
            ..defaults
        }
    }
}
