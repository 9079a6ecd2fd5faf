//! Program boundary constants and confirmation settings, gathered so they can be swapped out.

use std::time::Duration;

use enrollment_interface::seeds::{
    collection::COLLECTION_SEED,
    enrollment::ENROLLMENT_SEED,
};
use solana_commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;

/// Largest serialized transaction the network accepts: the IPv6 MTU minus headers.
pub const MAX_TRANSACTION_SIZE: usize = 1232;

/// The external programs and accounts the enrollment instructions are built against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramConfig {
    pub program_id: Pubkey,
    pub mpl_core_program: Pubkey,
    pub system_program: Pubkey,
    pub collection: Pubkey,
    pub enrollment_seed: Vec<u8>,
    pub collection_seed: Vec<u8>,
    pub max_transaction_size: usize,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            program_id: enrollment_interface::program::ID,
            mpl_core_program: enrollment_interface::mpl_core::ID,
            system_program: enrollment_interface::system_program::ID,
            collection: enrollment_interface::COLLECTION,
            enrollment_seed: ENROLLMENT_SEED.to_vec(),
            collection_seed: COLLECTION_SEED.to_vec(),
            max_transaction_size: MAX_TRANSACTION_SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[derive(strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl From<Commitment> for CommitmentConfig {
    fn from(value: Commitment) -> Self {
        match value {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

/// How a submission is sent and how long the submitter waits on the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    pub commitment: Commitment,
    pub skip_preflight: bool,
    /// Bound on each individual RPC request.
    pub request_timeout: Duration,
    /// Bound on waiting for the requested commitment after sending.
    pub confirmation_timeout: Duration,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            commitment: Commitment::Confirmed,
            skip_preflight: false,
            request_timeout: Duration::from_secs(30),
            confirmation_timeout: Duration::from_secs(90),
        }
    }
}

impl ConfirmationPolicy {
    pub fn commitment_config(&self) -> CommitmentConfig {
        self.commitment.into()
    }
}
