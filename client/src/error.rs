//! Error types for each pipeline stage, and the [`EnrollError`] they all surface through.

use std::time::Duration;

use enrollment_interface::instructions::{
    EnrollmentInstruction,
    SchemaMismatch,
};
use solana_sdk::{
    pubkey::Pubkey,
    signature::Signature,
    signer::SignerError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("secret isn't valid base-58: {0}")]
    Base58(#[from] bs58::decode::Error),

    #[error("secret decodes to {actual} bytes, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("secret bytes aren't a valid ed25519 keypair: {0}")]
    InvalidKeypair(String),
}

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("invalid {kind} endpoint `{url}`: {reason}")]
    InvalidEndpoint {
        kind: &'static str,
        url: String,
        reason: String,
    },

    #[error("endpoint {url} is unreachable: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("signature subscription closed before confirmation")]
    SubscriptionClosed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DerivationError {
    #[error("no bump in 255..=0 yields an off-curve address for program {program_id}")]
    NoViableBump { program_id: Pubkey },

    #[error("{count} seeds given, at most {max} allowed")]
    TooManySeeds { count: usize, max: usize },

    #[error("seed {index} is {len} bytes, at most {max} allowed")]
    SeedTooLong { index: usize, len: usize, max: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("`{instruction}` is missing required account `{account}`")]
    MissingAccount {
        instruction: EnrollmentInstruction,
        account: &'static str,
    },

    #[error("`{instruction}` is missing required argument `{argument}`")]
    MissingArgument {
        instruction: EnrollmentInstruction,
        argument: &'static str,
    },

    #[error("`{instruction}` doesn't match its account schema: {mismatch}")]
    Schema {
        instruction: EnrollmentInstruction,
        mismatch: SchemaMismatch,
    },

    #[error("{0} is listed as an additional signer but no instruction references it")]
    UnknownSigner(Pubkey),

    #[error("transaction has no instructions")]
    EmptyTransaction,

    #[error("couldn't encode {what}: {reason}")]
    Encoding { what: &'static str, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("serialized transaction is {size} bytes, the limit is {limit}")]
pub struct SizeLimitError {
    pub size: usize,
    pub limit: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no signing identity supplied for required signer(s): {}", display_list(.missing))]
pub struct MissingSignerError {
    pub missing: Vec<Pubkey>,
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("recency anchor expired before confirmation; fetch a new blockhash and rebuild")]
    BlockhashExpired,

    #[error("preflight simulation failed: {message}")]
    Preflight { message: String, logs: Vec<String> },

    #[error("transaction {signature} failed on chain: {reason}")]
    Rejected { signature: Signature, reason: String },

    #[error("rpc rejected the transaction: {0}")]
    Rpc(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{operation} timed out after {}s", .after.as_secs())]
pub struct TimeoutError {
    pub operation: &'static str,
    pub after: Duration,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrerequisiteError {
    #[error("enrollment account {account} doesn't exist; run `initialize` first")]
    NotInitialized { account: Pubkey },
}

#[derive(Debug, Error)]
pub enum EnrollError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Derivation(#[from] DerivationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    SizeLimit(#[from] SizeLimitError),

    #[error(transparent)]
    MissingSigner(#[from] MissingSignerError),

    #[error("signing failed: {0}")]
    Signing(#[from] SignerError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Timeout(#[from] TimeoutError),

    #[error(transparent)]
    Prerequisite(#[from] PrerequisiteError),
}

pub type EnrollResult<T> = Result<T, EnrollError>;

impl EnrollError {
    /// The pipeline stage the error came from, for diagnostics.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Decode(_) => "Key loader",
            Self::Connection(_) => "Connection",
            Self::Derivation(_) => "Address deriver",
            Self::Validation(_) => "Instruction builder",
            Self::SizeLimit(_) => "Transaction assembler",
            Self::MissingSigner(_) | Self::Signing(_) => "Signer",
            Self::Submission(_) => "Submitter",
            Self::Timeout(_) => "Timeout",
            Self::Prerequisite(_) => "Prerequisite",
        }
    }

    /// Process exit code for the error kind. `0` and `1` are left for success and usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Decode(_) => 2,
            Self::Connection(_) => 3,
            Self::Derivation(_) => 4,
            Self::Validation(_) => 5,
            Self::SizeLimit(_) => 6,
            Self::MissingSigner(_) | Self::Signing(_) => 7,
            Self::Submission(_) => 8,
            Self::Timeout(_) => 9,
            Self::Prerequisite(_) => 10,
        }
    }
}

fn display_list(keys: &[Pubkey]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
