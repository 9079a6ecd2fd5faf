//! RPC and subscription handles, and the [`Ledger`] seam the pipeline talks to the network through.

use std::{
    future::Future,
    time::Duration,
};

use solana_client::{
    client_error::ClientError,
    nonblocking::rpc_client::RpcClient,
};
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
};
use url::Url;

use crate::{
    config::ConfirmationPolicy,
    error::{
        ConnectionError,
        EnrollError,
        EnrollResult,
        TimeoutError,
    },
    submit::SubmissionResult,
    transactions::SignedTransaction,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[derive(strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Cluster {
    #[default]
    Devnet,
    Testnet,
    MainnetBeta,
    Localnet,
}

impl Cluster {
    pub fn rpc_url(self) -> &'static str {
        match self {
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
            Self::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Self::Localnet => "http://localhost:8899",
        }
    }

    pub fn ws_url(self) -> &'static str {
        match self {
            Self::Devnet => "wss://api.devnet.solana.com",
            Self::Testnet => "wss://api.testnet.solana.com",
            Self::MainnetBeta => "wss://api.mainnet-beta.solana.com",
            Self::Localnet => "ws://localhost:8900",
        }
    }

    pub fn explorer_tx_url(self, signature: impl std::fmt::Display) -> String {
        let base = format!("https://explorer.solana.com/tx/{signature}");
        match self {
            Self::MainnetBeta => base,
            Self::Localnet => format!("{base}?cluster=custom&customUrl=http%3A%2F%2Flocalhost%3A8899"),
            other => format!("{base}?cluster={other}"),
        }
    }
}

/// A recent blockhash and the last block height at which transactions referencing it land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecencyAnchor {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

/// The network operations the pipeline needs. [`Connection`] is the live implementation.
#[allow(async_fn_in_trait)]
pub trait Ledger {
    async fn latest_anchor(&self) -> EnrollResult<RecencyAnchor>;

    async fn account_exists(&self, address: &Pubkey) -> EnrollResult<bool>;

    /// Sends the transaction once and waits for the policy's commitment. Never retries.
    async fn submit(
        &self,
        transaction: &SignedTransaction,
        policy: &ConfirmationPolicy,
    ) -> EnrollResult<SubmissionResult>;
}

/// Handles to one cluster's RPC and subscription endpoints. Creating it doesn't touch the
/// network; unreachable endpoints surface on first use.
pub struct Connection {
    pub(crate) cluster: Cluster,
    pub(crate) rpc: RpcClient,
    pub(crate) rpc_url: String,
    pub(crate) ws_url: String,
    pub(crate) policy: ConfirmationPolicy,
}

impl Connection {
    pub fn new(
        cluster: Cluster,
        rpc_url: Option<&str>,
        ws_url: Option<&str>,
        policy: ConfirmationPolicy,
    ) -> Result<Self, ConnectionError> {
        let rpc_url = check_endpoint("rpc", rpc_url.unwrap_or(cluster.rpc_url()), &["http", "https"])?;
        let ws_url = check_endpoint("subscription", ws_url.unwrap_or(cluster.ws_url()), &["ws", "wss"])?;

        let rpc = RpcClient::new_with_timeout_and_commitment(
            rpc_url.clone(),
            policy.request_timeout,
            policy.commitment_config(),
        );

        Ok(Self {
            cluster,
            rpc,
            rpc_url,
            ws_url,
            policy,
        })
    }

    pub fn cluster(&self) -> Cluster {
        self.cluster
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub fn ws_url(&self) -> &str {
        &self.ws_url
    }

    pub(crate) fn unreachable(&self, url: &str, error: impl ToString) -> EnrollError {
        ConnectionError::Unreachable {
            url: url.to_string(),
            reason: error.to_string(),
        }
        .into()
    }

    /// Maps a failed query (not a submission) to a connection error.
    pub(crate) fn query_error(&self, error: ClientError) -> EnrollError {
        self.unreachable(&self.rpc_url, error)
    }
}

impl Ledger for Connection {
    async fn latest_anchor(&self) -> EnrollResult<RecencyAnchor> {
        let (blockhash, last_valid_block_height) = with_timeout(
            "get_latest_blockhash",
            self.policy.request_timeout,
            self.rpc
                .get_latest_blockhash_with_commitment(self.policy.commitment_config()),
        )
        .await?
        .map_err(|e| self.query_error(e))?;

        Ok(RecencyAnchor {
            blockhash,
            last_valid_block_height,
        })
    }

    async fn account_exists(&self, address: &Pubkey) -> EnrollResult<bool> {
        let response = with_timeout(
            "get_account",
            self.policy.request_timeout,
            self.rpc
                .get_account_with_commitment(address, self.policy.commitment_config()),
        )
        .await?
        .map_err(|e| self.query_error(e))?;

        Ok(response.value.is_some())
    }

    async fn submit(
        &self,
        transaction: &SignedTransaction,
        policy: &ConfirmationPolicy,
    ) -> EnrollResult<SubmissionResult> {
        crate::submit::send_and_confirm(self, transaction, policy).await
    }
}

/// Bounds a network await, reporting expiry as a [`TimeoutError`] for `operation`.
pub(crate) async fn with_timeout<F: Future>(
    operation: &'static str,
    after: Duration,
    future: F,
) -> Result<F::Output, TimeoutError> {
    tokio::time::timeout(after, future)
        .await
        .map_err(|_| TimeoutError { operation, after })
}

fn check_endpoint(
    kind: &'static str,
    url: &str,
    schemes: &[&str],
) -> Result<String, ConnectionError> {
    let invalid = |reason: String| ConnectionError::InvalidEndpoint {
        kind,
        url: url.to_string(),
        reason,
    };

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    if !schemes.contains(&parsed.scheme()) {
        return Err(invalid(format!(
            "scheme must be one of {}",
            schemes.join("/")
        )));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".into()));
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_defaults_are_valid_endpoints() {
        for cluster in [
            Cluster::Devnet,
            Cluster::Testnet,
            Cluster::MainnetBeta,
            Cluster::Localnet,
        ] {
            assert!(check_endpoint("rpc", cluster.rpc_url(), &["http", "https"]).is_ok());
            assert!(check_endpoint("subscription", cluster.ws_url(), &["ws", "wss"]).is_ok());
        }
    }

    #[test]
    fn rejects_mismatched_schemes() {
        assert!(matches!(
            check_endpoint("rpc", "wss://api.devnet.solana.com", &["http", "https"]),
            Err(ConnectionError::InvalidEndpoint { kind: "rpc", .. })
        ));
        assert!(matches!(
            check_endpoint("subscription", "not a url", &["ws", "wss"]),
            Err(ConnectionError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn cluster_parses_from_kebab_case() {
        assert_eq!("mainnet-beta".parse::<Cluster>().unwrap(), Cluster::MainnetBeta);
        assert_eq!("devnet".parse::<Cluster>().unwrap(), Cluster::Devnet);
        assert_eq!(Cluster::Devnet.to_string(), "devnet");
        assert!(Cluster::Devnet
            .explorer_tx_url("abc")
            .ends_with("/tx/abc?cluster=devnet"));
    }
}
