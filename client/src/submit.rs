//! Sending signed transactions and waiting for confirmation over the subscription endpoint.

use std::time::Duration;

use enrollment_interface::instructions::EnrollmentInstruction;
use solana_client::{
    client_error::{
        ClientError,
        ClientErrorKind,
    },
    nonblocking::pubsub_client::PubsubClient,
    rpc_config::{
        RpcSendTransactionConfig,
        RpcSignatureSubscribeConfig,
    },
    rpc_request::{
        RpcError::RpcResponseError,
        RpcResponseErrorData,
    },
    rpc_response::{
        ProcessedSignatureResult,
        Response,
        RpcSignatureResult,
        RpcSimulateTransactionResult,
    },
};
use solana_sdk::signature::Signature;
use solana_transaction_error::TransactionError;
use tokio_stream::{
    Stream,
    StreamExt,
};

use crate::{
    config::{
        Commitment,
        ConfirmationPolicy,
    },
    connection::{
        with_timeout,
        Connection,
        RecencyAnchor,
    },
    error::{
        ConnectionError,
        EnrollError,
        EnrollResult,
        SubmissionError,
    },
    logs::{
        log_error,
        log_warning,
    },
    transactions::SignedTransaction,
};

const BLOCK_HEIGHT_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmissionResult {
    pub signature: Signature,
    /// The slot the confirmation notification was observed in.
    pub slot: u64,
    pub commitment: Commitment,
}

pub(crate) async fn send_and_confirm(
    conn: &Connection,
    transaction: &SignedTransaction,
    policy: &ConfirmationPolicy,
) -> EnrollResult<SubmissionResult> {
    let signature = transaction.signature();

    // Subscribe before sending so the notification can't be missed.
    let pubsub = with_timeout(
        "subscription connect",
        policy.request_timeout,
        PubsubClient::new(&conn.ws_url),
    )
    .await?
    .map_err(|e| conn.unreachable(&conn.ws_url, e))?;

    let (mut notifications, unsubscribe) = with_timeout(
        "signature_subscribe",
        policy.request_timeout,
        pubsub.signature_subscribe(
            &signature,
            Some(RpcSignatureSubscribeConfig {
                commitment: Some(policy.commitment_config()),
                enable_received_notification: Some(false),
            }),
        ),
    )
    .await?
    .map_err(|e| conn.unreachable(&conn.ws_url, e))?;

    let config = RpcSendTransactionConfig {
        skip_preflight: policy.skip_preflight,
        preflight_commitment: Some(policy.commitment_config().commitment),
        ..Default::default()
    };
    let sent = with_timeout(
        "send_transaction",
        policy.request_timeout,
        conn.rpc
            .send_transaction_with_config(transaction.transaction(), config),
    )
    .await;

    let outcome = match sent {
        Ok(Ok(_)) => {
            with_timeout("confirmation", policy.confirmation_timeout, async {
                tokio::select! {
                    confirmed = wait_for_signature(&mut notifications, signature) => confirmed,
                    () = wait_for_expiry(conn, transaction.anchor(), policy) => {
                        Err(SubmissionError::BlockhashExpired.into())
                    }
                }
            })
            .await
        }
        Ok(Err(error)) => Ok(Err(submission_error(error, transaction, &conn.rpc_url))),
        Err(timeout) => Err(timeout),
    };

    unsubscribe().await;

    let slot = outcome??;
    Ok(SubmissionResult {
        signature,
        slot,
        commitment: policy.commitment,
    })
}

/// Waits for the processed-signature notification and returns its slot.
pub async fn wait_for_signature<S>(notifications: &mut S, signature: Signature) -> EnrollResult<u64>
where
    S: Stream<Item = Response<RpcSignatureResult>> + Unpin,
{
    while let Some(notification) = notifications.next().await {
        match notification.value {
            RpcSignatureResult::ProcessedSignature(ProcessedSignatureResult { err: None }) => {
                return Ok(notification.context.slot);
            }
            RpcSignatureResult::ProcessedSignature(ProcessedSignatureResult { err: Some(err) }) => {
                return Err(SubmissionError::Rejected {
                    signature,
                    reason: format!("{err:?}"),
                }
                .into());
            }
            RpcSignatureResult::ReceivedSignature(_) => continue,
        }
    }

    Err(ConnectionError::SubscriptionClosed.into())
}

/// Resolves once the cluster's block height passes the anchor's last valid height. A failed
/// poll is skipped; the confirmation timeout bounds the whole wait.
async fn wait_for_expiry(conn: &Connection, anchor: RecencyAnchor, policy: &ConfirmationPolicy) {
    let mut interval = tokio::time::interval(BLOCK_HEIGHT_POLL_INTERVAL);
    loop {
        interval.tick().await;
        match conn
            .rpc
            .get_block_height_with_commitment(policy.commitment_config())
            .await
        {
            Ok(height) if block_height_expired(height, anchor) => return,
            Ok(_) => {}
            Err(e) => log_warning("Block height poll failed", e),
        }
    }
}

/// Whether a transaction anchored at `anchor` can no longer land at `height`.
pub fn block_height_expired(height: u64, anchor: RecencyAnchor) -> bool {
    height > anchor.last_valid_block_height
}

/// Classifies an RPC failure from sending a transaction.
pub fn submission_error(
    error: ClientError,
    transaction: &SignedTransaction,
    rpc_url: &str,
) -> EnrollError {
    let transaction_error = error.get_transaction_error();

    if let Some(TransactionError::BlockhashNotFound) = transaction_error {
        return SubmissionError::BlockhashExpired.into();
    }

    if let Some(TransactionError::InstructionError(index, ixn_error)) = &transaction_error {
        let name = failing_instruction(transaction, *index)
            .map_or_else(|| format!("instruction #{index}"), |ixn| ixn.to_string());
        log_error("Enrollment error", format!("({name}, {ixn_error:?})"));
    }

    match error.kind() {
        ClientErrorKind::RpcError(RpcResponseError {
            message,
            data:
                RpcResponseErrorData::SendTransactionPreflightFailure(RpcSimulateTransactionResult {
                    logs,
                    ..
                }),
            ..
        }) => SubmissionError::Preflight {
            message: message.clone(),
            logs: logs.clone().unwrap_or_default(),
        }
        .into(),
        ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_) => ConnectionError::Unreachable {
            url: rpc_url.to_string(),
            reason: error.to_string(),
        }
        .into(),
        _ => match transaction_error {
            Some(err) => SubmissionError::Rejected {
                signature: transaction.signature(),
                reason: err.to_string(),
            }
            .into(),
            None => SubmissionError::Rpc(error.to_string()).into(),
        },
    }
}

/// The enrollment instruction at `index`, if it is one.
fn failing_instruction(transaction: &SignedTransaction, index: u8) -> Option<EnrollmentInstruction> {
    let message = &transaction.transaction().message;
    let compiled = message.instructions.get(index as usize)?;
    EnrollmentInstruction::from_data(&compiled.data)
}
