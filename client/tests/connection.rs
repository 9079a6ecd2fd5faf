use enrollment_client::{
    config::ConfirmationPolicy,
    connection::{
        Cluster,
        Connection,
        Ledger,
    },
    error::{
        ConnectionError,
        EnrollError,
    },
};

const CLOSED_RPC: &str = "http://127.0.0.1:1";
const CLOSED_WS: &str = "ws://127.0.0.1:1";

#[tokio::test]
async fn unreachable_endpoint_surfaces_on_first_use() -> anyhow::Result<()> {
    // Nothing is listening, but construction never touches the network.
    let conn = Connection::new(
        Cluster::Localnet,
        Some(CLOSED_RPC),
        Some(CLOSED_WS),
        ConfirmationPolicy::default(),
    )?;
    assert_eq!(conn.rpc_url(), CLOSED_RPC);
    assert_eq!(conn.ws_url(), CLOSED_WS);

    let err = conn.latest_anchor().await.unwrap_err();
    match &err {
        EnrollError::Connection(ConnectionError::Unreachable { url, .. }) => {
            assert_eq!(url, CLOSED_RPC);
        }
        other => panic!("expected Unreachable, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 3);

    let err = conn
        .account_exists(&solana_sdk::pubkey::Pubkey::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EnrollError::Connection(ConnectionError::Unreachable { .. })
    ));
    Ok(())
}

#[test]
fn malformed_endpoint_fails_construction() {
    let result = Connection::new(
        Cluster::Localnet,
        Some("localhost:8899"),
        None,
        ConfirmationPolicy::default(),
    );
    assert!(matches!(
        result,
        Err(ConnectionError::InvalidEndpoint { kind: "rpc", .. })
    ));
}
