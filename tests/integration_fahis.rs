use muhasib::engine::fahis::run_checks;
use muhasib::error::EngineError;
use muhasib::model::SignatureInfo;
use pretty_assertions::assert_eq;

mod common;

use common::MockChain;
use common::wallet;
use common::wallet_address;

fn healthy_chain() -> MockChain {
    let mut chain = MockChain::new();
    chain.expect_get_version().returning(|| Ok("2.1.16".to_string()));
    chain.expect_get_slot().returning(|| Ok(301_000_000));
    chain
}

fn failed_step(err: &muhasib::error::Error) -> Option<&'static str> {
    match err.downcast_ref::<EngineError>() {
        Some(EngineError::CheckFailed { step, .. }) => Some(*step),
        _ => None,
    }
}

#[tokio::test]
async fn healthy_setup_passes_every_check() {
    let mut chain = healthy_chain();
    chain
        .expect_get_balance()
        .withf(|address| *address == wallet())
        .times(1)
        .returning(|_| Ok(2_500_000_000));
    chain.expect_list_signatures().withf(|_, limit| *limit == 5).times(1).returning(|_, _| {
        Ok(vec![
            SignatureInfo::new("5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnb", 2, Some(1_700_000_000)),
            SignatureInfo::new("older", 1, Some(1_600_000_000)),
        ])
    });

    let report = run_checks(&chain, Some(&wallet_address())).await.unwrap();

    assert_eq!(report.node_version, "2.1.16");
    assert_eq!(report.slot, 301_000_000);
    assert_eq!(report.balance_sol, 2.5);
    assert_eq!(report.recent_signatures, 2);
    assert_eq!(report.newest_signature.as_deref(), Some("5VERv8NMvzbJMEkV8xnr..."));
    assert_eq!(report.newest_time.as_deref(), Some("2023-11-14T22:13:20.000Z"));
}

#[tokio::test]
async fn unreachable_rpc_fails_first_step() {
    let mut chain = MockChain::new();
    chain
        .expect_get_version()
        .returning(|| Err(muhasib::error::anyhow!("error sending request: connection refused")));
    chain.expect_get_slot().never();

    let err = run_checks(&chain, Some(&wallet_address())).await.unwrap_err();

    assert_eq!(failed_step(&err), Some("rpc_version"));
}

#[tokio::test]
async fn invalid_wallet_stops_before_balance() {
    let mut chain = healthy_chain();
    chain.expect_get_balance().never();

    let err = run_checks(&chain, Some("not-a-wallet")).await.unwrap_err();

    assert_eq!(failed_step(&err), Some("wallet"));
}

#[tokio::test]
async fn missing_wallet_is_reported() {
    let chain = healthy_chain();

    let err = run_checks(&chain, None).await.unwrap_err();

    assert_eq!(failed_step(&err), Some("wallet"));
}

#[tokio::test]
async fn rate_limited_history_fails_last_step() {
    let mut chain = healthy_chain();
    chain.expect_get_balance().returning(|_| Ok(0));
    chain
        .expect_list_signatures()
        .returning(|_, _| Err(muhasib::error::anyhow!("HTTP status client error (429 Too Many Requests)")));

    let err = run_checks(&chain, Some(&wallet_address())).await.unwrap_err();

    assert_eq!(failed_step(&err), Some("recent_signatures"));
    assert!(format!("{:#}", err).contains("429"));
}
