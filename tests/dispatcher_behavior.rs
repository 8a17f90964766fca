//! Behavior-driven tests for the async fetch lifecycle.
//!
//! Gateway calls are held open by the test so that completion order can be
//! chosen independently of issue order.

use std::sync::{Arc, Mutex};

use mlfund_core::store::{selectors, FetchStatus};
use mlfund_core::{FetchError, FetchErrorKind};
use mlfund_tests::{company, gated_dispatcher, record, symbol};
use serde_json::json;

// =============================================================================
// Lifecycle ordering
// =============================================================================

#[tokio::test]
async fn pending_is_visible_before_the_gateway_settles() {
    // Given: a dispatcher whose gateway waits for the test
    let (dispatcher, mut started) = gated_dispatcher();

    // When: a list fetch starts
    let task = tokio::spawn({
        let dispatcher = dispatcher.clone();
        async move { dispatcher.fetch_companies().await }
    });
    let reply = started
        .recv()
        .await
        .expect("gateway call should start")
        .expect_companies();

    // Then: views already see loading while the call is in flight
    assert!(selectors::is_loading_companies(&dispatcher.store().get_state()));

    reply
        .send(Ok(vec![company("AAPL", "Apple")]))
        .expect("fetch should still be waiting");
    let state = task.await.expect("fetch task should not panic");
    assert_eq!(state.companies.list_status.status, FetchStatus::Succeeded);
    assert_eq!(selectors::companies(&state), &[company("AAPL", "Apple")]);
}

#[tokio::test]
async fn every_fetch_emits_exactly_two_notifications() {
    let (dispatcher, mut started) = gated_dispatcher();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let _subscription = {
        let seen = Arc::clone(&seen);
        dispatcher.store().subscribe(move |state| {
            seen.lock()
                .expect("log should not be poisoned")
                .push(selectors::financials_status(state, &symbol("MSFT")).status);
        })
    };

    let task = tokio::spawn({
        let dispatcher = dispatcher.clone();
        async move { dispatcher.fetch_financials(symbol("MSFT")).await }
    });
    let (_, reply) = started
        .recv()
        .await
        .expect("gateway call should start")
        .expect_financials();
    reply
        .send(Err(FetchError::response(404)))
        .expect("fetch should still be waiting");
    task.await.expect("fetch task should not panic");

    assert_eq!(
        *seen.lock().expect("log should not be poisoned"),
        vec![FetchStatus::Loading, FetchStatus::Failed]
    );
}

// =============================================================================
// Out-of-order completion
// =============================================================================

#[tokio::test]
async fn last_settled_payload_owns_the_cache_slot() {
    // Given: two overlapping fetches for the same symbol
    let (dispatcher, mut started) = gated_dispatcher();
    let first = tokio::spawn({
        let dispatcher = dispatcher.clone();
        async move { dispatcher.fetch_financials(symbol("AAPL")).await }
    });
    let (_, first_reply) = started
        .recv()
        .await
        .expect("first call should start")
        .expect_financials();
    assert_eq!(
        selectors::financials_status(&dispatcher.store().get_state(), &symbol("AAPL")).status,
        FetchStatus::Loading
    );

    let second = tokio::spawn({
        let dispatcher = dispatcher.clone();
        async move { dispatcher.fetch_financials(symbol("AAPL")).await }
    });
    let (_, second_reply) = started
        .recv()
        .await
        .expect("second call should start")
        .expect_financials();

    // When: the later request settles first and the earlier one last
    let p1 = record(json!({ "income_statement": { "revenue_series": [{ "year": 2022, "value": 1.0 }] } }));
    let p2 = record(json!({ "income_statement": { "revenue_series": [{ "year": 2023, "value": 2.0 }] } }));
    second_reply
        .send(Ok(p2.clone()))
        .expect("second fetch should still be waiting");
    let after_second = second.await.expect("second task should not panic");
    assert_eq!(
        selectors::financials(&after_second, &symbol("AAPL")).as_deref(),
        Some(&p2)
    );

    first_reply
        .send(Ok(p1.clone()))
        .expect("first fetch should still be waiting");
    first.await.expect("first task should not panic");

    // Then: the stale payload wins because it was applied last
    let state = dispatcher.store().get_state();
    assert_eq!(selectors::financials(&state, &symbol("AAPL")).as_deref(), Some(&p1));
    assert_eq!(
        selectors::financials_status(&state, &symbol("AAPL")).status,
        FetchStatus::Succeeded
    );
}

#[tokio::test]
async fn fetches_for_different_symbols_do_not_interfere() {
    // Given: AAPL and MSFT in flight together
    let (dispatcher, mut started) = gated_dispatcher();
    let aapl = tokio::spawn({
        let dispatcher = dispatcher.clone();
        async move { dispatcher.fetch_financials(symbol("AAPL")).await }
    });
    let (first_symbol, first_reply) = started
        .recv()
        .await
        .expect("AAPL call should start")
        .expect_financials();
    let msft = tokio::spawn({
        let dispatcher = dispatcher.clone();
        async move { dispatcher.fetch_financials(symbol("MSFT")).await }
    });
    let (second_symbol, second_reply) = started
        .recv()
        .await
        .expect("MSFT call should start")
        .expect_financials();
    assert_eq!(first_symbol, symbol("AAPL"));
    assert_eq!(second_symbol, symbol("MSFT"));

    // When: MSFT fails and AAPL succeeds
    second_reply
        .send(Err(FetchError::transport("network error")))
        .expect("MSFT fetch should still be waiting");
    msft.await.expect("MSFT task should not panic");
    let aapl_record = record(json!({ "cash_flow": { "operating": [] } }));
    first_reply
        .send(Ok(aapl_record.clone()))
        .expect("AAPL fetch should still be waiting");
    aapl.await.expect("AAPL task should not panic");

    // Then: each symbol carries its own outcome
    let state = dispatcher.store().get_state();
    assert_eq!(
        selectors::financials(&state, &symbol("AAPL")).as_deref(),
        Some(&aapl_record)
    );
    assert!(selectors::financials(&state, &symbol("MSFT")).is_none());
    let msft_status = selectors::financials_status(&state, &symbol("MSFT"));
    assert_eq!(msft_status.status, FetchStatus::Failed);
    assert_eq!(
        msft_status.error.as_ref().map(FetchError::kind),
        Some(FetchErrorKind::Transport)
    );
    assert_eq!(
        selectors::financials_status(&state, &symbol("AAPL")).status,
        FetchStatus::Succeeded
    );
}

#[tokio::test]
async fn failed_refetch_keeps_the_cached_record() {
    let (dispatcher, mut started) = gated_dispatcher();
    let cached = record(json!({ "balance_sheet": { "total_assets": [] } }));

    let first = tokio::spawn({
        let dispatcher = dispatcher.clone();
        async move { dispatcher.fetch_financials(symbol("TCS.NS")).await }
    });
    let (_, reply) = started
        .recv()
        .await
        .expect("call should start")
        .expect_financials();
    reply
        .send(Ok(cached.clone()))
        .expect("fetch should still be waiting");
    first.await.expect("task should not panic");

    let retry = tokio::spawn({
        let dispatcher = dispatcher.clone();
        async move { dispatcher.fetch_financials(symbol("TCS.NS")).await }
    });
    let (_, reply) = started
        .recv()
        .await
        .expect("retry should start")
        .expect_financials();
    reply
        .send(Err(FetchError::response(500)))
        .expect("retry should still be waiting");
    let state = retry.await.expect("retry task should not panic");

    assert_eq!(
        selectors::financials(&state, &symbol("TCS.NS")).as_deref(),
        Some(&cached)
    );
    assert_eq!(
        selectors::financials_status(&state, &symbol("TCS.NS"))
            .error_message(),
        Some("request failed with status code 500")
    );
}

#[tokio::test]
async fn list_failure_after_success_keeps_rows_and_exposes_error() {
    let (dispatcher, mut started) = gated_dispatcher();

    for outcome in [
        Ok(vec![company("AAPL", "Apple")]),
        Err(FetchError::transport("network error")),
    ] {
        let task = tokio::spawn({
            let dispatcher = dispatcher.clone();
            async move { dispatcher.fetch_companies().await }
        });
        started
            .recv()
            .await
            .expect("call should start")
            .expect_companies()
            .send(outcome)
            .expect("fetch should still be waiting");
        task.await.expect("task should not panic");
    }

    let state = dispatcher.store().get_state();
    assert_eq!(state.companies.list_status.status, FetchStatus::Failed);
    assert_eq!(
        state.companies.list_status.error_message(),
        Some("network error")
    );
    assert_eq!(selectors::companies(&state), &[company("AAPL", "Apple")]);
}
