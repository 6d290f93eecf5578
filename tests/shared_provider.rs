use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use zaif_nonce::nonce::{ClockNonce, CounterNonce, ManualClock, NonceProvider, SharedNonce};
use zaif_nonce::{Nonce, NonceConfig, NonceError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Form body of a private request, as the request signer builds it.
#[derive(Serialize)]
struct PrivateRequest<'a> {
    nonce: Nonce,
    method: &'a str,
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_provider_unique_across_tasks() {
    init_tracing();
    let provider: Arc<dyn NonceProvider> = Arc::new(SharedNonce::new(ClockNonce::new()));

    let mut handles = vec![];
    for _ in 0..8 {
        let p = provider.clone();
        handles.push(tokio::spawn(async move {
            let mut nonces = Vec::new();
            for _ in 0..250 {
                nonces.push(p.next_nonce().unwrap());
                tokio::task::yield_now().await;
            }
            nonces
        }));
    }

    let mut all_nonces = HashSet::new();
    for handle in handles {
        for nonce in handle.await.unwrap() {
            assert!(
                all_nonces.insert(nonce),
                "Nonce must be unique across tasks"
            );
        }
    }
    assert_eq!(all_nonces.len(), 2000);
}

#[tokio::test]
async fn test_resync_after_invalid_nonce() {
    init_tracing();
    let clock = ManualClock::new(1_700_000_000);
    let provider: Arc<dyn NonceProvider> =
        Arc::new(SharedNonce::new(ClockNonce::with_clock(clock.clone())));

    assert_eq!(provider.next_nonce().unwrap().value(), 1_700_000_000);

    // The server reports it has already seen a nonce well ahead of ours.
    provider.advance_past(1_700_000_500).unwrap();
    assert_eq!(provider.next_nonce().unwrap().value(), 1_700_000_501);

    // Once real time passes the resynced value, wall time takes over again.
    clock.advance(600);
    assert_eq!(provider.next_nonce().unwrap().value(), 1_700_000_600);
}

#[test]
fn test_nonce_embeds_in_form_body() {
    let provider = SharedNonce::new(CounterNonce::new(100));
    let request = PrivateRequest {
        nonce: provider.next_nonce().unwrap(),
        method: "get_info",
    };

    let body = serde_urlencoded::to_string(&request).unwrap();
    assert_eq!(body, "nonce=100&method=get_info");

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["nonce"], "100");
}

#[test]
fn test_config_provider_exhaustion_is_fatal() {
    init_tracing();
    let provider = NonceConfig::Counter {
        initial_value: i64::MAX - 1,
    }
    .into_provider();

    assert_eq!(provider.next_nonce().unwrap().value(), i64::MAX - 1);
    let err = provider.next_nonce().unwrap_err();
    assert!(err.is_exhausted());
    assert_eq!(provider.next_nonce(), Err(NonceError::Exhausted));
    assert_eq!(provider.advance_by(1), Err(NonceError::Exhausted));
}

#[test]
fn test_config_provider_overflow_leaves_sequence_usable() {
    let provider = NonceConfig::Counter { initial_value: 10 }.into_provider();
    assert_eq!(
        provider.advance_by(u64::MAX),
        Err(NonceError::Overflow {
            current: 10,
            by: u64::MAX
        })
    );
    assert_eq!(provider.next_nonce().unwrap().to_string(), "10");
}
