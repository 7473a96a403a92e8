//! Unit tests for the circuit breaker state machine

use super::*;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

fn fast_config() -> BreakerConfig {
    BreakerConfig {
        failure_threshold: 3,
        timeout: Duration::from_millis(50),
        success_threshold: 2,
    }
}

async fn fail(breaker: &CircuitBreaker, calls: &Arc<AtomicU32>) -> TendrilResult<()> {
    let calls = Arc::clone(calls);
    breaker
        .call(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(TendrilError::Remote {
                    status: 500,
                    message: "boom".to_string(),
                })
            }
        })
        .await
}

async fn succeed(breaker: &CircuitBreaker, calls: &Arc<AtomicU32>) -> TendrilResult<()> {
    let calls = Arc::clone(calls);
    breaker
        .call(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        })
        .await
}

#[tokio::test]
async fn starts_closed_and_passes_calls_through() {
    let breaker = CircuitBreaker::default();
    let calls = Arc::new(AtomicU32::new(0));
    assert_eq!(breaker.state(), CircuitState::Closed);
    succeed(&breaker, &calls).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(breaker.state(), CircuitState::Closed);
}

#[tokio::test]
async fn opens_after_consecutive_failures() {
    let breaker = CircuitBreaker::new(fast_config());
    let calls = Arc::new(AtomicU32::new(0));
    for _ in 0..3 {
        fail(&breaker, &calls).await.unwrap_err();
    }
    assert_eq!(breaker.state(), CircuitState::Open);
}

#[tokio::test]
async fn success_resets_the_failure_counter() {
    let breaker = CircuitBreaker::new(fast_config());
    let calls = Arc::new(AtomicU32::new(0));
    fail(&breaker, &calls).await.unwrap_err();
    fail(&breaker, &calls).await.unwrap_err();
    succeed(&breaker, &calls).await.unwrap();
    fail(&breaker, &calls).await.unwrap_err();
    fail(&breaker, &calls).await.unwrap_err();
    assert_eq!(breaker.state(), CircuitState::Closed);
}

#[tokio::test]
async fn open_circuit_short_circuits_without_invoking_operation() {
    let breaker = CircuitBreaker::new(fast_config());
    let calls = Arc::new(AtomicU32::new(0));
    for _ in 0..3 {
        fail(&breaker, &calls).await.unwrap_err();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    let result = succeed(&breaker, &calls).await;
    assert!(matches!(result, Err(TendrilError::ServiceUnavailable)));
    // The wrapped operation was never invoked
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn closes_again_after_cooldown_and_probe_successes() {
    let breaker = CircuitBreaker::new(fast_config());
    let calls = Arc::new(AtomicU32::new(0));
    for _ in 0..3 {
        fail(&breaker, &calls).await.unwrap_err();
    }

    tokio::time::sleep(Duration::from_millis(60)).await;

    succeed(&breaker, &calls).await.unwrap();
    assert_eq!(breaker.state(), CircuitState::HalfOpen);
    succeed(&breaker, &calls).await.unwrap();
    assert_eq!(breaker.state(), CircuitState::Closed);
}

#[tokio::test]
async fn half_open_failure_reopens_immediately() {
    let breaker = CircuitBreaker::new(fast_config());
    let calls = Arc::new(AtomicU32::new(0));
    for _ in 0..3 {
        fail(&breaker, &calls).await.unwrap_err();
    }

    tokio::time::sleep(Duration::from_millis(60)).await;

    succeed(&breaker, &calls).await.unwrap();
    assert_eq!(breaker.state(), CircuitState::HalfOpen);
    fail(&breaker, &calls).await.unwrap_err();
    assert_eq!(breaker.state(), CircuitState::Open);

    // And it short-circuits again until the next cooldown
    let before = calls.load(Ordering::SeqCst);
    let result = succeed(&breaker, &calls).await;
    assert!(matches!(result, Err(TendrilError::ServiceUnavailable)));
    assert_eq!(calls.load(Ordering::SeqCst), before);
}

#[tokio::test]
async fn reset_forces_closed() {
    let breaker = CircuitBreaker::new(fast_config());
    let calls = Arc::new(AtomicU32::new(0));
    for _ in 0..3 {
        fail(&breaker, &calls).await.unwrap_err();
    }
    assert_eq!(breaker.state(), CircuitState::Open);

    breaker.reset();
    assert_eq!(breaker.state(), CircuitState::Closed);
    succeed(&breaker, &calls).await.unwrap();
}

#[tokio::test]
async fn original_error_propagates_through_the_breaker() {
    let breaker = CircuitBreaker::default();
    let result: TendrilResult<()> = breaker
        .call(|| async { Err(TendrilError::not_found("button")) })
        .await;
    assert!(matches!(result, Err(TendrilError::NotFound { .. })));
}
