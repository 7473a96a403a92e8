//! Circuit breaker for Tendril's upstream calls.
//!
//! Wraps any asynchronous fallible operation, counting consecutive failures
//! and enforcing a fail-fast window after the failure threshold is reached.
//! One instance is constructed at the composition root and shared across
//! concurrent requests; its counters sit behind a mutex, so updates are
//! race-safe under concurrent increments.

use std::future::Future;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::warn;

use tendril_core::{TendrilError, TendrilResult};

/// Breaker state, exactly one value at all times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// All calls pass through
    Closed,
    /// Calls fail immediately without contacting the downstream
    Open,
    /// Probing: calls pass through until the success threshold is met
    HalfOpen,
}

/// Breaker thresholds and cooldown
#[derive(Debug, Clone)]
pub struct BreakerConfig {
    /// Consecutive failures before the circuit opens
    pub failure_threshold: u32,
    /// How long the circuit stays open before a probe call is allowed
    pub timeout: Duration,
    /// Consecutive successes in HalfOpen before the circuit closes
    pub success_threshold: u32,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            timeout: Duration::from_millis(60_000),
            success_threshold: 2,
        }
    }
}

#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    failures: u32,
    successes: u32,
    last_failure: Option<Instant>,
}

/// Failure-isolation state machine shared across sequential calls
#[derive(Debug)]
pub struct CircuitBreaker {
    config: BreakerConfig,
    inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
    /// Create a breaker with the given thresholds
    pub fn new(config: BreakerConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                failures: 0,
                successes: 0,
                last_failure: None,
            }),
        }
    }

    /// Run an operation through the breaker.
    ///
    /// When the circuit is open and the cooldown has not elapsed, the
    /// operation closure is never invoked and the call fails with
    /// `ServiceUnavailable`.
    pub async fn call<F, Fut, T>(&self, operation: F) -> TendrilResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = TendrilResult<T>>,
    {
        self.before_call()?;
        match operation().await {
            Ok(value) => {
                self.on_success();
                Ok(value)
            }
            Err(error) => {
                self.on_failure();
                Err(error)
            }
        }
    }

    /// Current state (for tests and diagnostics)
    pub fn state(&self) -> CircuitState {
        self.inner.lock().state
    }

    /// Force the breaker back to Closed with all counters zeroed
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.state = CircuitState::Closed;
        inner.failures = 0;
        inner.successes = 0;
        inner.last_failure = None;
    }

    /// Gate a call attempt, transitioning Open -> HalfOpen once the cooldown
    /// has elapsed
    fn before_call(&self) -> TendrilResult<()> {
        let mut inner = self.inner.lock();
        match inner.state {
            CircuitState::Closed | CircuitState::HalfOpen => Ok(()),
            CircuitState::Open => {
                let cooled_down = inner
                    .last_failure
                    .is_some_and(|at| at.elapsed() >= self.config.timeout);
                if cooled_down {
                    inner.state = CircuitState::HalfOpen;
                    inner.successes = 0;
                    Ok(())
                } else {
                    Err(TendrilError::ServiceUnavailable)
                }
            }
        }
    }

    fn on_success(&self) {
        let mut inner = self.inner.lock();
        match inner.state {
            CircuitState::Closed => inner.failures = 0,
            CircuitState::HalfOpen => {
                inner.successes += 1;
                if inner.successes >= self.config.success_threshold {
                    inner.state = CircuitState::Closed;
                    inner.failures = 0;
                    inner.successes = 0;
                }
            }
            // A success cannot be observed while Open: calls never run
            CircuitState::Open => {}
        }
    }

    fn on_failure(&self) {
        let mut inner = self.inner.lock();
        inner.last_failure = Some(Instant::now());
        match inner.state {
            CircuitState::Closed => {
                inner.failures += 1;
                if inner.failures >= self.config.failure_threshold {
                    inner.state = CircuitState::Open;
                    warn!(
                        failures = inner.failures,
                        "circuit breaker opened after consecutive upstream failures"
                    );
                }
            }
            CircuitState::HalfOpen => {
                inner.state = CircuitState::Open;
                inner.successes = 0;
                warn!("circuit breaker re-opened: probe call failed");
            }
            CircuitState::Open => {}
        }
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(BreakerConfig::default())
    }
}

#[cfg(test)]
mod tests;
