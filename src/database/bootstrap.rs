//! Startup gate: the service does not accept traffic until the database
//! answers and the schema exists.

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::database::store::UserStore;
use crate::error::{Error, Result};

pub const MAX_ATTEMPTS: u32 = 30;
pub const BACKOFF: Duration = Duration::from_secs(2);
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// Fixed-count retry with a constant delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
    pub attempt_timeout: Duration,
}

impl RetryPolicy {
    pub const fn startup() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            backoff: BACKOFF,
            attempt_timeout: ATTEMPT_TIMEOUT,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::startup()
    }
}

async fn retry<T, F, Fut>(policy: RetryPolicy, operation: &'static str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        let outcome = match tokio::time::timeout(policy.attempt_timeout, op()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(Error::TimedOut {
                operation,
                after: policy.attempt_timeout,
            }),
        };

        match outcome {
            Ok(value) => {
                info!(operation, attempt, "{} succeeded", operation);
                return Ok(value);
            }
            Err(err) if attempt >= max_attempts => {
                tracing::error!(operation, attempt, error = %err, "{} failed, giving up", operation);
                return Err(Error::StartupFailed {
                    operation,
                    attempts: attempt,
                    source: Box::new(err),
                });
            }
            Err(err) => {
                warn!(
                    operation,
                    attempt,
                    max_attempts,
                    error = %err,
                    "{} failed, retrying in {:?}",
                    operation,
                    policy.backoff
                );
                tokio::time::sleep(policy.backoff).await;
                attempt += 1;
            }
        }
    }
}

pub async fn wait_for_store(store: &dyn UserStore, policy: RetryPolicy) -> Result<()> {
    retry(policy, "database connectivity check", || store.ping()).await
}

pub async fn ensure_schema(store: &dyn UserStore, policy: RetryPolicy) -> Result<()> {
    retry(policy, "schema setup", || store.ensure_schema()).await
}

pub async fn prepare_store(store: &dyn UserStore, policy: RetryPolicy) -> Result<()> {
    wait_for_store(store, policy).await?;
    ensure_schema(store, policy).await
}
