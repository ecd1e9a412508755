//! Concurrent per-plugin execution with a join barrier.

use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use pluginsync_core::error::AppError;
use pluginsync_core::result::AppResult;

/// Outcome of running one operation against every target.
#[derive(Debug, Default)]
pub struct FanOutReport {
    /// Number of workers started.
    pub attempted: usize,
    /// Failed targets with their errors, in submission order.
    pub failures: Vec<(String, AppError)>,
}

impl FanOutReport {
    /// Number of workers that completed without error.
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failures.len()
    }

    /// Whether every worker succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Collapse into the first failure in submission order, if any.
    pub fn into_result(self) -> AppResult<usize> {
        let attempted = self.attempted;
        match self.failures.into_iter().next() {
            Some((_, err)) => Err(err),
            None => Ok(attempted),
        }
    }
}

/// Run `op` once per target, concurrently, and wait for all of them.
///
/// Each target gets its own spawned task. When `max_concurrency` is
/// non-zero, at most that many run at once. No worker is cancelled when a
/// sibling fails.
pub async fn fan_out<F, Fut>(targets: &[String], max_concurrency: usize, op: F) -> FanOutReport
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = AppResult<()>> + Send + 'static,
{
    let permits = (max_concurrency > 0).then(|| Arc::new(Semaphore::new(max_concurrency)));

    let handles: Vec<_> = targets
        .iter()
        .map(|target| {
            let work = op(target.clone());
            let permits = permits.clone();
            tokio::spawn(async move {
                let _permit = match permits {
                    Some(sem) => Some(sem.acquire_owned().await.map_err(|e| {
                        AppError::internal(format!("fan-out semaphore closed: {e}"))
                    })?),
                    None => None,
                };
                work.await
            })
        })
        .collect();

    let mut report = FanOutReport {
        attempted: targets.len(),
        failures: Vec::new(),
    };

    for (target, joined) in targets.iter().zip(join_all(handles).await) {
        let outcome = joined.unwrap_or_else(|e| {
            Err(AppError::internal(format!("worker for {target} aborted: {e}")))
        });
        if let Err(err) = outcome {
            report.failures.push((target.clone(), err));
        }
    }

    report
}
