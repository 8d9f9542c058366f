//! Bounded worker pool for domain lookups.
//!
//! All work items go into a channel sized to the batch before any worker
//! starts, and the sending side is dropped so the queue is closed. Workers
//! share the receiving end and pull items until it runs dry. Each worker holds
//! a clone of the result sender; the sink closes when the last worker exits,
//! which is how the caller knows every item has produced its result.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

/// Runs one task per work item on a fixed number of workers.
#[derive(Debug, Clone)]
pub struct ConcurrentProcessor {
    workers: usize,
}

impl ConcurrentProcessor {
    /// Create a processor with `workers` workers (at least one).
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `task` once for every item and collect the outputs.
    ///
    /// Returns after every worker has drained the queue and exited. The
    /// output holds one entry per item in completion order, not input order.
    /// `task` must not panic: a panicking task takes its item's output with
    /// it, which is logged as an error.
    pub async fn run<T, R, F, Fut>(&self, items: Vec<T>, task: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let total = items.len();
        if total == 0 {
            return Vec::new();
        }

        // Work queue: fully populated, then closed
        let (job_tx, job_rx) = mpsc::channel::<T>(total);
        for item in items {
            if job_tx.send(item).await.is_err() {
                break;
            }
        }
        drop(job_tx);

        let job_rx = Arc::new(Mutex::new(job_rx));
        let (result_tx, mut result_rx) = mpsc::channel::<R>(total);
        let task = Arc::new(task);

        let pool_size = self.workers.min(total);
        tracing::debug!(items = total, workers = pool_size, "starting worker pool");

        let mut pool = JoinSet::new();
        for worker_id in 0..pool_size {
            let job_rx = Arc::clone(&job_rx);
            let result_tx = result_tx.clone();
            let task = Arc::clone(&task);

            pool.spawn(async move {
                let mut handled = 0usize;
                loop {
                    let next = job_rx.lock().await.recv().await;
                    let Some(item) = next else { break };

                    let output = task(item).await;
                    handled += 1;
                    if result_tx.send(output).await.is_err() {
                        break;
                    }
                }
                tracing::trace!(worker_id, handled, "worker finished");
            });
        }
        drop(result_tx);

        let mut results = Vec::with_capacity(total);
        while let Some(output) = result_rx.recv().await {
            results.push(output);
        }

        while let Some(joined) = pool.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "lookup worker terminated abnormally");
            }
        }

        if results.len() != total {
            tracing::error!(
                expected = total,
                received = results.len(),
                "worker pool lost results"
            );
        }

        results
    }
}
