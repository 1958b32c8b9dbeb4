//! Concurrent timed connection attempts.
//!
//! `count` worker tasks each time exactly one invocation of the dialer
//! and report through a channel of capacity `count`. A coordinator task
//! waits for every worker and then closes the channel. The consumer stops
//! at the first error; workers still in flight finish in the background
//! and their outcomes are discarded.

use crate::dialer::SharedDialer;
use crate::error::{PingError, Result};
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Time a single fallible operation.
///
/// The clock starts right before `op` is invoked and stops as soon as the
/// future it returns completes. Returns the elapsed wall-clock time in
/// seconds, or the operation's error.
pub async fn time_it<F, Fut, T, E>(op: F) -> std::result::Result<f64, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    let start = Instant::now();
    let outcome = op().await;
    let elapsed = start.elapsed();
    outcome.map(|_| elapsed.as_secs_f64())
}

/// Run `count` timed attempts concurrently and collect their durations.
///
/// Durations are returned in arrival order. A `count` of zero runs a
/// single attempt.
pub async fn sample(dialer: SharedDialer, count: usize) -> Result<Vec<f64>> {
    let count = count.max(1);
    let (tx, mut rx) = mpsc::channel::<Result<f64>>(count);

    let workers: Vec<JoinHandle<()>> = (0..count)
        .map(|attempt| {
            let dialer = Arc::clone(&dialer);
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = time_it(|| dialer.connect_and_close()).await;
                match &outcome {
                    Ok(secs) => trace!(attempt, secs = *secs, "attempt finished"),
                    Err(e) => trace!(attempt, error = %e, "attempt failed"),
                }
                // The receiver is gone once the run has already failed.
                let _ = tx.send(outcome).await;
            })
        })
        .collect();

    // The coordinator holds the last sender, so the channel closes only
    // after every worker has finished.
    tokio::spawn(async move {
        for joined in join_all(workers).await {
            if let Err(e) = joined {
                let _ = tx.send(Err(PingError::Worker(e.to_string()))).await;
            }
        }
    });

    let mut durations = Vec::with_capacity(count);
    while let Some(outcome) = rx.recv().await {
        durations.push(outcome?);
    }

    if durations.len() != count {
        return Err(PingError::Worker(format!(
            "expected {} samples, received {}",
            count,
            durations.len()
        )));
    }
    Ok(durations)
}
