//! Sequential and concurrent batch runners.
//!
//! Both apply the same unit of work (simulated delay, then sort) to every array
//! of a batch and return the results positionally aligned with the input. They
//! differ only in scheduling: one array at a time, or one task per array.

use std::future::Future;

use tokio::task::JoinSet;
use tracing::debug;

use crate::delay::SimulatedCost;
use crate::error::BatchError;
use crate::sorter;

/// Ordered collection of integer arrays.
pub type Batch = Vec<Vec<i64>>;

/// Which runner an endpoint uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Sequential,
    Concurrent,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Concurrent => "concurrent",
        }
    }

    pub async fn run(self, batch: Batch, cost: SimulatedCost) -> Result<Batch, BatchError> {
        match self {
            ExecutionMode::Sequential => Ok(process_sequentially(batch, cost).await),
            ExecutionMode::Concurrent => process_concurrently(batch, cost).await,
        }
    }
}

// =============================================================================
// Sequential runner
// =============================================================================

/// Processes arrays one at a time in input order. Takes about `N * delay`.
pub async fn process_sequentially(batch: Batch, cost: SimulatedCost) -> Batch {
    let mut result = Vec::with_capacity(batch.len());
    for mut values in batch {
        cost.incur().await;
        sorter::sort_in_place(&mut values);
        result.push(values);
    }
    result
}

// =============================================================================
// Concurrent runner
// =============================================================================

/// Processes every array in its own task. Takes about one `delay` regardless
/// of batch size, since there is no cap on concurrent tasks.
pub async fn process_concurrently(batch: Batch, cost: SimulatedCost) -> Result<Batch, BatchError> {
    fan_out(batch, move |values| async move {
        cost.incur().await;
        sorter::sorted(values)
    })
    .await
}

/// Spawns one task per item and waits for all of them.
///
/// Output slot `i` always holds the result for input `i`: each task hands back
/// its own index, so completion order never decides placement. The first task
/// that fails ends the run; dropping the `JoinSet` aborts whatever is still
/// running.
async fn fan_out<T, R, F, Fut>(items: Vec<T>, unit: F) -> Result<Vec<R>, BatchError>
where
    T: Send + 'static,
    R: Default + Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = R> + Send + 'static,
{
    let len = items.len();
    let mut slots: Vec<R> = std::iter::repeat_with(R::default).take(len).collect();
    if len == 0 {
        return Ok(slots);
    }

    let mut set = JoinSet::new();
    for (index, item) in items.into_iter().enumerate() {
        let work = unit(item);
        set.spawn(async move { (index, work.await) });
    }
    debug!(tasks = len, "fanned out batch");

    let mut completed = 0;
    while let Some(joined) = set.join_next().await {
        let (index, value) = joined.map_err(|source| BatchError::TaskFailed {
            completed,
            source,
        })?;
        slots[index] = value;
        completed += 1;
    }

    Ok(slots)
}
