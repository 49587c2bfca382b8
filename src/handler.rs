//! Request handling: decode a batch, run it, time it, encode the result.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::delay::SimulatedCost;
use crate::error::AppError;
use crate::runner::{Batch, ExecutionMode};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchRequest {
    pub to_sort: Batch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    pub sorted_arrays: Batch,
    /// Elapsed nanoseconds as a decimal string.
    pub time_ns: String,
}

/// Decodes `body`, runs the batch with `mode` and reports how long the run took.
///
/// Only the runner call is timed; decoding and encoding are excluded.
pub async fn handle_batch(
    body: &[u8],
    mode: ExecutionMode,
    cost: SimulatedCost,
) -> Result<BatchResponse, AppError> {
    let request: BatchRequest = serde_json::from_slice(body)?;
    let arrays = request.to_sort.len();

    let start = Instant::now();
    let sorted_arrays = mode.run(request.to_sort, cost).await?;
    let elapsed = start.elapsed();

    info!(
        mode = mode.as_str(),
        arrays,
        elapsed_ms = elapsed.as_millis() as u64,
        "batch processed"
    );

    Ok(BatchResponse {
        sorted_arrays,
        time_ns: elapsed.as_nanos().to_string(),
    })
}
