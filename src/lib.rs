//! Batch sorting service.
//!
//! Two endpoints sort a batch of integer arrays, paying a fixed simulated cost
//! per array: `/process-single` runs the arrays one after another, while
//! `/process-concurrent` runs one task per array and joins them, keeping the
//! output aligned with the input.

pub mod config;
pub mod delay;
pub mod error;
pub mod handler;
pub mod runner;
pub mod server;
pub mod sorter;

pub use config::ServerConfig;
pub use delay::SimulatedCost;
pub use error::{AppError, BatchError};
pub use handler::{handle_batch, BatchRequest, BatchResponse};
pub use runner::{process_concurrently, process_sequentially, Batch, ExecutionMode};
pub use server::Server;
