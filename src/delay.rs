use std::time::Duration;

/// Fixed artificial latency standing in for an expensive operation.
///
/// Every unit of work pays this cost once before its array is sorted, which is
/// what makes the sequential and concurrent runners observably different.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedCost {
    delay: Duration,
}

impl SimulatedCost {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

    pub fn new(delay: Duration) -> Self {
        SimulatedCost { delay }
    }

    /// No latency at all. Useful when only the results matter.
    pub fn none() -> Self {
        SimulatedCost::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Suspends the calling task for the configured delay.
    pub async fn incur(&self) {
        if self.delay.is_zero() {
            return;
        }
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for SimulatedCost {
    fn default() -> Self {
        SimulatedCost::new(Self::DEFAULT_DELAY)
    }
}
