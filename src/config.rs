use std::net::SocketAddr;
use std::time::Duration;

use crate::delay::SimulatedCost;

/// Server settings. The binary always runs with [`ServerConfig::default`];
/// the builder methods exist so tests can bind an ephemeral port and shorten
/// the simulated delay.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub delay: Duration,
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 8000;

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn cost(&self) -> SimulatedCost {
        SimulatedCost::new(self.delay)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addr: ([0, 0, 0, 0], Self::DEFAULT_PORT).into(),
            delay: SimulatedCost::DEFAULT_DELAY,
        }
    }
}
