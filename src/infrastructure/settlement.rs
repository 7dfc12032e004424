use crate::domain::cart::OrderTotal;
use crate::domain::ports::SettlementGateway;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Simulated settlement backend: resolves successfully after a fixed
/// delay, unconditionally. There is no failure path, retry or timeout;
/// this stands in for a real gateway and must not ship as one.
#[derive(Debug, Clone)]
pub struct MockSettlement {
    delay: Duration,
}

impl MockSettlement {
    /// Two-second settlement, the delay the storefront demo uses.
    pub fn new() -> Self {
        Self::with_delay(Duration::from_secs(2))
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockSettlement {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettlementGateway for MockSettlement {
    async fn settle(&self, total: &OrderTotal) -> Result<()> {
        tracing::debug!(total = %total, delay_ms = self.delay.as_millis() as u64, "settling order");
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
