use crate::domain::card::{NewSavedCard, SavedCard};
use crate::domain::cart::OrderTotal;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type SettlementGatewayRef = Arc<dyn SettlementGateway>;
pub type CardVaultRef = Arc<dyn CardVault>;

/// Backend confirmation step following submission.
#[async_trait]
pub trait SettlementGateway: Send + Sync {
    async fn settle(&self, total: &OrderTotal) -> Result<()>;
}

/// Session store for saved card credentials. Supplies the catalog shown at
/// checkout and absorbs cards entered with the save toggle on.
#[async_trait]
pub trait CardVault: Send + Sync {
    /// Persists a card and returns the stored record with its assigned id.
    async fn store(&self, card: NewSavedCard) -> Result<SavedCard>;
    async fn all(&self) -> Result<Vec<SavedCard>>;
}
