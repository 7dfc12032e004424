use crate::domain::card::{NewSavedCard, SavedCard, SavedCardId};
use crate::domain::ports::CardVault;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory card vault.
///
/// Keeps cards in insertion order, since checkout shows the first three by
/// default. Ids are assigned monotonically above the seeded catalog.
#[derive(Default, Clone)]
pub struct InMemoryCardVault {
    cards: Arc<RwLock<Vec<SavedCard>>>,
}

impl InMemoryCardVault {
    /// Creates an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a vault seeded with an existing catalog.
    pub fn with_cards(cards: Vec<SavedCard>) -> Self {
        Self {
            cards: Arc::new(RwLock::new(cards)),
        }
    }
}

#[async_trait]
impl CardVault for InMemoryCardVault {
    async fn store(&self, card: NewSavedCard) -> Result<SavedCard> {
        let mut cards = self.cards.write().await;
        let next_id = cards.iter().map(|c| c.id.0).max().unwrap_or(0) + 1;
        let stored = SavedCard {
            id: SavedCardId(next_id),
            last4: card.last4,
            brand: card.brand,
            expiry: card.expiry,
        };
        cards.push(stored.clone());
        Ok(stored)
    }

    async fn all(&self) -> Result<Vec<SavedCard>> {
        let cards = self.cards.read().await;
        Ok(cards.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::{CardBrand, demo_saved_cards};

    #[tokio::test]
    async fn test_vault_preserves_catalog_order() {
        let vault = InMemoryCardVault::with_cards(demo_saved_cards());
        let cards = vault.all().await.unwrap();
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].last4, "4242");
        assert_eq!(cards[4].last4, "9999");
    }

    #[tokio::test]
    async fn test_store_assigns_next_id() {
        let vault = InMemoryCardVault::with_cards(demo_saved_cards());
        let stored = vault
            .store(NewSavedCard {
                last4: "0005".to_string(),
                brand: CardBrand::Visa,
                expiry: "01/28".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(stored.id, SavedCardId(6));
        let cards = vault.all().await.unwrap();
        assert_eq!(cards.len(), 6);
        assert_eq!(cards.last().unwrap().last4, "0005");
    }

    #[tokio::test]
    async fn test_empty_vault_starts_ids_at_one() {
        let vault = InMemoryCardVault::new();
        let stored = vault
            .store(NewSavedCard {
                last4: "4242".to_string(),
                brand: CardBrand::Visa,
                expiry: "12/25".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(stored.id, SavedCardId(1));
    }
}
