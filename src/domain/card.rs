use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of card networks the storefront renders.
///
/// Adding a network is a compile-time-checked change: every mapping below
/// is an exhaustive match.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
}

impl CardBrand {
    pub fn label(&self) -> &'static str {
        match self {
            CardBrand::Visa => "Visa",
            CardBrand::Mastercard => "Mastercard",
        }
    }

    /// Best-effort network detection from the leading digit of a PAN.
    /// Only consulted when persisting a newly entered card.
    pub fn infer(card_digits: &str) -> Option<Self> {
        match card_digits.chars().next()? {
            '4' => Some(CardBrand::Visa),
            '2' | '5' => Some(CardBrand::Mastercard),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct SavedCardId(pub u32);

impl fmt::Display for SavedCardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A previously saved card credential, immutable for the session.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct SavedCard {
    pub id: SavedCardId,
    pub last4: String,
    pub brand: CardBrand,
    pub expiry: String,
}

impl SavedCard {
    /// Masked display label, e.g. "•••• 4242".
    pub fn masked_label(&self) -> String {
        format!("•••• {}", self.last4)
    }
}

/// A card to persist in the vault; the vault assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSavedCard {
    pub last4: String,
    pub brand: CardBrand,
    pub expiry: String,
}

/// In-progress text for a card being entered, plus the save toggle.
///
/// The strings hold masked field text (see `domain::input`), never raw
/// keystrokes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NewCardFields {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub save: bool,
}

impl NewCardFields {
    /// Completeness as the pay button requires it: all three fields have
    /// text. No shape validation happens here.
    pub fn is_complete(&self) -> bool {
        !self.number.is_empty() && !self.expiry.is_empty() && !self.cvv.is_empty()
    }
}

/// The fixed saved-card catalog the storefront demo ships with.
pub fn demo_saved_cards() -> Vec<SavedCard> {
    [
        (1, "4242", CardBrand::Visa, "12/25"),
        (2, "8888", CardBrand::Mastercard, "03/26"),
        (3, "5555", CardBrand::Visa, "08/24"),
        (4, "1234", CardBrand::Mastercard, "11/25"),
        (5, "9999", CardBrand::Visa, "05/27"),
    ]
    .into_iter()
    .map(|(id, last4, brand, expiry)| SavedCard {
        id: SavedCardId(id),
        last4: last4.to_string(),
        brand,
        expiry: expiry.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_inference() {
        assert_eq!(CardBrand::infer("4242424242424242"), Some(CardBrand::Visa));
        assert_eq!(CardBrand::infer("5105105105105100"), Some(CardBrand::Mastercard));
        assert_eq!(CardBrand::infer("2221000000000009"), Some(CardBrand::Mastercard));
        assert_eq!(CardBrand::infer("371449635398431"), None);
        assert_eq!(CardBrand::infer(""), None);
    }

    #[test]
    fn test_masked_label() {
        let card = &demo_saved_cards()[0];
        assert_eq!(card.masked_label(), "•••• 4242");
    }

    #[test]
    fn test_new_card_completeness() {
        let mut fields = NewCardFields::default();
        assert!(!fields.is_complete());
        fields.number = "4242 4242 4242 4242".to_string();
        fields.expiry = "12/25".to_string();
        assert!(!fields.is_complete());
        fields.cvv = "123".to_string();
        assert!(fields.is_complete());
    }

    #[test]
    fn test_saved_card_catalog_round_trips_as_json() {
        let cards = demo_saved_cards();
        let json = serde_json::to_string(&cards).unwrap();
        let back: Vec<SavedCard> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cards);
        assert!(json.contains("\"brand\":\"visa\""));
    }
}
