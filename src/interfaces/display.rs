use crate::domain::card::{CardBrand, SavedCard, SavedCardId};
use crate::domain::method::PaymentMethod;
use std::time::Duration;

/// Brand accent color for saved-card rows. Exhaustive by construction:
/// a new brand does not compile until it gets a color.
pub fn brand_accent(brand: CardBrand) -> &'static str {
    match brand {
        CardBrand::Visa => "#1A1F71",
        CardBrand::Mastercard => "#EB001B",
    }
}

/// Accent color for the method picker buttons.
pub fn method_accent(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Card => "#d33f57",
        PaymentMethod::Kaspi => "#FF4B3A",
        PaymentMethod::Halyk => "#00A859",
    }
}

/// Row label for a saved card, e.g. "Visa •••• 4242  12/25".
pub fn saved_card_label(card: &SavedCard) -> String {
    format!(
        "{} {}  {}",
        card.brand.label(),
        card.masked_label(),
        card.expiry
    )
}

/// Elements the checkout form animates in.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ElementId {
    ApplePayButton,
    Divider,
    MethodButton(PaymentMethod),
    NewCardRow,
    SavedCardRow(SavedCardId),
}

/// Entrance stagger for the checkout form chrome: 100 ms base, 50 ms per
/// element. Pure data for a renderer; the core never runs these timers.
pub fn form_entrance_schedule() -> Vec<(ElementId, Duration)> {
    [
        ElementId::ApplePayButton,
        ElementId::Divider,
        ElementId::MethodButton(PaymentMethod::Card),
        ElementId::MethodButton(PaymentMethod::Kaspi),
        ElementId::MethodButton(PaymentMethod::Halyk),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, id)| (id, Duration::from_millis(100 + i as u64 * 50)))
    .collect()
}

/// Entrance stagger for the card list: 60 ms per row, new-card entry
/// first, then the visible saved cards.
pub fn card_list_entrance_schedule(visible: &[SavedCard]) -> Vec<(ElementId, Duration)> {
    std::iter::once(ElementId::NewCardRow)
        .chain(visible.iter().map(|c| ElementId::SavedCardRow(c.id)))
        .enumerate()
        .map(|(i, id)| (id, Duration::from_millis(i as u64 * 60)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::demo_saved_cards;

    #[test]
    fn test_saved_card_label() {
        let cards = demo_saved_cards();
        assert_eq!(saved_card_label(&cards[0]), "Visa •••• 4242  12/25");
        assert_eq!(saved_card_label(&cards[1]), "Mastercard •••• 8888  03/26");
    }

    #[test]
    fn test_form_entrance_stagger() {
        let schedule = form_entrance_schedule();
        assert_eq!(schedule.len(), 5);
        assert_eq!(
            schedule[0],
            (ElementId::ApplePayButton, Duration::from_millis(100))
        );
        assert_eq!(
            schedule[4],
            (
                ElementId::MethodButton(PaymentMethod::Halyk),
                Duration::from_millis(300)
            )
        );
    }

    #[test]
    fn test_card_list_entrance_follows_visibility() {
        let cards = demo_saved_cards();
        let schedule = card_list_entrance_schedule(&cards[..3]);
        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule[0], (ElementId::NewCardRow, Duration::ZERO));
        assert_eq!(
            schedule[3],
            (
                ElementId::SavedCardRow(SavedCardId(3)),
                Duration::from_millis(180)
            )
        );
    }
}
