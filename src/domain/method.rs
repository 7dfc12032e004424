use serde::{Deserialize, Serialize};

/// Closed set of payment methods offered at checkout.
///
/// The collapsed/deselected state is modelled as `Option<PaymentMethod>`
/// on the checkout selector, not as a variant here.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card entry or a saved card.
    Card,
    /// Redirect into the Kaspi.kz app.
    Kaspi,
    /// Redirect into the Halyk Bank app.
    Halyk,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::Kaspi => "Kaspi",
            PaymentMethod::Halyk => "Halyk",
        }
    }

    /// The static prompt shown for redirect-based methods. Selecting one of
    /// these is terminal UI state: there is no completion signal back from
    /// the provider's app.
    pub fn redirect_prompt(&self) -> Option<&'static str> {
        match self {
            PaymentMethod::Card => None,
            PaymentMethod::Kaspi => Some("Complete payment in the Kaspi.kz app"),
            PaymentMethod::Halyk => Some("Complete payment in the Halyk Bank app"),
        }
    }

    /// Whether the method routes through an instrument (new or saved card)
    /// rather than an external redirect.
    pub fn uses_instruments(&self) -> bool {
        matches!(self, PaymentMethod::Card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_wallets_have_redirect_prompts() {
        assert!(PaymentMethod::Card.redirect_prompt().is_none());
        assert!(
            PaymentMethod::Kaspi
                .redirect_prompt()
                .is_some_and(|p| p.contains("Kaspi.kz"))
        );
        assert!(
            PaymentMethod::Halyk
                .redirect_prompt()
                .is_some_and(|p| p.contains("Halyk Bank"))
        );
    }

    #[test]
    fn test_only_card_uses_instruments() {
        assert!(PaymentMethod::Card.uses_instruments());
        assert!(!PaymentMethod::Kaspi.uses_instruments());
        assert!(!PaymentMethod::Halyk.uses_instruments());
    }
}
