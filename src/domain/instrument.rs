use crate::domain::card::{NewCardFields, SavedCardId};
use crate::error::ValidationError;

/// The payment credential selected under the card method.
///
/// In-progress field text lives inside the `NewCard` variant, so switching
/// to a saved card structurally discards it along with the save toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentInstrument {
    NewCard(NewCardFields),
    Saved(SavedCardId),
}

impl PaymentInstrument {
    pub fn new_card() -> Self {
        PaymentInstrument::NewCard(NewCardFields::default())
    }

    /// Strict shape validation. Submission is only ever gated on non-empty
    /// fields; callers opt in to these checks explicitly.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            PaymentInstrument::Saved(_) => Ok(()),
            PaymentInstrument::NewCard(fields) => {
                let digits = fields.number.chars().filter(char::is_ascii_digit).count();
                if !(13..=16).contains(&digits) {
                    return Err(ValidationError::InvalidCardNumber);
                }
                if !expiry_is_well_formed(&fields.expiry) {
                    return Err(ValidationError::InvalidExpiry);
                }
                let cvv_len = fields.cvv.len();
                if !(3..=4).contains(&cvv_len) || !fields.cvv.chars().all(|c| c.is_ascii_digit()) {
                    return Err(ValidationError::InvalidCvv);
                }
                Ok(())
            }
        }
    }
}

fn expiry_is_well_formed(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 2 {
        return false;
    }
    if !year.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}
