use thiserror::Error;

use crate::domain::card::SavedCardId;

pub type Result<T> = std::result::Result<T, CheckoutError>;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("instrument selection requires the card method to be active")]
    InstrumentUnavailable,
    #[error("unknown saved card: {0}")]
    UnknownSavedCard(SavedCardId),
    #[error("submit requires a complete instrument selection")]
    NotReadyToSubmit,
    #[error("a settlement is already in flight")]
    SettlementInFlight,
    #[error("checkout requires a non-empty cart")]
    EmptyCart,
    #[error("unknown post: {0}")]
    UnknownPost(u32),
    #[error("size and color must be chosen before adding to cart")]
    IncompleteSelection,
    #[error("card vault error: {0}")]
    Vault(String),
}

/// Strict field validation, surfaced on request only. The input masks
/// silently correct malformed text and `can_submit` never consults these
/// checks.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ValidationError {
    #[error("card number must contain 13 to 16 digits")]
    InvalidCardNumber,
    #[error("expiry must be MM/YY with a month between 01 and 12")]
    InvalidExpiry,
    #[error("cvv must contain 3 or 4 digits")]
    InvalidCvv,
    #[error("no payment instrument is selected")]
    NoInstrumentSelected,
}
