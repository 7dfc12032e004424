use crate::domain::card::{CardBrand, NewCardFields, NewSavedCard, SavedCard, SavedCardId};
use crate::domain::cart::OrderTotal;
use crate::domain::input::{mask_card_number, mask_cvv, mask_expiry};
use crate::domain::instrument::PaymentInstrument;
use crate::domain::method::PaymentMethod;
use crate::domain::ports::{CardVaultRef, SettlementGatewayRef};
use crate::error::{CheckoutError, Result, ValidationError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;

/// Saved cards shown before the catalog is expanded.
const COLLAPSED_SAVED_CARDS: usize = 3;

/// Outbound signals crossing the checkout boundary. The caller clears the
/// cart and navigates; checkout itself owns no screen state.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CheckoutSignal {
    /// Checkout was cancelled; return to the prior screen.
    Back,
    /// Settlement completed; fired at most once per mount.
    PaymentSucceeded,
}

pub type CheckoutSignalSender = mpsc::UnboundedSender<CheckoutSignal>;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum SettlementState {
    Idle,
    /// One-way state: a settlement never returns to `Idle`, which is what
    /// makes the success signal idempotent under repeated submits.
    InFlight,
}

/// The checkout/payment selection state machine.
///
/// State is created fresh per mount and discarded on success or on
/// navigating away; dropping the selector turns a still-scheduled
/// settlement callback into a no-op.
pub struct CheckoutSelector {
    order_total: OrderTotal,
    saved_cards: Vec<SavedCard>,
    method: Option<PaymentMethod>,
    instrument: Option<PaymentInstrument>,
    show_all_saved: bool,
    settlement: SettlementState,
    gateway: SettlementGatewayRef,
    vault: CardVaultRef,
    signals: CheckoutSignalSender,
    alive: Arc<AtomicBool>,
}

impl CheckoutSelector {
    /// Mounts a checkout view: loads the saved-card catalog from the vault
    /// and pre-selects card entry with an empty new-card form.
    pub async fn mount(
        order_total: OrderTotal,
        gateway: SettlementGatewayRef,
        vault: CardVaultRef,
        signals: CheckoutSignalSender,
    ) -> Result<Self> {
        let saved_cards = vault.all().await?;
        tracing::debug!(total = %order_total, saved_cards = saved_cards.len(), "checkout mounted");
        Ok(Self {
            order_total,
            saved_cards,
            method: Some(PaymentMethod::Card),
            instrument: Some(PaymentInstrument::new_card()),
            show_all_saved: false,
            settlement: SettlementState::Idle,
            gateway,
            vault,
            signals,
            alive: Arc::new(AtomicBool::new(true)),
        })
    }

    pub fn order_total(&self) -> &OrderTotal {
        &self.order_total
    }

    pub fn method(&self) -> Option<PaymentMethod> {
        self.method
    }

    pub fn instrument(&self) -> Option<&PaymentInstrument> {
        self.instrument.as_ref()
    }

    pub fn card_fields(&self) -> Option<&NewCardFields> {
        match &self.instrument {
            Some(PaymentInstrument::NewCard(fields)) => Some(fields),
            _ => None,
        }
    }

    /// The static redirect prompt, present exactly while a wallet method is
    /// active. This is terminal UI state: no completion signal follows.
    pub fn redirect_prompt(&self) -> Option<&'static str> {
        self.method.and_then(|m| m.redirect_prompt())
    }

    pub fn is_settling(&self) -> bool {
        self.settlement == SettlementState::InFlight
    }

    /// Toggles the active payment method. Re-selecting the active method
    /// collapses the selection; activating the card method starts from a
    /// fresh, empty new-card entry.
    pub fn select_method(&mut self, method: PaymentMethod) {
        if self.method == Some(method) {
            self.method = None;
            self.instrument = None;
            tracing::debug!(method = method.label(), "payment method collapsed");
            return;
        }
        self.method = Some(method);
        self.instrument = method
            .uses_instruments()
            .then(PaymentInstrument::new_card);
        tracing::debug!(method = method.label(), "payment method selected");
    }

    /// Selects the new-card entry. Keeps any field text already typed; use
    /// `select_method` to start over.
    pub fn select_new_card(&mut self) -> Result<()> {
        self.require_card_method()?;
        if !matches!(self.instrument, Some(PaymentInstrument::NewCard(_))) {
            self.instrument = Some(PaymentInstrument::new_card());
            tracing::debug!("new card entry selected");
        }
        Ok(())
    }

    /// Selects a saved card, discarding any in-progress field text and the
    /// save toggle.
    pub fn select_saved_card(&mut self, id: SavedCardId) -> Result<()> {
        self.require_card_method()?;
        if !self.saved_cards.iter().any(|c| c.id == id) {
            return Err(CheckoutError::UnknownSavedCard(id));
        }
        self.instrument = Some(PaymentInstrument::Saved(id));
        tracing::debug!(card = %id, "saved card selected");
        Ok(())
    }

    pub fn set_card_number(&mut self, raw: &str) {
        self.with_card_fields(|fields| fields.number = mask_card_number(raw));
    }

    pub fn set_expiry(&mut self, raw: &str) {
        self.with_card_fields(|fields| fields.expiry = mask_expiry(raw));
    }

    pub fn set_cvv(&mut self, raw: &str) {
        self.with_card_fields(|fields| fields.cvv = mask_cvv(raw));
    }

    pub fn set_save_card(&mut self, save: bool) {
        self.with_card_fields(|fields| fields.save = save);
    }

    pub fn saved_cards(&self) -> &[SavedCard] {
        &self.saved_cards
    }

    /// The saved cards currently shown: the first three, or the full
    /// catalog after `toggle_show_all_saved`.
    pub fn visible_saved_cards(&self) -> &[SavedCard] {
        if self.show_all_saved {
            &self.saved_cards
        } else {
            let visible = self.saved_cards.len().min(COLLAPSED_SAVED_CARDS);
            &self.saved_cards[..visible]
        }
    }

    /// The number of cards hidden behind the "show more" control.
    pub fn hidden_saved_count(&self) -> usize {
        self.saved_cards.len() - self.visible_saved_cards().len()
    }

    pub fn toggle_show_all_saved(&mut self) {
        self.show_all_saved = !self.show_all_saved;
    }

    /// Whether the pay button is enabled. A saved card is always complete;
    /// a new card needs text in all three fields. Wallet methods have no
    /// pay button, so this is false while one is active.
    pub fn can_submit(&self) -> bool {
        if self.method != Some(PaymentMethod::Card) {
            return false;
        }
        match &self.instrument {
            Some(PaymentInstrument::Saved(_)) => true,
            Some(PaymentInstrument::NewCard(fields)) => fields.is_complete(),
            None => false,
        }
    }

    /// Strict instrument validation, on request only; `can_submit` and
    /// `submit` deliberately do not consult it.
    pub fn validate_instrument(&self) -> std::result::Result<(), ValidationError> {
        if self.method != Some(PaymentMethod::Card) {
            return Err(ValidationError::NoInstrumentSelected);
        }
        match &self.instrument {
            Some(instrument) => instrument.validate(),
            None => Err(ValidationError::NoInstrumentSelected),
        }
    }

    /// Begins the simulated settlement. The spawned task resolves after the
    /// gateway's fixed delay, stores the entered card in the vault when the
    /// save toggle is on, and then emits `PaymentSucceeded`. If the selector
    /// was dropped in the meantime the callback is a logged no-op. A second
    /// submit while one is in flight is rejected, so the success signal can
    /// never fire twice.
    pub fn submit(&mut self) -> Result<()> {
        if self.settlement == SettlementState::InFlight {
            return Err(CheckoutError::SettlementInFlight);
        }
        if !self.can_submit() {
            return Err(CheckoutError::NotReadyToSubmit);
        }
        self.settlement = SettlementState::InFlight;

        let to_save = self.card_to_save();
        let gateway = Arc::clone(&self.gateway);
        let vault = Arc::clone(&self.vault);
        let total = self.order_total.clone();
        let signals = self.signals.clone();
        let alive = Arc::clone(&self.alive);
        tracing::info!(total = %total, "payment submitted");

        tokio::spawn(async move {
            if let Err(error) = gateway.settle(&total).await {
                tracing::warn!(%error, "settlement failed");
                return;
            }
            if let Some(card) = to_save {
                match vault.store(card).await {
                    Ok(stored) => tracing::info!(card = %stored.id, "card saved to vault"),
                    Err(error) => tracing::warn!(%error, "saving card failed"),
                }
            }
            // The guard is a single load, not synchronized with `Drop`:
            // transitions and unmounts share one event queue, so the load
            // and the send cannot interleave with a drop. A multi-threaded
            // caller would need a lock around unmount and delivery.
            if !alive.load(Ordering::Acquire) {
                tracing::warn!("settlement resolved after checkout unmounted; signal dropped");
                return;
            }
            if signals.send(CheckoutSignal::PaymentSucceeded).is_err() {
                tracing::warn!("checkout signal receiver gone");
            }
        });
        Ok(())
    }

    /// Cancels checkout and hands control back to the caller.
    pub fn back(&self) {
        if self.signals.send(CheckoutSignal::Back).is_err() {
            tracing::warn!("checkout signal receiver gone");
        }
    }

    fn require_card_method(&self) -> Result<()> {
        if self.method == Some(PaymentMethod::Card) {
            Ok(())
        } else {
            Err(CheckoutError::InstrumentUnavailable)
        }
    }

    fn with_card_fields(&mut self, apply: impl FnOnce(&mut NewCardFields)) {
        match &mut self.instrument {
            Some(PaymentInstrument::NewCard(fields)) => apply(fields),
            _ => tracing::trace!("card field input ignored: no new-card entry active"),
        }
    }

    /// The vault record for the entered card, when the save toggle is on
    /// and the number carries enough digits to mask and brand.
    fn card_to_save(&self) -> Option<NewSavedCard> {
        let Some(PaymentInstrument::NewCard(fields)) = &self.instrument else {
            return None;
        };
        if !fields.save {
            return None;
        }
        let digits: String = fields.number.chars().filter(char::is_ascii_digit).collect();
        if digits.len() < 4 {
            return None;
        }
        CardBrand::infer(&digits).map(|brand| NewSavedCard {
            last4: digits[digits.len() - 4..].to_string(),
            brand,
            expiry: fields.expiry.clone(),
        })
    }
}

impl Drop for CheckoutSelector {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::demo_saved_cards;
    use crate::infrastructure::in_memory::InMemoryCardVault;
    use crate::infrastructure::settlement::MockSettlement;
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;

    async fn mounted() -> (CheckoutSelector, UnboundedReceiver<CheckoutSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let selector = CheckoutSelector::mount(
            OrderTotal::new("₸62,000"),
            Arc::new(MockSettlement::with_delay(Duration::from_millis(5))),
            Arc::new(InMemoryCardVault::with_cards(demo_saved_cards())),
            tx,
        )
        .await
        .unwrap();
        (selector, rx)
    }

    #[tokio::test]
    async fn test_mount_preselects_new_card_entry() {
        let (selector, _rx) = mounted().await;
        assert_eq!(selector.method(), Some(PaymentMethod::Card));
        assert!(selector.card_fields().is_some_and(|f| !f.is_complete()));
        assert!(!selector.can_submit());
    }

    #[tokio::test]
    async fn test_reselecting_active_method_collapses() {
        let (mut selector, _rx) = mounted().await;
        selector.select_method(PaymentMethod::Card);
        assert_eq!(selector.method(), None);
        assert!(selector.instrument().is_none());
        assert!(!selector.can_submit());
    }

    #[tokio::test]
    async fn test_wallet_selection_is_terminal_prompt() {
        let (mut selector, _rx) = mounted().await;
        selector.select_method(PaymentMethod::Kaspi);
        assert_eq!(
            selector.redirect_prompt(),
            Some("Complete payment in the Kaspi.kz app")
        );
        assert!(selector.instrument().is_none());
        assert!(!selector.can_submit());
        assert!(matches!(
            selector.select_saved_card(SavedCardId(1)),
            Err(CheckoutError::InstrumentUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_reactivating_card_clears_field_text() {
        let (mut selector, _rx) = mounted().await;
        selector.set_card_number("4242424242424242");
        selector.select_method(PaymentMethod::Kaspi);
        selector.select_method(PaymentMethod::Card);
        assert_eq!(selector.card_fields().unwrap().number, "");
    }

    #[tokio::test]
    async fn test_field_masks_applied_on_input() {
        let (mut selector, _rx) = mounted().await;
        selector.set_card_number("4242-4242-4242-4242 999");
        selector.set_expiry("1225");
        selector.set_cvv("12a3");
        let fields = selector.card_fields().unwrap();
        assert_eq!(fields.number, "4242 4242 4242 4242");
        assert_eq!(fields.expiry, "12/25");
        assert_eq!(fields.cvv, "123");
    }

    #[tokio::test]
    async fn test_can_submit_requires_all_new_card_fields() {
        let (mut selector, _rx) = mounted().await;
        selector.set_card_number("4242424242424242");
        selector.set_expiry("1225");
        assert!(!selector.can_submit());
        selector.set_cvv("123");
        assert!(selector.can_submit());
        selector.set_cvv("");
        assert!(!selector.can_submit());
    }

    #[tokio::test]
    async fn test_saved_card_is_immediately_submittable() {
        let (mut selector, _rx) = mounted().await;
        selector.select_saved_card(SavedCardId(2)).unwrap();
        assert!(selector.can_submit());
    }

    #[tokio::test]
    async fn test_unknown_saved_card_rejected() {
        let (mut selector, _rx) = mounted().await;
        assert!(matches!(
            selector.select_saved_card(SavedCardId(99)),
            Err(CheckoutError::UnknownSavedCard(SavedCardId(99)))
        ));
    }

    #[tokio::test]
    async fn test_switching_to_saved_card_discards_entry() {
        let (mut selector, _rx) = mounted().await;
        selector.set_card_number("4242424242424242");
        selector.set_expiry("1225");
        selector.set_cvv("123");
        selector.set_save_card(true);

        selector.select_saved_card(SavedCardId(1)).unwrap();
        assert!(selector.card_fields().is_none());

        selector.select_new_card().unwrap();
        let fields = selector.card_fields().unwrap();
        assert_eq!(fields.number, "");
        assert_eq!(fields.expiry, "");
        assert_eq!(fields.cvv, "");
        assert!(!fields.save);
    }

    #[tokio::test]
    async fn test_saved_card_visibility_toggle() {
        let (mut selector, _rx) = mounted().await;
        assert_eq!(selector.visible_saved_cards().len(), 3);
        assert_eq!(selector.hidden_saved_count(), 2);
        selector.toggle_show_all_saved();
        assert_eq!(selector.visible_saved_cards().len(), 5);
        assert_eq!(selector.hidden_saved_count(), 0);
        selector.toggle_show_all_saved();
        assert_eq!(selector.visible_saved_cards().len(), 3);
    }

    #[tokio::test]
    async fn test_validate_instrument_reports_taxonomy() {
        let (mut selector, _rx) = mounted().await;
        selector.set_card_number("4242424242424242");
        selector.set_expiry("13/25");
        selector.set_cvv("123");
        assert_eq!(
            selector.validate_instrument(),
            Err(ValidationError::InvalidExpiry)
        );
        selector.select_method(PaymentMethod::Card); // collapse
        assert_eq!(
            selector.validate_instrument(),
            Err(ValidationError::NoInstrumentSelected)
        );
    }

    #[tokio::test]
    async fn test_submit_rejected_until_ready() {
        let (mut selector, _rx) = mounted().await;
        assert!(matches!(
            selector.submit(),
            Err(CheckoutError::NotReadyToSubmit)
        ));
    }
}
