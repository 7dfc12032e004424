//! Application layer containing the two state machines of the client.
//!
//! `CheckoutSelector` owns payment method/instrument selection and the
//! simulated settlement; `AppContext` owns screen navigation, the cart and
//! the feed interactions. Both are driven synchronously by input events;
//! the only scheduled work is the settlement task, which reports back over
//! a `tokio` channel.

pub mod checkout;
pub mod context;
