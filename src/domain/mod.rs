//! Domain layer: value objects, closed enumerations and port traits.
//!
//! Everything here is session-local, in-memory data. Records are immutable
//! for the session once created; the state machines in the application
//! layer own all mutation.

pub mod card;
pub mod cart;
pub mod input;
pub mod instrument;
pub mod method;
pub mod money;
pub mod ports;
pub mod post;
