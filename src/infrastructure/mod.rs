//! In-memory implementations of the domain ports. Nothing here survives
//! the session; persistence is out of scope for the client.

pub mod in_memory;
pub mod settlement;
