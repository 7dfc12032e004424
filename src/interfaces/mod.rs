//! Presentation-boundary data consumed by a renderer: labels, accent
//! colors and the declarative entrance-animation schedule. Nothing here
//! holds state or runs timers.

pub mod display;
