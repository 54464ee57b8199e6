//! Odontogram position editing
//!
//! [`ToothLayout`] is the in-memory tooth list that detection results are
//! merged into; [`InteractionController`] applies drag and wheel-rotate
//! gestures to it.

pub mod interaction;
pub mod layout;

pub use interaction::{InteractionController, InteractionState, PointerEvent};
pub use layout::{PositionEdit, ToothLayout};
