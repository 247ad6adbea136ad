//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the per-conversation `Session` and its `DisplayPreference`
//! - `turn`: conversation turns (`TurnRole`, `Turn`) and the append-only
//!   `Transcript`

mod model;
mod turn;

pub use model::{DisplayPreference, Session};
pub use turn::{Transcript, Turn, TurnRole};
