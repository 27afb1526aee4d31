//! Primitives for pricking touches on odd stages: [`Bell`]s, [`Stage`]s, [`Row`]s and the
//! elementary [`Change`]s which transform one [`Row`] into the next.

#![deny(clippy::all)]

mod bell;
mod change;
mod row;
mod stage;

pub use bell::Bell;
pub use change::Change;
pub use row::{InvalidRowError, Row};
pub use stage::{Stage, UnsupportedStage};
