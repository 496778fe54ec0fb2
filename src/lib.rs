//! Core engine for Brailletopía, an accessible braille-alphabet tutor:
//! the 6-dot pattern codec, the game state machines built on top of it,
//! and the settings/progress store. Rendering, speech and audio live
//! behind small traits so the whole crate runs headless.

pub mod core;
pub mod error;
pub mod feedback;
pub mod games;
pub mod gate;
pub mod progress;
pub mod settings;

pub use crate::core::engine::TutorEngine;
pub use crate::core::types::{CellState, Dot, DotSet};
pub use crate::error::{Result, TutorError};
