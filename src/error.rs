use std::fmt;

use thiserror::Error;

/// Which of the two palettes a [`PaletteSwapper`](crate::components::PaletteSwapper) needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSlot {
    Day,
    Night,
}

impl fmt::Display for PaletteSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteSlot::Day => write!(f, "day"),
            PaletteSlot::Night => write!(f, "night"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DayNightError {
    /// A palette swapper was spawned without one of its required palettes.
    #[error("{0} palette is not assigned")]
    MissingPalette(PaletteSlot),

    /// The asset server gave up on one of the palette images.
    #[error("{0} palette failed to load")]
    PaletteLoadFailed(PaletteSlot),

    #[error("transition duration must be a finite number of seconds, got {0}")]
    NonFiniteDuration(f32),

    /// A second time controller was installed while one is already active.
    #[error("a time controller is already active, ignoring duplicate")]
    ControllerAlreadyActive,

    #[error("unknown toggle key `{0}`")]
    UnknownToggleKey(String),
}
