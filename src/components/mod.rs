mod palette_swapper;
mod time_state;

pub use palette_swapper::*;
pub use time_state::TimeState;
