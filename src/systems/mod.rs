mod palette_swap_system;
mod time_toggle_system;

pub use palette_swap_system::*;
pub use time_toggle_system::*;
