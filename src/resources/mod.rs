mod day_night_settings;
mod observer_list;
mod palette_listener_registry;
mod time_controller;

pub use day_night_settings::*;
pub use observer_list::{ObserverList, SubscriptionId};
pub use palette_listener_registry::PaletteListenerRegistry;
pub use time_controller::{install_time_controller, TimeController};
