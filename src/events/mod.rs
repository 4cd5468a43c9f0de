mod time_event;

pub use time_event::{SetTimeStateEvent, TimeToggleEvent};
