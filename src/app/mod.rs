mod app;
mod color_input;
mod handler;
mod parse_input;
mod picker;

pub use app::{spawn_load, App};
pub use handler::FireAndForget;
pub use picker::PickerOptions;
