pub mod constants;
pub mod popup_message;
#[allow(clippy::module_inception)]
pub mod ui;
pub mod ui_callback;
pub mod ui_key;
pub mod utils;
pub mod widgets;
