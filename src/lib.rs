pub mod app;
pub mod args;
pub mod auth;
pub mod crossterm_event_handler;
pub mod error;
pub mod session;
pub mod store;
pub mod tournament;
pub mod tui;
pub mod types;
pub mod ui;
