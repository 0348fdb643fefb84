//! Everything that touches the outside world: configuration, logging, the
//! terminal front end and the OS integrations behind the output actions.
mod app;
mod config;
mod desktop;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
