pub mod app_state;
pub mod commands;
pub mod constants;
pub mod error;
pub mod event_models;
pub mod host;
pub mod overlay;
pub mod parser;
pub mod plugin;
pub mod reader;
pub mod repl;
pub mod tracker;

pub use error::CannonError;
pub use event_models::*;
pub use host::GameHost;
pub use parser::parse_line;
pub use plugin::CannonDamagePlugin;
pub use tracker::Tracker;
