pub mod config;
pub mod types;

pub use config::{ConfigError, RosterConfig};
pub use types::*;
