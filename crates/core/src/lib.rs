pub mod config;
pub mod payload;

pub use config::Config;
pub use payload::*;
