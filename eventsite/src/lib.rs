pub mod commands;
pub mod email;
pub mod environment;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
