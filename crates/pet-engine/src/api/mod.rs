pub mod config;
pub mod host;
pub mod sim;
pub mod types;
