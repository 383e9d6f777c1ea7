pub mod config;
pub mod content;
pub mod error;
pub mod events;
pub mod telemetry;
