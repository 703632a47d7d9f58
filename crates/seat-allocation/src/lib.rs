pub mod allocation;
pub mod config;
pub mod error;
pub mod telemetry;
