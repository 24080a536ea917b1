pub mod config;
pub mod error;
pub mod recruiting;
pub mod telemetry;
