pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod executor;
pub mod server;
pub mod telemetry;
