//! Server internals: configuration, telemetry, and the gRPC service.

pub mod config;
pub mod service;
pub mod telemetry;
