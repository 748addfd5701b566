//! Infrastructure adapters: telemetry bootstrap and the HTTP gateway.

pub mod error;
pub mod http;
pub mod telemetry;

pub use error::InfraError;
