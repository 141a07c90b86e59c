//! Application layer - the weather update pipeline
//!
//! Defines the ports the pipeline reaches external systems through and the
//! services that resolve a place, assemble a snapshot, compose its message
//! and publish the result.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
