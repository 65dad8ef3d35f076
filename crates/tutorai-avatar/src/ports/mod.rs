//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the pipeline
//! interacts with external systems.
//!
//! Implementations of these traits live in `services/`.

pub mod services;

// Re-exports
pub use services::*;
