//! Service Ports
//!
//! Abstract interfaces for external services.

mod generative_provider;

pub use generative_provider::*;
