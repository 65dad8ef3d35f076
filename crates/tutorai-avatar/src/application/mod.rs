//! Application Layer (Use Cases)
//!
//! Orchestrates the domain services and the generative provider.

mod avatar_pipeline;

pub use avatar_pipeline::{AvatarPipeline, PIPELINE_NAME};
