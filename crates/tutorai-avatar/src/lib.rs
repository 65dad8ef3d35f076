//! TutorAI Avatar Pipeline
//!
//! Turns a chat turn into a persona-conditioned prompt for a generative
//! language API and returns the model's reply: JSON text carrying the spoken
//! answer plus animation directives for a 3D avatar renderer.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure data and logic
//!   - `entities/`: Persona registry, input shapes, response envelope
//!   - `value_objects/`: PersonaKey, Gender, AnimationCategory, GestureChannel
//!   - `services/`: Animation catalog, input normalizer, prompt composer
//!   - `errors/`: Domain and upstream error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `services/`: Generative provider interface
//!
//! - **Services** (`services/`): Provider implementations (Gemini)
//!
//! - **Application** (`application/`): The `pipe` / `run` facade
//!
//! # Usage
//!
//! ```rust,ignore
//! use tutorai_avatar::{AvatarPipeline, PipelineConfig};
//!
//! let pipeline = AvatarPipeline::from_config(PipelineConfig::from_env()?)?;
//! let reply = pipeline.run(&serde_json::json!("Tell me about gravity"), false).await;
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types
pub use application::{AvatarPipeline, PIPELINE_NAME};
pub use config::PipelineConfig;
pub use domain::{
    AnimationCategory, ChatInput, DomainError, Gender, GestureChannel, GlbAnimation,
    GlbAnimationStep, InputMessage, NormalizedInput, Persona, PersonaKey, ResponseEnvelope,
    UpstreamError,
};
pub use ports::{GenerativeProvider, Generation};
pub use services::GeminiProvider;
