//! Backend for an AI learning assistant.
//!
//! Forwards questions, images and audio to managed AI and cloud providers
//! (Gemini, Google Cloud Speech, Google Cloud Storage, Serper) and reshapes
//! their responses for the client application.

pub mod ai;
pub mod api;
pub mod assistant;
pub mod error;
pub mod keywords;
pub mod media;
pub mod models;
pub mod normalize;
pub mod prompts;
pub mod search;
pub mod speech;
pub mod storage;

pub use error::{Error, Result};
