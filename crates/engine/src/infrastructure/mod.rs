//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod config;
pub mod openai_compat;
pub mod persistence;
pub mod ports;
pub mod resilient_llm;
pub mod word_generator;
