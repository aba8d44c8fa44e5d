//! Core service integrations.

pub mod llm;
