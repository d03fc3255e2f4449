//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep CLI/presentation layers decoupled from storage details.

pub mod task_service;
