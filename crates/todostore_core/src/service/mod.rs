//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Keep CLI/HTTP layers decoupled from the concrete backend.

pub mod todo_service;
