//! Record use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into add/delete/list use cases.
//! - Keep the form layer decoupled from storage details.

pub mod record_service;
