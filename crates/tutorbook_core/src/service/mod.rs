//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the operations exposed to callers.
//! - Own the no-double-booking rule (`Scheduler`).
//! - Keep CLI callers decoupled from storage details.

pub mod directory_service;
pub mod scheduler;
pub mod study_plan_service;
