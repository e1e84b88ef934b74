//! Domain model for students, teachers and booked class sessions.
//!
//! # Responsibility
//! - Define canonical records shared by the directory, ledger and scheduler.
//! - Own input validation for identifiers and slots.
//!
//! # Invariants
//! - Identifiers are assigned by storage and never reused.
//! - Records are immutable once created.
//! - A slot is an exact `(date, time)` text pair in canonical form.

pub mod directory;
pub mod id;
pub mod session;
pub mod slot;
