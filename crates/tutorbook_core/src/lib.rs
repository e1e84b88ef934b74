//! Core domain logic for tutoring session booking.
//! This crate is the single source of truth for the no-double-booking rule.

pub mod db;
pub mod logging;
pub mod model;
pub mod plan;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::directory::{Student, Teacher, NO_SPECIAL_NEEDS};
pub use model::id::{parse_record_id, InvalidIdError, SessionId, StudentId, TeacherId};
pub use model::session::{ClassSession, NewClassSession, ScheduleRequest};
pub use model::slot::{validate_date, validate_time, Slot, SlotError};
pub use plan::generate_plan;
pub use repo::directory_repo::{DirectoryRepository, SqliteDirectoryRepository};
pub use repo::ledger_repo::{BookingLedger, SqliteBookingLedger};
pub use repo::{RepoError, RepoResult};
pub use service::directory_service::{DirectoryError, DirectoryResult, DirectoryService};
pub use service::scheduler::{
    ReferenceField, ScheduleError, ScheduleResult, Scheduler, SchedulerOptions,
};
pub use service::study_plan_service::{StudyPlan, StudyPlanService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
