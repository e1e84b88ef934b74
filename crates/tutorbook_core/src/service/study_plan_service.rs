//! Study plan use-case service.
//!
//! Looks a student up by identifier text and renders a roadmap from their
//! recorded name and needs. Generation runs only after a successful lookup.

use crate::model::directory::Student;
use crate::plan::generate_plan;
use crate::repo::directory_repo::DirectoryRepository;
use crate::service::directory_service::{DirectoryResult, DirectoryService};
use log::{info, warn};

/// Generated roadmap together with the student it was built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyPlan {
    pub student: Student,
    pub text: String,
}

pub struct StudyPlanService<R: DirectoryRepository> {
    directory: DirectoryService<R>,
}

impl<R: DirectoryRepository> StudyPlanService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            directory: DirectoryService::new(repo),
        }
    }

    /// Builds a study plan for the student named by `student_id`.
    ///
    /// # Errors
    /// - `InvalidReference` for malformed identifier text.
    /// - `StudentNotFound` when no such student exists.
    pub fn plan_for(&self, student_id: &str) -> DirectoryResult<StudyPlan> {
        let student = match self.directory.find_student(student_id) {
            Ok(student) => student,
            Err(err) => {
                warn!("event=study_plan module=plan status=rejected error={err}");
                return Err(err);
            }
        };

        let text = generate_plan(&student.name, student.special_needs.as_deref().unwrap_or(""));
        info!(
            "event=study_plan module=plan status=ok student_id={}",
            student.id
        );
        Ok(StudyPlan { student, text })
    }
}
