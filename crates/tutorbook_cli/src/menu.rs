//! Text menu driving the core operations.
//!
//! # Invariants
//! - Every booking goes through `Scheduler::schedule`.
//! - Storage failures end the session; all other outcomes are printed and the
//!   menu continues.
//! - End of input behaves like choosing `0`.

use log::info;
use rusqlite::Connection;
use std::io::{BufRead, Write};
use tutorbook_core::{
    DirectoryError, DirectoryService, ScheduleError, ScheduleRequest, Scheduler,
    SchedulerOptions, SqliteDirectoryRepository, StudyPlanService,
};

const MENU: &str = "
--- Student Scheduling System ---
1. Add Student
2. Add Teacher
3. List Students
4. List Teachers
5. Schedule Class
6. Generate Study Plan
7. List Classes
0. Exit";

pub struct Menu<'conn, R, W> {
    conn: &'conn mut Connection,
    options: SchedulerOptions,
    input: R,
    output: W,
}

impl<'conn, R: BufRead, W: Write> Menu<'conn, R, W> {
    pub fn new(conn: &'conn mut Connection, options: SchedulerOptions, input: R, output: W) -> Self {
        Self {
            conn,
            options,
            input,
            output,
        }
    }

    /// Runs until the user exits or input ends.
    pub fn run(mut self) -> anyhow::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            match choice.trim() {
                "1" => self.add_student()?,
                "2" => self.add_teacher()?,
                "3" => self.list_students()?,
                "4" => self.list_teachers()?,
                "5" => self.schedule_class()?,
                "6" => self.study_plan()?,
                "7" => self.list_classes()?,
                "0" => break,
                _ => writeln!(self.output, "Invalid choice! Try again.")?,
            }
        }

        writeln!(self.output, "Exiting...")?;
        info!("event=menu_exit module=cli status=ok");
        Ok(())
    }

    // `None` on end of input.
    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn directory(&self) -> DirectoryService<SqliteDirectoryRepository<'_>> {
        DirectoryService::new(SqliteDirectoryRepository::new(&*self.conn))
    }

    fn add_student(&mut self) -> anyhow::Result<()> {
        let Some(name) = self.prompt("Enter student name: ")? else {
            return Ok(());
        };
        let Some(needs) = self.prompt("Enter special learning needs (or leave blank): ")? else {
            return Ok(());
        };

        let id = self.directory().add_student(&name, Some(needs.as_str()))?;
        writeln!(self.output, "Student '{name}' added successfully! (id {id})")?;
        Ok(())
    }

    fn add_teacher(&mut self) -> anyhow::Result<()> {
        let Some(name) = self.prompt("Enter teacher name: ")? else {
            return Ok(());
        };
        let Some(slots) = self.prompt("Enter available slots (e.g., Mon-Fri 10-12, 2-4): ")? else {
            return Ok(());
        };

        let id = self.directory().add_teacher(&name, &slots)?;
        writeln!(self.output, "Teacher '{name}' added successfully! (id {id})")?;
        Ok(())
    }

    fn list_students(&mut self) -> anyhow::Result<()> {
        let students = self.directory().list_students()?;
        if students.is_empty() {
            writeln!(self.output, "No students yet.")?;
        }
        for student in &students {
            writeln!(
                self.output,
                "{}. {} (needs: {})",
                student.id,
                student.name,
                student.special_needs_display()
            )?;
        }
        Ok(())
    }

    fn list_teachers(&mut self) -> anyhow::Result<()> {
        let teachers = self.directory().list_teachers()?;
        if teachers.is_empty() {
            writeln!(self.output, "No teachers yet.")?;
        }
        for teacher in &teachers {
            writeln!(
                self.output,
                "{}. {} (available: {})",
                teacher.id, teacher.name, teacher.available_slots
            )?;
        }
        Ok(())
    }

    fn list_classes(&mut self) -> anyhow::Result<()> {
        let sessions = Scheduler::new(&mut *self.conn, self.options).list_sessions()?;
        if sessions.is_empty() {
            writeln!(self.output, "No classes scheduled.")?;
        }
        for session in &sessions {
            writeln!(
                self.output,
                "{}. {} {} teacher {} student {} - {}",
                session.id,
                session.date,
                session.time,
                session.teacher_id,
                session.student_id,
                session.subject
            )?;
        }
        Ok(())
    }

    fn schedule_class(&mut self) -> anyhow::Result<()> {
        self.list_students()?;
        let Some(student_id) = self.prompt("Enter student ID to schedule: ")? else {
            return Ok(());
        };
        self.list_teachers()?;
        let Some(teacher_id) = self.prompt("Enter teacher ID: ")? else {
            return Ok(());
        };
        let Some(date) = self.prompt("Enter date (YYYY-MM-DD): ")? else {
            return Ok(());
        };
        let Some(time) = self.prompt("Enter time (HH:MM): ")? else {
            return Ok(());
        };
        let Some(subject) = self.prompt("Enter subject: ")? else {
            return Ok(());
        };

        let request = ScheduleRequest::new(student_id, teacher_id, date, time, subject);
        let outcome = Scheduler::new(&mut *self.conn, self.options).schedule(&request);
        match outcome {
            Ok(session) => writeln!(
                self.output,
                "Class scheduled successfully! (session {})",
                session.id
            )?,
            Err(ScheduleError::Conflict(existing)) => writeln!(
                self.output,
                "Conflict detected: Teacher not available at this time (session {} already booked).",
                existing.id
            )?,
            Err(err @ ScheduleError::StorageUnavailable(_)) => return Err(err.into()),
            Err(err) => writeln!(self.output, "Cannot schedule class: {err}")?,
        }
        Ok(())
    }

    fn study_plan(&mut self) -> anyhow::Result<()> {
        self.list_students()?;
        let Some(student_id) = self.prompt("Enter student ID to generate a study plan: ")? else {
            return Ok(());
        };

        let service = StudyPlanService::new(SqliteDirectoryRepository::new(&*self.conn));
        match service.plan_for(&student_id) {
            Ok(plan) => {
                writeln!(self.output, "\n--- Study Plan ---")?;
                write!(self.output, "{}", plan.text)?;
            }
            Err(DirectoryError::StudentNotFound(_)) => writeln!(self.output, "Student not found.")?,
            Err(err @ DirectoryError::InvalidReference(_)) => writeln!(self.output, "{err}")?,
            Err(err @ DirectoryError::StorageUnavailable(_)) => return Err(err.into()),
        }
        Ok(())
    }
}
