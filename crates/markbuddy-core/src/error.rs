//! Gradebook error types.
//!
//! The grading engine itself is infallible; these errors come from the record
//! keeping layer when a caller refers to something that does not exist or
//! supplies a value the gradebook refuses to store.

use thiserror::Error;

/// Errors returned by [`crate::gradebook::Gradebook`] operations.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    /// No semester with this id.
    #[error("semester not found: {0}")]
    SemesterNotFound(u64),

    /// No course with this id.
    #[error("course not found: {0}")]
    CourseNotFound(u64),

    /// No component with this id.
    #[error("component not found: {0}")]
    ComponentNotFound(u64),

    /// Credit hours must be a finite, non-negative number.
    #[error("invalid credit hours for {course}: {credit_hours}")]
    InvalidCreditHours { course: String, credit_hours: f64 },

    /// A directly entered GPA must lie on the 0.0-4.0 scale.
    #[error("invalid GPA for {course}: {gpa}")]
    InvalidGpa { course: String, gpa: f64 },
}

impl RecordError {
    /// Returns `true` if the error is a lookup miss rather than bad input.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RecordError::SemesterNotFound(_)
                | RecordError::CourseNotFound(_)
                | RecordError::ComponentNotFound(_)
        )
    }
}
