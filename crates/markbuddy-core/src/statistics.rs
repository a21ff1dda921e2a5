//! CGPA aggregation.
//!
//! Semester CGPA is a credit-hour weighted mean of course GPAs where an
//! ungraded course counts as 0.0. Overall CGPA is a plain mean of semester
//! CGPAs where an ungraded semester is left out entirely. The two paths are
//! kept separate so each behaviour can be tested on its own.

use crate::model::{Course, Semester};

/// Weighted mean of `(value, weight)` pairs.
///
/// Returns `None` when the total weight is not positive.
pub fn weighted_mean<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (weighted_sum, total_weight) = pairs
        .into_iter()
        .fold((0.0f64, 0.0f64), |(sum, total), (value, weight)| {
            (sum + value * weight, total + weight)
        });

    if total_weight > 0.0 {
        Some(weighted_sum / total_weight)
    } else {
        None
    }
}

/// Credit-hour weighted CGPA of a semester's courses.
///
/// Courses without a GPA contribute 0.0 but still count their credit hours.
/// An empty list, or one whose credit hours sum to zero, yields 0.0.
pub fn semester_cgpa(courses: &[Course]) -> f64 {
    weighted_mean(
        courses
            .iter()
            .map(|course| (course.gpa.unwrap_or(0.0), course.credit_hours)),
    )
    .unwrap_or(0.0)
}

/// Unweighted mean CGPA across semesters.
///
/// Semesters without a CGPA are skipped. Returns `None` if no semester has one.
pub fn overall_cgpa(semesters: &[Semester]) -> Option<f64> {
    weighted_mean(
        semesters
            .iter()
            .filter_map(|semester| semester.cgpa)
            .map(|cgpa| (cgpa, 1.0)),
    )
}

impl Semester {
    /// Recompute and cache the CGPA from the cached course GPAs.
    pub fn refresh_cgpa(&mut self) -> f64 {
        let cgpa = semester_cgpa(&self.courses);
        self.cgpa = Some(cgpa);
        cgpa
    }
}
