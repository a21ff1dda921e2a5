//! Course GPA calculation.
//!
//! A course's percentage is built from fixed weights:
//!
//! | Portion | Component            | Weight |
//! |---------|----------------------|--------|
//! | theory  | quizzes (split)      | 0.15   |
//! | theory  | assignments (split)  | 0.10   |
//! | theory  | midterm              | 0.25   |
//! | theory  | terminal             | 0.50   |
//! | lab     | lab assignments      | 0.25   |
//! | lab     | lab midterm          | 0.25   |
//! | lab     | lab terminal         | 0.50   |
//!
//! Courses with a lab blend the two portions 75/25. The final percentage is
//! mapped to a GPA through [`GRADE_SCALE`]. Missing components forfeit their
//! weight; nothing is redistributed.

use serde::{Deserialize, Serialize};

use crate::model::{Component, ComponentKind, Course, ExamType};

pub const THEORY_QUIZ_WEIGHT: f64 = 0.15;
pub const THEORY_ASSIGNMENT_WEIGHT: f64 = 0.10;
pub const THEORY_MIDTERM_WEIGHT: f64 = 0.25;
pub const THEORY_TERMINAL_WEIGHT: f64 = 0.50;

pub const LAB_ASSIGNMENT_WEIGHT: f64 = 0.25;
pub const LAB_MIDTERM_WEIGHT: f64 = 0.25;
pub const LAB_TERMINAL_WEIGHT: f64 = 0.50;

pub const THEORY_PORTION_WEIGHT: f64 = 0.75;
pub const LAB_PORTION_WEIGHT: f64 = 0.25;

/// Lowest percentage that earns a given GPA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeBand {
    pub min_percent: f64,
    pub gpa: f64,
}

/// GPA awarded below the lowest band.
pub const FAILING_GPA: f64 = 0.0;

/// Grade boundaries, highest threshold first.
pub const GRADE_SCALE: [GradeBand; 8] = [
    GradeBand { min_percent: 85.0, gpa: 4.0 },
    GradeBand { min_percent: 80.0, gpa: 3.7 },
    GradeBand { min_percent: 75.0, gpa: 3.3 },
    GradeBand { min_percent: 70.0, gpa: 3.0 },
    GradeBand { min_percent: 65.0, gpa: 2.7 },
    GradeBand { min_percent: 60.0, gpa: 2.3 },
    GradeBand { min_percent: 55.0, gpa: 2.0 },
    GradeBand { min_percent: 50.0, gpa: 1.7 },
];

/// Map a percentage to a GPA using [`GRADE_SCALE`].
///
/// No interpolation: the first band whose threshold is met wins. Anything
/// below 50 (including `NaN`) maps to [`FAILING_GPA`].
pub fn marks_to_gpa(percent: f64) -> f64 {
    GRADE_SCALE
        .iter()
        .find(|band| percent >= band.min_percent)
        .map(|band| band.gpa)
        .unwrap_or(FAILING_GPA)
}

/// The outcome of grading one course.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourseGrade {
    /// Weighted theory percentage, 0-100 for in-range input.
    pub theory_percent: f64,
    /// Weighted lab percentage; `None` for courses without a lab.
    pub lab_percent: Option<f64>,
    /// The percentage that was mapped to a GPA.
    pub percent: f64,
    pub gpa: f64,
}

/// Scored ratios sorted into their weight slots.
#[derive(Debug, Default)]
struct Slots {
    quizzes: Vec<f64>,
    theory_assignments: Vec<f64>,
    lab_assignments: Vec<f64>,
    midterm: Option<f64>,
    terminal: Option<f64>,
    lab_midterm: Option<f64>,
    lab_terminal: Option<f64>,
}

impl Slots {
    fn collect(components: &[Component]) -> Self {
        let mut slots = Slots::default();
        for component in components {
            // Unscored components are absent: they neither score nor count.
            let Some(ratio) = component.ratio() else {
                continue;
            };
            match component.kind {
                ComponentKind::Quiz => slots.quizzes.push(ratio),
                ComponentKind::Assignment { is_lab: false } => {
                    slots.theory_assignments.push(ratio)
                }
                ComponentKind::Assignment { is_lab: true } => slots.lab_assignments.push(ratio),
                ComponentKind::Exam { exam_type } => {
                    let slot = match exam_type {
                        ExamType::Midterm => &mut slots.midterm,
                        ExamType::Terminal => &mut slots.terminal,
                        ExamType::LabMidterm => &mut slots.lab_midterm,
                        ExamType::LabTerminal => &mut slots.lab_terminal,
                    };
                    // First scored exam of a type wins.
                    slot.get_or_insert(ratio);
                }
            }
        }
        slots
    }
}

/// Split `weight` evenly over `ratios`; an empty slot forfeits the weight.
fn split_evenly(ratios: &[f64], weight: f64) -> f64 {
    if ratios.is_empty() {
        return 0.0;
    }
    let per_item = weight / ratios.len() as f64;
    ratios.iter().map(|ratio| ratio * per_item).sum()
}

fn single(ratio: Option<f64>, weight: f64) -> f64 {
    ratio.map_or(0.0, |r| r * weight)
}

/// Grade a course from its components.
///
/// Obtained marks are not clamped to `[0, total]`; out-of-range input gives a
/// mathematically consistent, out-of-range percentage rather than an error.
pub fn course_grade(components: &[Component], has_lab: bool) -> CourseGrade {
    let slots = Slots::collect(components);

    let theory = split_evenly(&slots.quizzes, THEORY_QUIZ_WEIGHT)
        + split_evenly(&slots.theory_assignments, THEORY_ASSIGNMENT_WEIGHT)
        + single(slots.midterm, THEORY_MIDTERM_WEIGHT)
        + single(slots.terminal, THEORY_TERMINAL_WEIGHT);
    let theory_percent = theory * 100.0;

    if !has_lab {
        return CourseGrade {
            theory_percent,
            lab_percent: None,
            percent: theory_percent,
            gpa: marks_to_gpa(theory_percent),
        };
    }

    let lab = split_evenly(&slots.lab_assignments, LAB_ASSIGNMENT_WEIGHT)
        + single(slots.lab_midterm, LAB_MIDTERM_WEIGHT)
        + single(slots.lab_terminal, LAB_TERMINAL_WEIGHT);
    let lab_percent = lab * 100.0;

    let percent = theory_percent * THEORY_PORTION_WEIGHT + lab_percent * LAB_PORTION_WEIGHT;
    CourseGrade {
        theory_percent,
        lab_percent: Some(lab_percent),
        percent,
        gpa: marks_to_gpa(percent),
    }
}

/// Shorthand for `course_grade(components, has_lab).gpa`.
pub fn course_gpa(components: &[Component], has_lab: bool) -> f64 {
    course_grade(components, has_lab).gpa
}

impl Course {
    /// Grade this course from its current components.
    pub fn grade(&self) -> CourseGrade {
        course_grade(&self.components, self.has_lab)
    }

    /// Recompute and cache the GPA, returning it.
    pub fn refresh_gpa(&mut self) -> f64 {
        let gpa = self.grade().gpa;
        self.gpa = Some(gpa);
        gpa
    }
}
