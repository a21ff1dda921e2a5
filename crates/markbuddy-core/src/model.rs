//! Core data model types for markbuddy.
//!
//! Semesters own courses and courses own their scored components. The cached
//! `gpa`/`cgpa` fields are `None` until the grading engine has filled them in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four exam slots a course can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    Midterm,
    Terminal,
    LabMidterm,
    LabTerminal,
}

impl ExamType {
    /// Returns `true` for the lab exam slots.
    pub fn is_lab(&self) -> bool {
        matches!(self, ExamType::LabMidterm | ExamType::LabTerminal)
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamType::Midterm => write!(f, "midterm"),
            ExamType::Terminal => write!(f, "terminal"),
            ExamType::LabMidterm => write!(f, "lab_midterm"),
            ExamType::LabTerminal => write!(f, "lab_terminal"),
        }
    }
}

impl FromStr for ExamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "midterm" | "mid" => Ok(ExamType::Midterm),
            "terminal" | "final" => Ok(ExamType::Terminal),
            "lab_midterm" | "lab_mid" => Ok(ExamType::LabMidterm),
            "lab_terminal" | "lab_final" => Ok(ExamType::LabTerminal),
            other => Err(format!("unknown exam type: {other}")),
        }
    }
}

/// What kind of coursework a component is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentKind {
    Quiz,
    Assignment {
        #[serde(default)]
        is_lab: bool,
    },
    Exam {
        exam_type: ExamType,
    },
}

impl ComponentKind {
    /// Returns `true` if the component belongs to the lab portion of a course.
    pub fn is_lab(&self) -> bool {
        match self {
            ComponentKind::Quiz => false,
            ComponentKind::Assignment { is_lab } => *is_lab,
            ComponentKind::Exam { exam_type } => exam_type.is_lab(),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Quiz => write!(f, "quiz"),
            ComponentKind::Assignment { is_lab: false } => write!(f, "assignment"),
            ComponentKind::Assignment { is_lab: true } => write!(f, "lab assignment"),
            ComponentKind::Exam { exam_type } => write!(f, "{exam_type} exam"),
        }
    }
}

/// A single scored piece of coursework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Identifier assigned by the gradebook.
    #[serde(default)]
    pub id: u64,
    /// Quiz, assignment or exam.
    #[serde(flatten)]
    pub kind: ComponentKind,
    /// Marks the student obtained.
    pub obtained_marks: f64,
    /// Marks available. Non-positive totals are treated as "not scored".
    pub total_marks: f64,
}

impl Component {
    pub fn new(kind: ComponentKind, obtained_marks: f64, total_marks: f64) -> Self {
        Self {
            id: 0,
            kind,
            obtained_marks,
            total_marks,
        }
    }

    pub fn quiz(obtained_marks: f64, total_marks: f64) -> Self {
        Self::new(ComponentKind::Quiz, obtained_marks, total_marks)
    }

    pub fn assignment(obtained_marks: f64, total_marks: f64, is_lab: bool) -> Self {
        Self::new(
            ComponentKind::Assignment { is_lab },
            obtained_marks,
            total_marks,
        )
    }

    pub fn exam(exam_type: ExamType, obtained_marks: f64, total_marks: f64) -> Self {
        Self::new(ComponentKind::Exam { exam_type }, obtained_marks, total_marks)
    }

    /// Whether this component carries a usable score.
    ///
    /// `NaN` totals fail the comparison and are therefore unscored as well.
    pub fn is_scored(&self) -> bool {
        self.total_marks > 0.0
    }

    /// Obtained over total, or `None` when the component is unscored.
    ///
    /// Ratios outside `[0, 1]` are passed through unchanged.
    pub fn ratio(&self) -> Option<f64> {
        if self.is_scored() {
            Some(self.obtained_marks / self.total_marks)
        } else {
            None
        }
    }
}

/// A course and the components that belong to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    /// Credit hours used to weight the course in its semester CGPA.
    pub credit_hours: f64,
    /// Whether the course has a lab portion.
    #[serde(default)]
    pub has_lab: bool,
    /// Cached GPA; `None` means it still needs computing.
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Course {
    pub fn new(name: impl Into<String>, credit_hours: f64, has_lab: bool) -> Self {
        Self {
            id: 0,
            name: name.into(),
            credit_hours,
            has_lab,
            gpa: None,
            components: Vec::new(),
        }
    }

    /// Iterate over the quizzes of this course.
    pub fn quizzes(&self) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .filter(|c| matches!(c.kind, ComponentKind::Quiz))
    }

    /// Iterate over the assignments of this course, theory and lab alike.
    pub fn assignments(&self) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .filter(|c| matches!(c.kind, ComponentKind::Assignment { .. }))
    }

    /// Iterate over the exams of this course.
    pub fn exams(&self) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .filter(|c| matches!(c.kind, ComponentKind::Exam { .. }))
    }

    /// Drop the cached GPA.
    pub fn invalidate(&mut self) {
        self.gpa = None;
    }
}

/// A semester and the courses taken in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    /// Cached CGPA; `None` means it still needs computing.
    #[serde(default)]
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Semester {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            cgpa: None,
            courses: Vec::new(),
        }
    }

    /// Sum of the credit hours of every course in the semester.
    pub fn credit_hours(&self) -> f64 {
        self.courses.iter().map(|c| c.credit_hours).sum()
    }

    /// Drop the cached CGPA.
    pub fn invalidate(&mut self) {
        self.cgpa = None;
    }
}
