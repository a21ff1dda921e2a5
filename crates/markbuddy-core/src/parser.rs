//! TOML record parser.
//!
//! Loads gradebooks from hand-written TOML record files (or JSON snapshots)
//! and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::gradebook::Gradebook;
use crate::model::{Component, ComponentKind, Course, ExamType, Semester};

/// Intermediate TOML structure for parsing record files.
#[derive(Debug, Deserialize)]
struct TomlRecordFile {
    #[serde(default)]
    semesters: Vec<TomlSemester>,
}

#[derive(Debug, Deserialize)]
struct TomlSemester {
    name: String,
    #[serde(default)]
    courses: Vec<TomlCourse>,
}

#[derive(Debug, Deserialize)]
struct TomlCourse {
    name: String,
    credit_hours: f64,
    #[serde(default)]
    has_lab: bool,
    /// Directly entered GPA for courses tracked without components.
    #[serde(default)]
    gpa: Option<f64>,
    #[serde(default)]
    quizzes: Vec<TomlMarks>,
    #[serde(default)]
    assignments: Vec<TomlAssignment>,
    #[serde(default)]
    exams: Vec<TomlExam>,
}

#[derive(Debug, Deserialize)]
struct TomlMarks {
    obtained: f64,
    total: f64,
}

#[derive(Debug, Deserialize)]
struct TomlAssignment {
    obtained: f64,
    total: f64,
    #[serde(default)]
    lab: bool,
}

#[derive(Debug, Deserialize)]
struct TomlExam {
    #[serde(rename = "type")]
    exam_type: String,
    obtained: f64,
    total: f64,
}

/// Parse a single TOML record file into a `Gradebook`.
pub fn parse_record(path: &Path) -> Result<Gradebook> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read record file: {}", path.display()))?;

    parse_record_str(&content, path)
}

/// Parse a TOML string into a `Gradebook` (useful for testing).
pub fn parse_record_str(content: &str, source_path: &Path) -> Result<Gradebook> {
    let parsed: TomlRecordFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let semesters = parsed
        .semesters
        .into_iter()
        .map(|s| {
            let courses = s
                .courses
                .into_iter()
                .map(convert_course)
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("in semester '{}'", s.name))?;
            Ok(Semester {
                courses,
                ..Semester::new(s.name)
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Gradebook::from_semesters(semesters))
}

fn convert_course(c: TomlCourse) -> Result<Course> {
    let mut components: Vec<Component> = c
        .quizzes
        .into_iter()
        .map(|q| Component::quiz(q.obtained, q.total))
        .collect();

    components.extend(
        c.assignments
            .into_iter()
            .map(|a| Component::assignment(a.obtained, a.total, a.lab)),
    );

    for exam in c.exams {
        let exam_type: ExamType = exam
            .exam_type
            .parse()
            .map_err(|e: String| anyhow::anyhow!("course '{}': {}", c.name, e))?;
        components.push(Component::exam(exam_type, exam.obtained, exam.total));
    }

    // A directly entered GPA only stands for courses with nothing to grade.
    let gpa = if components.is_empty() { c.gpa } else { None };

    Ok(Course {
        gpa,
        components,
        ..Course::new(c.name, c.credit_hours, c.has_lab)
    })
}

/// Load a record from either a TOML record file or a JSON gradebook snapshot.
pub fn load_record(path: &Path) -> Result<Gradebook> {
    if path.extension().is_some_and(|ext| ext == "json") {
        Gradebook::load_json(path)
    } else {
        parse_record(path)
    }
}

/// Recursively load all `.toml` record files from a directory.
pub fn load_record_directory(dir: &Path) -> Result<Vec<(String, Gradebook)>> {
    let mut books = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            books.extend(load_record_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_record(&path) {
                Ok(book) => books.push((path.display().to_string(), book)),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(books)
}

/// A warning from record validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The semester the warning concerns.
    pub semester: String,
    /// The course name (if applicable).
    pub course: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a gradebook for input the grading engine will not reject but
/// that is probably a mistake.
pub fn validate_record(book: &Gradebook) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for semester in book.semesters() {
        let warn = |course: Option<&Course>, message: String| ValidationWarning {
            semester: semester.name.clone(),
            course: course.map(|c| c.name.clone()),
            message,
        };

        if semester.courses.is_empty() {
            warnings.push(warn(None, "semester has no courses".into()));
        }

        let mut seen_names = HashSet::new();
        for course in &semester.courses {
            if !seen_names.insert(course.name.as_str()) {
                warnings.push(warn(
                    Some(course),
                    format!("duplicate course name: {}", course.name),
                ));
            }

            if course.credit_hours <= 0.0 {
                warnings.push(warn(
                    Some(course),
                    format!(
                        "credit hours must be positive, got {}",
                        course.credit_hours
                    ),
                ));
            }

            let mut seen_exams = HashSet::new();
            for component in &course.components {
                if !component.is_scored() {
                    warnings.push(warn(
                        Some(course),
                        format!(
                            "{} has total marks {} and will be ignored",
                            component.kind, component.total_marks
                        ),
                    ));
                } else if component.obtained_marks < 0.0
                    || component.obtained_marks > component.total_marks
                {
                    warnings.push(warn(
                        Some(course),
                        format!(
                            "{} marks {} are outside 0..={}",
                            component.kind, component.obtained_marks, component.total_marks
                        ),
                    ));
                }

                if let ComponentKind::Exam { exam_type } = component.kind {
                    if !seen_exams.insert(exam_type) {
                        warnings.push(warn(
                            Some(course),
                            format!("duplicate {exam_type} exam; only the first is graded"),
                        ));
                    }
                }

                if component.kind.is_lab() && !course.has_lab {
                    warnings.push(warn(
                        Some(course),
                        format!(
                            "{} recorded but course has no lab; it will be ignored",
                            component.kind
                        ),
                    ));
                }
            }
        }
    }

    warnings
}
