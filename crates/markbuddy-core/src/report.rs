//! Transcript report types with JSON persistence and markdown output.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gradebook::Gradebook;
use crate::model::{Course, Semester};

/// A snapshot of every derived grade in a gradebook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// When the transcript was generated.
    pub generated_at: DateTime<Utc>,
    /// Per-semester summaries, in gradebook order.
    pub semesters: Vec<SemesterSummary>,
    /// Mean of the semester CGPAs; `None` if no semester has one.
    pub overall_cgpa: Option<f64>,
}

/// Summary of a semester.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemesterSummary {
    pub id: u64,
    pub name: String,
    pub credit_hours: f64,
    pub cgpa: Option<f64>,
    pub courses: Vec<CourseSummary>,
}

/// Summary of a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: u64,
    pub name: String,
    pub credit_hours: f64,
    pub has_lab: bool,
    pub component_count: usize,
    /// Weighted percentage; `None` for directly graded courses.
    pub percent: Option<f64>,
    pub gpa: Option<f64>,
}

impl CourseSummary {
    fn from_course(course: &Course) -> Self {
        let percent = if course.components.is_empty() {
            None
        } else {
            Some(course.grade().percent)
        };
        Self {
            id: course.id,
            name: course.name.clone(),
            credit_hours: course.credit_hours,
            has_lab: course.has_lab,
            component_count: course.components.len(),
            percent,
            gpa: course.gpa,
        }
    }
}

impl SemesterSummary {
    fn from_semester(semester: &Semester) -> Self {
        Self {
            id: semester.id,
            name: semester.name.clone(),
            credit_hours: semester.credit_hours(),
            cgpa: semester.cgpa,
            courses: semester.courses.iter().map(CourseSummary::from_course).collect(),
        }
    }
}

/// Format an optional grade the way the transcript displays it.
pub fn format_grade(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "N/A".to_string(),
    }
}

impl Transcript {
    /// Build a transcript from the cached grades of a gradebook.
    pub fn from_gradebook(book: &Gradebook) -> Self {
        Self {
            generated_at: Utc::now(),
            semesters: book
                .semesters()
                .iter()
                .map(SemesterSummary::from_semester)
                .collect(),
            overall_cgpa: book.overall_cgpa(),
        }
    }

    /// Save the transcript as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize transcript")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write transcript to {}", path.display()))?;
        Ok(())
    }

    /// Load a transcript from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read transcript from {}", path.display()))?;
        let transcript: Transcript =
            serde_json::from_str(&content).context("failed to parse transcript JSON")?;
        Ok(transcript)
    }

    /// Format the transcript as markdown.
    pub fn to_markdown(&self, precision: usize) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Overall CGPA:** {}\n\n",
            format_grade(self.overall_cgpa, precision)
        ));

        for semester in &self.semesters {
            md.push_str(&format!(
                "### {} (CGPA {})\n\n",
                semester.name,
                format_grade(semester.cgpa, precision)
            ));

            if semester.courses.is_empty() {
                md.push_str("_No courses._\n\n");
                continue;
            }

            md.push_str("| Course | Credits | Lab | Percent | GPA |\n");
            md.push_str("|--------|---------|-----|---------|-----|\n");
            for c in &semester.courses {
                let percent = c
                    .percent
                    .map(|p| format!("{p:.1}%"))
                    .unwrap_or_else(|| "-".to_string());
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    c.name,
                    c.credit_hours,
                    if c.has_lab { "yes" } else { "no" },
                    percent,
                    format_grade(c.gpa, precision)
                ));
            }
            md.push('\n');
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradebook::CourseDetails;
    use crate::model::{Component, ExamType};

    fn make_book() -> Gradebook {
        let mut book = Gradebook::new();
        let fall = book.add_semester("Fall");
        book.add_course(
            fall,
            CourseDetails::new("Compilers", 3.0, false),
            vec![
                Component::quiz(15.0, 20.0),
                Component::exam(ExamType::Midterm, 80.0, 100.0),
                Component::exam(ExamType::Terminal, 90.0, 100.0),
            ],
        )
        .unwrap();
        book.add_graded_course(fall, CourseDetails::new("Drawing", 1.0, false), 4.0)
            .unwrap();
        book.add_semester("Spring");
        book
    }

    #[test]
    fn summarises_gradebook() {
        let transcript = Transcript::from_gradebook(&make_book());
        assert_eq!(transcript.semesters.len(), 2);
        let fall = &transcript.semesters[0];
        assert_eq!(fall.credit_hours, 4.0);
        assert_eq!(fall.courses[0].gpa, Some(3.3));
        assert!(fall.courses[0].percent.is_some());
        assert_eq!(fall.courses[1].percent, None);
        // The empty spring semester has no CGPA yet, so only fall counts.
        assert_eq!(transcript.overall_cgpa, fall.cgpa);
    }

    #[test]
    fn json_roundtrip() {
        let transcript = Transcript::from_gradebook(&make_book());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/transcript.json");

        transcript.save_json(&path).unwrap();
        let loaded = Transcript::load_json(&path).unwrap();

        assert_eq!(loaded.semesters.len(), 2);
        assert_eq!(loaded.semesters[0].courses[1].name, "Drawing");
    }

    #[test]
    fn markdown_output() {
        let md = Transcript::from_gradebook(&make_book()).to_markdown(2);
        assert!(md.contains("### Fall"));
        assert!(md.contains("| Compilers | 3 | no | 76."));
        assert!(md.contains("% | 3.30 |"));
        assert!(md.contains("| Drawing | 1 | no | - | 4.00 |"));
        assert!(md.contains("### Spring (CGPA N/A)"));
        assert!(md.contains("_No courses._"));
    }

    #[test]
    fn grade_formatting() {
        assert_eq!(format_grade(Some(3.456), 2), "3.46");
        assert_eq!(format_grade(Some(3.0), 1), "3.0");
        assert_eq!(format_grade(None, 2), "N/A");
    }
}
