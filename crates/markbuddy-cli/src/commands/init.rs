//! The `markbuddy init` command.

use std::path::Path;

use anyhow::{Context, Result};

/// Starter files written relative to the current directory.
const STARTER_FILES: [(&str, &str); 2] = [
    ("markbuddy.toml", SAMPLE_CONFIG),
    ("records/example.toml", EXAMPLE_RECORD),
];

pub fn execute() -> Result<()> {
    for (path, contents) in STARTER_FILES {
        if write_starter(Path::new(path), contents)? {
            println!("Created {path}");
        } else {
            println!("{path} already exists, skipping.");
        }
    }

    println!("\nEnter your marks in records/example.toml, then:");
    println!("  markbuddy validate --record records/example.toml");
    println!("  markbuddy calc");

    Ok(())
}

/// Write `contents` to `path` unless it already exists. Returns `true` if written.
fn write_starter(path: &Path, contents: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

const SAMPLE_CONFIG: &str = r#"# markbuddy configuration

default_record = "records/example.toml"
format = "text"
precision = 2
"#;

const EXAMPLE_RECORD: &str = r#"# Each course is graded from its components:
#   theory: quizzes 15%, assignments 10%, midterm 25%, terminal 50%
#   lab:    lab assignments 25%, lab midterm 25%, lab terminal 50%
# Courses with a lab blend theory and lab 75/25.

[[semesters]]
name = "First Semester"

[[semesters.courses]]
name = "Programming Fundamentals"
credit_hours = 4
has_lab = true
quizzes = [
    { obtained = 8, total = 10 },
    { obtained = 9, total = 10 },
]
assignments = [
    { obtained = 18, total = 20 },
    { obtained = 9, total = 10, lab = true },
]
exams = [
    { type = "midterm", obtained = 35, total = 50 },
    { type = "terminal", obtained = 80, total = 100 },
    { type = "lab_midterm", obtained = 22, total = 25 },
    { type = "lab_terminal", obtained = 42, total = 50 },
]

[[semesters.courses]]
name = "Calculus"
credit_hours = 3
quizzes = [{ obtained = 12, total = 15 }]
exams = [{ type = "midterm", obtained = 60, total = 100 }]

[[semesters.courses]]
# A course whose GPA you already know needs no components.
name = "Communication Skills"
credit_hours = 2
gpa = 3.7
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_creates_parent_and_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records").join("example.toml");

        assert!(write_starter(&path, "first").unwrap());
        assert!(!write_starter(&path, "second").unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");
    }

    #[test]
    fn starter_record_parses_and_grades() {
        let book =
            markbuddy_core::parser::parse_record_str(EXAMPLE_RECORD, Path::new("example.toml"))
                .unwrap();
        assert_eq!(book.semesters()[0].courses.len(), 3);
        assert!(book.overall_cgpa().is_some());
        assert!(markbuddy_core::parser::validate_record(&book).is_empty());
    }
}
