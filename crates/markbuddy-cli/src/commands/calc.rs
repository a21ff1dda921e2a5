//! The `markbuddy calc` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use markbuddy_core::gradebook::Gradebook;
use markbuddy_core::parser;
use markbuddy_core::report::{format_grade, Transcript};

use crate::config::load_config_from;

pub fn execute(
    record: Option<PathBuf>,
    format: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let record_path = record.or(config.default_record).context(
        "no record given; pass --record or set default_record in markbuddy.toml",
    )?;
    let format = format.unwrap_or(config.format);
    let precision = config.precision;

    let book = parser::load_record(&record_path)?;
    tracing::debug!(
        semesters = book.semesters().len(),
        "loaded record from {}",
        record_path.display()
    );
    let transcript = Transcript::from_gradebook(&book);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&transcript)?);
        }
        "markdown" | "md" => {
            println!("{}", transcript.to_markdown(precision));
        }
        "text" => print_text(&book, precision),
        other => anyhow::bail!("unknown format: {other} (expected text, json or markdown)"),
    }

    if let Some(path) = output {
        transcript.save_json(&path)?;
        eprintln!("Transcript saved to: {}", path.display());
    }

    Ok(())
}

fn print_text(book: &Gradebook, precision: usize) {
    for semester in book.semesters() {
        println!(
            "Semester: {} (CGPA {}, {} credit hours)",
            semester.name,
            format_grade(semester.cgpa, precision),
            semester.credit_hours()
        );

        if semester.courses.is_empty() {
            println!("  no courses\n");
            continue;
        }

        let mut table = Table::new();
        table.set_header(vec!["Course", "Credits", "Theory %", "Lab %", "Percent", "GPA"]);

        for course in &semester.courses {
            let percent = |p: f64| format!("{p:.1}%");
            let (theory, lab, total) = if course.components.is_empty() {
                ("-".to_string(), "-".to_string(), "-".to_string())
            } else {
                let grade = course.grade();
                (
                    percent(grade.theory_percent),
                    grade.lab_percent.map(percent).unwrap_or_else(|| "-".into()),
                    percent(grade.percent),
                )
            };
            table.add_row(vec![
                Cell::new(&course.name),
                Cell::new(course.credit_hours),
                Cell::new(theory),
                Cell::new(lab),
                Cell::new(total),
                Cell::new(format_grade(course.gpa, precision)),
            ]);
        }

        println!("{table}\n");
    }

    println!(
        "Overall CGPA: {}",
        format_grade(book.overall_cgpa(), precision)
    );
}
