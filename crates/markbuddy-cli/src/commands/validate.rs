//! The `markbuddy validate` command.

use std::path::PathBuf;

use anyhow::Result;

use markbuddy_core::parser;

pub fn execute(record_path: PathBuf) -> Result<()> {
    let books = if record_path.is_dir() {
        parser::load_record_directory(&record_path)?
    } else {
        vec![(
            record_path.display().to_string(),
            parser::load_record(&record_path)?,
        )]
    };

    let mut total_warnings = 0;

    for (source, book) in &books {
        let course_count = book.all_courses().count();
        println!(
            "Record: {source} ({} semester(s), {course_count} course(s))",
            book.semesters().len()
        );

        let warnings = parser::validate_record(book);
        for w in &warnings {
            let prefix = match &w.course {
                Some(course) => format!("  [{} / {course}]", w.semester),
                None => format!("  [{}]", w.semester),
            };
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All records valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
