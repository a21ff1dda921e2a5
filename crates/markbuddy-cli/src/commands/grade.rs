//! The `markbuddy grade` command.

use anyhow::Result;

use markbuddy_core::grading::marks_to_gpa;

pub fn execute(percent: f64) -> Result<()> {
    anyhow::ensure!(percent.is_finite(), "percent must be a finite number");
    println!("{percent}% -> GPA {:.2}", marks_to_gpa(percent));
    Ok(())
}
