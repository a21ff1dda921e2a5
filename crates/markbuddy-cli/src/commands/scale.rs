//! The `markbuddy scale` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use markbuddy_core::grading::{FAILING_GPA, GRADE_SCALE};

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Percent", "GPA"]);

    let mut upper: Option<f64> = None;
    for band in &GRADE_SCALE {
        let range = match upper {
            Some(up) => format!("{} - <{}", band.min_percent, up),
            None => format!("{}+", band.min_percent),
        };
        table.add_row(vec![Cell::new(range), Cell::new(format!("{:.2}", band.gpa))]);
        upper = Some(band.min_percent);
    }

    let lowest = GRADE_SCALE.last().map(|b| b.min_percent).unwrap_or(0.0);
    table.add_row(vec![
        Cell::new(format!("<{lowest}")),
        Cell::new(format!("{FAILING_GPA:.2}")),
    ]);

    println!("{table}");
    Ok(())
}
