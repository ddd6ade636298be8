//! Text presentation for listings, course details and load summaries.

use courseplan_catalog::{CourseDetail, CourseRecord, LoadSummary};
use std::io::{self, Write};

pub const COURSE_NUMBER_WIDTH: usize = 15;
pub const COURSE_NAME_WIDTH: usize = 50;
pub const NO_COURSES_MESSAGE: &str = "No courses available. Load data first.";

const LISTING_HEADER: &str = "Here is a sample schedule:";
const RESORT_LISTING_HEADER: &str = "Here is a sample schedule (Legacy - sort every time):";

/// Two-column course table.
///
/// Only the number column is padded to a fixed width. The name column is
/// written as-is instead of being padded to `COURSE_NAME_WIDTH`, so rows
/// carry no trailing whitespace; the width still sizes the dashed rule.
pub fn write_listing<'a>(
    out: &mut impl Write,
    records: impl IntoIterator<Item = &'a CourseRecord>,
    resorted: bool,
) -> io::Result<()> {
    let header = if resorted {
        RESORT_LISTING_HEADER
    } else {
        LISTING_HEADER
    };
    writeln!(out, "{header}")?;
    writeln!(
        out,
        "{:<width$}{}",
        "Course Number",
        "Course Name",
        width = COURSE_NUMBER_WIDTH
    )?;
    writeln!(out, "{}", "-".repeat(COURSE_NUMBER_WIDTH + COURSE_NAME_WIDTH))?;
    for record in records {
        writeln!(
            out,
            "{:<width$}{}",
            record.key,
            record.title,
            width = COURSE_NUMBER_WIDTH
        )?;
    }
    Ok(())
}

/// Course line, direct prerequisites, then the full chain or an inline
/// cycle error.
pub fn write_detail(out: &mut impl Write, detail: &CourseDetail) -> io::Result<()> {
    writeln!(out, "{}, {}", detail.record.key, detail.record.title)?;
    writeln!(out, "Direct Prerequisites: {}", join_or_none(detail.direct()))?;
    match &detail.closure {
        Ok(chain) => writeln!(out, "Full Prerequisite Chain: {}", join_or_none(chain)),
        Err(cycle) => writeln!(out, "Full Prerequisite Chain: ERROR ({cycle})"),
    }
}

pub fn write_not_found(out: &mut impl Write, key: &str) -> io::Result<()> {
    writeln!(out, "Course not found: {key}")
}

pub fn write_load_summary(out: &mut impl Write, summary: &LoadSummary) -> io::Result<()> {
    if !summary.dangling.is_empty() {
        writeln!(
            out,
            "Note: {} prerequisite reference(s) do not match a loaded course ID.",
            summary.dangling.len()
        )?;
    }
    writeln!(
        out,
        "{} course(s) loaded successfully. ({} line(s) skipped)",
        summary.loaded, summary.skipped
    )
}

fn join_or_none(keys: &[String]) -> String {
    if keys.is_empty() {
        "None".to_string()
    } else {
        keys.join(", ")
    }
}
