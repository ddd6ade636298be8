//! Interactive menu over stdin/stdout.

use super::bench::{measure, write_report};
use crate::config::Config;
use crate::render::{
    NO_COURSES_MESSAGE, write_detail, write_listing, write_load_summary, write_not_found,
};
use crate::support::resorted_records;
use courseplan_catalog::{Catalog, normalize_key};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const MENU: &str = "\
1. Load Data Structure.
2. Print Course List
3. Print Course.
4. Run Performance Demo (ordered index vs resort, without printing)
5. Print Course List (Legacy - sort every time)
9. Exit
What would you like to do? ";

pub struct MenuSession {
    catalog: Catalog,
    catalog_path: PathBuf,
    bench_iterations: usize,
}

enum Choice {
    Number(i64),
    Invalid,
}

impl MenuSession {
    pub fn new(catalog: Catalog, catalog_path: PathBuf, bench_iterations: usize) -> Self {
        Self {
            catalog,
            catalog_path,
            bench_iterations,
        }
    }

    /// Drive the menu until option 9 or end of input.
    pub fn run(&mut self, mut input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Welcome to the course planner.")?;
        writeln!(out, "Default CSV file: {}", self.catalog_path.display())?;

        loop {
            write!(out, "\n{MENU}")?;
            out.flush()?;
            let Some(line) = read_line(&mut input)? else {
                writeln!(out)?;
                return Ok(());
            };

            match parse_choice(&line) {
                Choice::Invalid => {
                    writeln!(out, "Invalid input. Please enter a number from the menu.")?;
                }
                Choice::Number(1) => self.load(&mut input, out)?,
                Choice::Number(2) => self.list(out, false)?,
                Choice::Number(3) => self.show(&mut input, out)?,
                Choice::Number(4) => self.bench(out)?,
                Choice::Number(5) => self.list(out, true)?,
                Choice::Number(9) => {
                    writeln!(out, "Thank you for using the course planner!")?;
                    return Ok(());
                }
                Choice::Number(other) => {
                    writeln!(out, "{other} is not a valid option. Please try again.")?;
                }
            }
        }
    }

    fn load(&mut self, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<()> {
        write!(
            out,
            "Enter CSV filename (blank keeps {}): ",
            self.catalog_path.display()
        )?;
        out.flush()?;
        if let Some(line) = read_line(input)? {
            let entered = line.trim();
            if !entered.is_empty() {
                self.catalog_path = PathBuf::from(entered);
            }
        }
        writeln!(out)?;

        match self.catalog.load_path(&self.catalog_path) {
            Ok(summary) => write_load_summary(out, &summary),
            Err(e) => writeln!(
                out,
                "Failed to load {}: {e}",
                self.catalog_path.display()
            ),
        }
    }

    fn list(&self, out: &mut impl Write, resorted: bool) -> io::Result<()> {
        writeln!(out)?;
        if !self.catalog.is_loaded() {
            return writeln!(out, "{NO_COURSES_MESSAGE}");
        }
        if resorted {
            write_listing(out, resorted_records(self.catalog.store()), true)
        } else {
            write_listing(out, self.catalog.ordered_records(), false)
        }
    }

    fn show(&mut self, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<()> {
        write!(out, "What course do you want to know about? ")?;
        out.flush()?;
        let key = normalize_key(&read_line(input)?.unwrap_or_default());
        writeln!(out)?;

        if !self.catalog.is_loaded() {
            return writeln!(out, "{NO_COURSES_MESSAGE}");
        }
        match self.catalog.course_detail(&key) {
            Some(detail) => write_detail(out, &detail),
            None => write_not_found(out, &key),
        }
    }

    fn bench(&mut self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        match measure(&mut self.catalog, &self.catalog_path, self.bench_iterations) {
            Ok(report) => write_report(out, &report),
            Err(e) => {
                tracing::warn!(error = %e, "performance demo could not load the catalog");
                writeln!(out, "Performance demo aborted, data did not load.")
            }
        }
    }
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn parse_choice(line: &str) -> Choice {
    line.trim()
        .parse::<i64>()
        .map_or(Choice::Invalid, Choice::Number)
}

pub fn run(catalog: Option<String>, config: &Config) {
    let mut session = MenuSession::new(
        Catalog::new(config.memo_policy),
        config.catalog_path(catalog.as_deref()),
        config.bench_iterations,
    );
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    if let Err(e) = session.run(stdin.lock(), &mut stdout) {
        eprintln!("error: menu I/O failed: {e}");
        std::process::exit(1);
    }
}
