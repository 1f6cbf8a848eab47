use super::Problem;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;

/// Terminal reporter with colored output, grouped by file
pub struct TerminalReporter {
    /// Problems before the top-N cut, for the summary line
    total: usize,
}

impl TerminalReporter {
    pub fn new(total: usize) -> Self {
        Self { total }
    }

    pub fn report<W: Write + ?Sized>(&self, problems: &[Problem], out: &mut W) -> io::Result<()> {
        if problems.is_empty() {
            writeln!(out, "{}", "No symbols to report.".green().bold())?;
            return Ok(());
        }

        // Group by file, keeping the presentation order inside each group
        let mut by_file: BTreeMap<PathBuf, Vec<&Problem>> = BTreeMap::new();
        for problem in problems {
            by_file
                .entry(problem.location.file.clone())
                .or_default()
                .push(problem);
        }

        writeln!(out)?;
        for (file, items) in &by_file {
            writeln!(out, "{}", file.display().to_string().cyan().bold())?;
            for item in items {
                self.print_item(item, out)?;
            }
            writeln!(out)?;
        }

        self.print_summary(problems, out)
    }

    fn print_item<W: Write + ?Sized>(&self, item: &Problem, out: &mut W) -> io::Result<()> {
        let location = format!("{}:{}", item.location.line, item.location.column);
        let count = match item.count {
            0 => format!("{:>4}", item.count).red().bold(),
            1 => format!("{:>4}", item.count).yellow().bold(),
            _ => format!("{:>4}", item.count).green().bold(),
        };

        writeln!(
            out,
            "  {} {} {} {}",
            count,
            location.dimmed(),
            item.kind.display_name().dimmed(),
            item.text
        )
    }

    fn print_summary<W: Write + ?Sized>(&self, problems: &[Problem], out: &mut W) -> io::Result<()> {
        let unused = problems.iter().filter(|p| p.count == 0).count();

        writeln!(out, "{}", "─".repeat(60).dimmed())?;
        let mut parts = vec![format!("{} shown", problems.len())];
        if self.total > problems.len() {
            parts.push(format!("{} total", self.total));
        }
        if unused > 0 {
            parts.push(format!("{} unused", unused).red().to_string());
        }
        writeln!(out, "Summary: {}", parts.join(", "))
    }
}
