mod debug;
mod json;
mod lint;
mod terminal;

pub use debug::DebugExporter;
pub use json::JsonReporter;
pub use lint::{usage_text, LintAdapter, Problem};
pub use terminal::TerminalReporter;

use crate::config::{IgnorePattern, ReportConfig};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use tracing::debug;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// `path:line:col: text`, one line per problem
    Lint,
    #[default]
    Terminal,
    Json,
}

/// Presentation order of problems
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most used first, ties by location
    #[default]
    Uses,
    Location,
}

/// Filters, orders and prints problems
pub struct Reporter {
    config: ReportConfig,
    ignores: Vec<IgnorePattern>,
}

impl Reporter {
    pub fn new(config: ReportConfig, ignores: Vec<IgnorePattern>) -> Self {
        Self { config, ignores }
    }

    /// Apply ignore patterns and the use threshold, then sort
    pub fn select(&self, mut problems: Vec<Problem>) -> Vec<Problem> {
        let before = problems.len();
        problems.retain(|p| {
            !self
                .ignores
                .iter()
                .any(|ignore| ignore.matches(&p.location, p.kind.decl_kind()))
        });
        if let Some(max) = self.config.max_uses {
            problems.retain(|p| p.count <= max);
        }
        debug!("{} of {} problems selected", problems.len(), before);

        match self.config.sort {
            SortOrder::Uses => problems.sort_by(|a, b| {
                b.count
                    .cmp(&a.count)
                    .then_with(|| a.location.cmp(&b.location))
                    .then_with(|| a.name.cmp(&b.name))
            }),
            SortOrder::Location => problems.sort_by(|a, b| {
                a.location
                    .cmp(&b.location)
                    .then_with(|| a.name.cmp(&b.name))
            }),
        }
        problems
    }

    /// Print the problems; returns how many were printed. Lint output lists
    /// every problem, the other formats only the first `top`.
    pub fn report<W: Write + ?Sized>(&self, problems: Vec<Problem>, out: &mut W) -> io::Result<usize> {
        let problems = self.select(problems);
        let total = problems.len();

        if self.config.format == ReportFormat::Lint {
            for problem in &problems {
                writeln!(out, "{}", problem)?;
            }
            return Ok(total);
        }

        let shown = match self.config.top {
            0 => &problems[..],
            top => &problems[..top.min(total)],
        };
        match self.config.format {
            ReportFormat::Json => JsonReporter::new(total).report(shown, out)?,
            _ => TerminalReporter::new(total).report(shown, out)?,
        }
        Ok(shown.len())
    }
}
