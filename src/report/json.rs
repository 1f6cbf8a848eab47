use super::Problem;
use serde::Serialize;
use std::io::{self, Write};

/// JSON reporter for programmatic output
pub struct JsonReporter {
    total: usize,
}

impl JsonReporter {
    pub fn new(total: usize) -> Self {
        Self { total }
    }

    pub fn report<W: Write + ?Sized>(&self, problems: &[Problem], out: &mut W) -> io::Result<()> {
        let report = JsonReport::from_problems(problems, self.total);
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    total_symbols: usize,
    shown: usize,
    unused: usize,
    symbols: Vec<JsonSymbol<'a>>,
}

#[derive(Serialize)]
struct JsonSymbol<'a> {
    name: &'a str,
    kind: &'static str,
    uses: usize,
    message: &'a str,
    file: String,
    line: usize,
    column: usize,
}

impl<'a> JsonReport<'a> {
    fn from_problems(problems: &'a [Problem], total: usize) -> Self {
        let symbols: Vec<JsonSymbol> = problems
            .iter()
            .map(|p| JsonSymbol {
                name: &p.name,
                kind: p.kind.display_name(),
                uses: p.count,
                message: &p.text,
                file: p.location.file.to_string_lossy().to_string(),
                line: p.location.line,
                column: p.location.column,
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION"),
            total_symbols: total,
            shown: symbols.len(),
            unused: problems.iter().filter(|p| p.count == 0).count(),
            symbols,
        }
    }
}
