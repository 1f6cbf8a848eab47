use clap::Parser;
use colored::Colorize;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use usecount::report::{ReportFormat, SortOrder};
use usecount::{Checker, Config, FileFinder, LintAdapter, Program, Reporter};

/// usecount - Report how often every identifier is used by live code
#[derive(Parser, Debug)]
#[command(name = "usecount")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Fact documents, or directories to search for *.facts.json / *.facts.yaml
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report used constants
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    consts: Option<bool>,

    /// Report used fields
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    fields: Option<bool>,

    /// Report used functions and methods
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    funcs: Option<bool>,

    /// Report used types
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    types: Option<bool>,

    /// Report used variables
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    vars: Option<bool>,

    /// Treat arguments as a program and count exported identifiers as used
    #[arg(long)]
    exported: bool,

    /// Consider identifiers as used when they are likely accessed via reflection
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    reflect: Option<bool>,

    /// Treat test functions as entry points
    #[arg(long)]
    tests: bool,

    /// Write a debug graph to FILE. Existing files will be overwritten.
    #[arg(long, value_name = "FILE")]
    debug: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Print usage counts for all identifiers in lint format
    #[arg(long)]
    lint_output: bool,

    /// Show only the first n symbols (0 shows all; lint output is never cut)
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Order of the reported symbols
    #[arg(long, value_enum)]
    sort: Option<SortArg>,

    /// Only report symbols used at most N times
    #[arg(long, value_name = "N")]
    max_uses: Option<usize>,

    /// Ignore problems: whitespace-separated "glob:kind[,kind]" entries
    #[arg(long, value_name = "PATTERNS")]
    ignore: Option<String>,

    /// Patterns to exclude from discovery (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Scan fact files in parallel
    #[arg(long)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Lint,
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Lint => ReportFormat::Lint,
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    Uses,
    Location,
}

impl From<SortArg> for SortOrder {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Uses => SortOrder::Uses,
            SortArg::Location => SortOrder::Location,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("usecount v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    let unclean = run_analysis(&config, &cli.paths, cli.quiet)?;
    if unclean {
        std::process::exit(1);
    }

    Ok(())
}

/// Returns true when lint problems were printed
fn run_analysis(config: &Config, paths: &[PathBuf], quiet: bool) -> Result<bool> {
    let start_time = Instant::now();

    // Parse ignore patterns before doing any work
    let ignores = config.ignore_patterns().into_diagnostic()?;

    let finder = FileFinder::new(config).into_diagnostic()?;
    let documents = finder.find_documents(paths).into_diagnostic()?;

    if documents.is_empty() {
        if !quiet {
            eprintln!("{}", "No fact documents found.".yellow());
        }
        return Ok(false);
    }

    let document_paths: Vec<PathBuf> = documents.into_iter().map(|d| d.path).collect();
    let program = Program::from_paths(&document_paths)
        .into_diagnostic()
        .wrap_err("Failed to load the program")?;

    let checker = Checker::new(config);
    let analysis = checker.run(&program).into_diagnostic()?;

    let problems = LintAdapter::new(checker.mask()).problems(&analysis.usages);
    let reporter = Reporter::new(config.report.clone(), ignores);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let printed = reporter.report(problems, &mut out).into_diagnostic()?;
    out.flush().into_diagnostic()?;

    if !quiet {
        eprintln!(
            "{}",
            format!(
                "Analyzed {} files in {:.2}s",
                document_paths.len(),
                start_time.elapsed().as_secs_f64()
            )
            .dimmed()
        );
    }

    Ok(config.report.format == ReportFormat::Lint && printed > 0)
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path).into_diagnostic()?
    } else {
        // Try to load from default locations
        Config::from_default_locations(Path::new(".")).into_diagnostic()?
    };

    // Override with CLI arguments
    let checks = &mut config.checks;
    for (flag, slot) in [
        (cli.consts, &mut checks.consts),
        (cli.fields, &mut checks.fields),
        (cli.funcs, &mut checks.funcs),
        (cli.types, &mut checks.types),
        (cli.vars, &mut checks.vars),
    ] {
        if let Some(value) = flag {
            *slot = value;
        }
    }

    if cli.exported {
        config.analysis.whole_program = true;
    }
    if let Some(reflect) = cli.reflect {
        config.analysis.consider_reflection = reflect;
    }
    if cli.tests {
        config.analysis.tests = true;
    }
    if cli.parallel {
        config.analysis.parallel = true;
    }
    if cli.debug.is_some() {
        config.debug = cli.debug.clone();
    }

    if let Some(format) = cli.format {
        config.report.format = format.into();
    }
    if cli.lint_output {
        config.report.format = ReportFormat::Lint;
    }
    if let Some(top) = cli.top {
        config.report.top = top;
    }
    if let Some(sort) = cli.sort {
        config.report.sort = sort.into();
    }
    if cli.max_uses.is_some() {
        config.report.max_uses = cli.max_uses;
    }
    if let Some(ignore) = &cli.ignore {
        config.ignore.push(ignore.clone());
    }
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }

    Ok(config)
}
