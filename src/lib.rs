//! usecount - Count how often every declaration is used by live code
//!
//! This library takes the facts a semantic front end extracted from a
//! program (declarations, resolved reference sites, interface
//! satisfaction, aliasing) and reports, for every declared constant,
//! variable, function, type and field, how many references to it come
//! from code that is itself reachable.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **Discovery** - Find fact documents (`*.facts.json`, `*.facts.yaml`)
//! 2. **Model** - Load and validate them into a [`Program`]
//! 3. **Graph Building** - Turn every reference site into a usage edge
//! 4. **Root Selection** - `main`, `init`, tests and the exported surface
//! 5. **Reachability** - Propagate liveness and count live edges
//! 6. **Reflection** - Keep fields of reflectively used types alive
//! 7. **Reporting** - Lint problems, terminal, JSON and debug dumps

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod model;
pub mod report;

pub use analysis::{Analysis, Checker, Usage};
pub use config::Config;
pub use discovery::FileFinder;
pub use error::{Result, UsageError};
pub use graph::{KindMask, UsageGraph, UsageGraphBuilder};
pub use model::{Program, ProgramBuilder, SemanticModel};
pub use report::{LintAdapter, Problem, ReportFormat, Reporter, SortOrder};
