//! Semantic-model interface consumed by the engine.
//!
//! Parsing and type resolution happen in a front end; what reaches the
//! engine is a set of facts: declarations, resolved reference sites,
//! simple-alias facts, interface satisfaction and opaque value flows.

mod declaration;
mod occurrence;
mod program;

pub use declaration::{DeclId, DeclKind, Declaration, InterfaceId, Location, Point, Scope, Span};
pub use occurrence::{Occurrence, OccurrenceKind, Resolution};
pub use program::{
    Alias, FileFacts, OpaqueContext, OpaqueFlow, Program, ProgramBuilder, Satisfaction,
};

use std::path::Path;

/// Read-only view of a fully resolved program.
///
/// Implementations must be shareable across graph-construction workers.
pub trait SemanticModel: Sync {
    /// Source files in a stable order
    fn files(&self) -> Vec<&Path>;

    /// Every declaration of interest, local ones included
    fn declarations(&self) -> Vec<&Declaration>;

    /// Reference sites found in `file`
    fn occurrences(&self, file: &Path) -> &[Occurrence];

    fn aliases(&self) -> &[Alias];

    fn satisfactions(&self) -> &[Satisfaction];

    fn opaque_flows(&self) -> &[OpaqueFlow];
}
