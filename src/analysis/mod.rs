mod reachability;
mod reflection;
mod roots;

pub use reachability::{Reachability, ReachabilityPropagator};
pub use reflection::ReflectionHeuristic;
pub use roots::RootSelector;

use crate::config::Config;
use crate::error::{Result, UsageError};
use crate::graph::{KindMask, ParallelGraphBuilder, SymbolId, SymbolKind, UsageGraph, UsageGraphBuilder};
use crate::model::{Location, SemanticModel};
use crate::report::DebugExporter;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// How often a symbol is used by live code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Usage {
    #[serde(skip)]
    pub symbol: SymbolId,

    pub name: String,

    pub kind: SymbolKind,

    pub location: Location,

    /// Edges targeting the symbol whose source is live
    pub count: usize,

    /// Whether the symbol itself is reachable from a root
    pub live: bool,
}

/// Everything a run produces
#[derive(Debug)]
pub struct Analysis {
    pub graph: UsageGraph,

    pub reachability: Reachability,

    /// Usage records of the reported kinds, in declaration order
    pub usages: Vec<Usage>,
}

impl Analysis {
    /// Usage record of the first symbol called `name`
    pub fn usage(&self, name: &str) -> Option<&Usage> {
        self.usages.iter().find(|u| u.name == name)
    }

    /// Usage counts of every symbol called `name`, in declaration order
    pub fn counts(&self, name: &str) -> Vec<usize> {
        self.usages
            .iter()
            .filter(|u| u.name == name)
            .map(|u| u.count)
            .collect()
    }
}

/// Runs the analysis for one configuration. Holds no state between runs.
pub struct Checker<'a> {
    config: &'a Config,
}

impl<'a> Checker<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn mask(&self) -> KindMask {
        self.config.checks.mask()
    }

    /// Build the usage graph, propagate liveness and count uses.
    ///
    /// The debug file, if any, is created before analysis starts so an
    /// unwritable path aborts the run without output.
    pub fn run<M: SemanticModel + ?Sized>(&self, model: &M) -> Result<Analysis> {
        let start_time = Instant::now();

        let mut debug_sink = match &self.config.debug {
            Some(path) => Some(open_debug_sink(path)?),
            None => None,
        };

        let mut graph = if self.config.analysis.parallel {
            ParallelGraphBuilder::new(model).build()?
        } else {
            UsageGraphBuilder::new(model).build()?
        };

        RootSelector::new(&self.config.analysis).select(&mut graph);

        let mut propagator = ReachabilityPropagator::new(&graph);
        propagator.propagate(&graph);

        if self.config.analysis.consider_reflection {
            ReflectionHeuristic::new(&self.config.reflection).apply(
                model.opaque_flows(),
                &mut graph,
                &mut propagator,
            );
        }

        let reachability = propagator.finish(&graph);
        let usages = collect_usages(&graph, &reachability, self.mask());

        if let Some(sink) = debug_sink.as_mut() {
            DebugExporter::new(&graph, &reachability).write(sink)?;
            sink.flush()?;
        }

        info!(
            "Analyzed {} symbols ({} live) in {:.2}s",
            graph.symbol_count(),
            reachability.live_count(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(Analysis {
            graph,
            reachability,
            usages,
        })
    }
}

fn open_debug_sink(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| UsageError::DebugSink {
            path: path.to_path_buf(),
            source,
        })
}

/// Usage records for the registry of `mask` plus the discard symbol, in id order
pub fn collect_usages(graph: &UsageGraph, reachability: &Reachability, mask: KindMask) -> Vec<Usage> {
    let discard = graph.discard().map(|id| graph.symbol(id));
    graph
        .registry(mask)
        .chain(discard)
        .map(|symbol| Usage {
            symbol: symbol.id,
            name: symbol.name.clone(),
            kind: symbol.kind,
            location: symbol.location.clone(),
            count: reachability.count(symbol.id),
            live: reachability.is_live(symbol.id),
        })
        .collect()
}
