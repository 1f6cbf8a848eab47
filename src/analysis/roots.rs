use crate::config::AnalysisConfig;
use crate::graph::{Edge, EdgeKind, Symbol, SymbolKind, UsageGraph};
use crate::model::Scope;
use tracing::{debug, info};

/// Names the runtime invokes without any call site in the program
const RUNTIME_ENTRY_POINTS: &[&str] = &["main", "init"];

/// Seeds the graph with synthetic edges from the program root
pub struct RootSelector<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> RootSelector<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Add root edges for every entry point, and for the exported surface in
    /// whole-program mode. Returns the number of entry points.
    pub fn select(&self, graph: &mut UsageGraph) -> usize {
        let mut entry_points = Vec::new();
        let mut exported = Vec::new();

        for symbol in graph.symbols() {
            if self.is_entry_point(symbol) {
                debug!("Entry point: {}", symbol.display());
                entry_points.push((symbol.id, symbol.location.clone()));
            }
            if self.config.whole_program && symbol.exported {
                exported.push((symbol.id, symbol.location.clone()));
            }
        }

        for (id, location) in &entry_points {
            graph.add_edge(UsageGraph::ROOT, *id, Edge::new(EdgeKind::Entry, location.clone()));
            graph.add_edge(
                UsageGraph::ROOT,
                *id,
                Edge::new(EdgeKind::RuntimeCall, location.clone()),
            );
        }
        for (id, location) in exported.iter().cloned() {
            graph.add_edge(UsageGraph::ROOT, id, Edge::new(EdgeKind::Exported, location));
        }

        info!(
            "Detected {} entry points, {} exported roots",
            entry_points.len(),
            exported.len()
        );
        entry_points.len()
    }

    fn is_entry_point(&self, symbol: &Symbol) -> bool {
        if symbol.kind != SymbolKind::Function
            || symbol.scope != Scope::Package
            || symbol.receiver.is_some()
            || symbol.interface.is_some()
        {
            return false;
        }
        RUNTIME_ENTRY_POINTS.contains(&symbol.name.as_str()) || (self.config.tests && symbol.test)
    }
}
