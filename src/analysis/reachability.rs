use crate::graph::{Edge, SymbolId, UsageGraph};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, VisitMap, Visitable};
use tracing::debug;

type LiveSet = <DiGraph<SymbolId, Edge> as Visitable>::Map;

fn node(id: SymbolId) -> NodeIndex {
    NodeIndex::new(id.index())
}

/// Depth-first propagation of liveness from the program root.
///
/// The traversal can be resumed: after new edges are added to the graph,
/// symbols marked with [`ReachabilityPropagator::mark`] are pushed onto the
/// DFS stack and [`ReachabilityPropagator::propagate`] continues from them.
/// The DFS discovered set is the live set.
#[derive(Debug)]
pub struct ReachabilityPropagator {
    dfs: Dfs<NodeIndex, LiveSet>,
    bound: usize,
}

impl ReachabilityPropagator {
    /// Start with only the program root pending
    pub fn new(graph: &UsageGraph) -> Self {
        Self {
            dfs: Dfs::new(graph.inner(), node(UsageGraph::ROOT)),
            bound: graph.symbol_count(),
        }
    }

    /// Queue a symbol for propagation; returns false if it is already live
    /// or queued
    pub fn mark(&mut self, id: SymbolId) -> bool {
        let n = node(id);
        if id.index() >= self.bound
            || self.dfs.discovered.is_visited(&n)
            || self.dfs.stack.contains(&n)
        {
            return false;
        }
        self.dfs.stack.push(n);
        true
    }

    /// Run until no new symbol becomes live
    pub fn propagate(&mut self, graph: &UsageGraph) {
        let mut visited = 0;
        while self.dfs.next(graph.inner()).is_some() {
            visited += 1;
        }
        debug!("Propagated liveness through {} symbols", visited);
    }

    pub fn is_live(&self, id: SymbolId) -> bool {
        self.dfs.discovered.is_visited(&node(id))
    }

    /// Count, for every symbol, the edges targeting it whose source is live
    pub fn finish(self, graph: &UsageGraph) -> Reachability {
        let mut counts = vec![0; graph.symbol_count()];
        for (source, target, _) in graph.edges() {
            if self.is_live(source) {
                counts[target.index()] += 1;
            }
        }
        let live = (0..self.bound)
            .map(|i| self.is_live(SymbolId(i as u32)))
            .collect();
        Reachability { live, counts }
    }
}

/// Liveness and use count of every symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reachability {
    live: Vec<bool>,
    counts: Vec<usize>,
}

impl Reachability {
    /// Propagate from the root over the graph as it stands
    pub fn compute(graph: &UsageGraph) -> Self {
        let mut propagator = ReachabilityPropagator::new(graph);
        propagator.propagate(graph);
        propagator.finish(graph)
    }

    pub fn is_live(&self, id: SymbolId) -> bool {
        self.live.get(id.index()).copied().unwrap_or(false)
    }

    /// Number of edges with a live source targeting `id`
    pub fn count(&self, id: SymbolId) -> usize {
        self.counts.get(id.index()).copied().unwrap_or(0)
    }

    pub fn live_count(&self) -> usize {
        self.live.iter().filter(|live| **live).count()
    }
}
