use super::reachability::ReachabilityPropagator;
use crate::config::ReflectionConfig;
use crate::graph::{Edge, EdgeKind, SymbolId, UsageGraph};
use crate::model::{OpaqueContext, OpaqueFlow};
use std::collections::HashSet;
use tracing::{debug, info};

/// Keeps alive the fields of types whose values flow where they may be
/// inspected by name: `any`-typed slots and serialization routines.
pub struct ReflectionHeuristic<'a> {
    config: &'a ReflectionConfig,
}

impl<'a> ReflectionHeuristic<'a> {
    pub fn new(config: &'a ReflectionConfig) -> Self {
        Self { config }
    }

    pub fn accepts(&self, context: &OpaqueContext) -> bool {
        match context {
            OpaqueContext::Opaque => self.config.opaque_values,
            OpaqueContext::Routine(name) => self.config.routines.iter().any(|r| r == name),
        }
    }

    /// Add one root edge per field of every accepted flow's type and resume
    /// propagation from those fields. Returns the number of fields marked.
    pub fn apply(
        &self,
        flows: &[OpaqueFlow],
        graph: &mut UsageGraph,
        propagator: &mut ReachabilityPropagator,
    ) -> usize {
        let mut granted: HashSet<SymbolId> = HashSet::new();
        let mut edges = Vec::new();

        for flow in flows {
            if !self.accepts(&flow.context) {
                debug!("Ignoring opaque flow at {}", flow.location);
                continue;
            }
            let Some(ty) = graph.symbol_for(flow.value_type) else {
                debug!("Opaque flow at {} names unknown type {}", flow.location, flow.value_type);
                continue;
            };
            for field in reachable_fields(graph, ty) {
                if granted.insert(field) {
                    edges.push((field, flow.location.clone()));
                }
            }
        }

        for (field, location) in &edges {
            graph.add_edge(
                UsageGraph::ROOT,
                *field,
                Edge::new(EdgeKind::Reflection, location.clone()),
            );
            propagator.mark(*field);
        }
        propagator.propagate(graph);

        info!("Reflection kept {} fields alive", edges.len());
        edges.len()
    }
}

/// Fields of `ty` and, through field types, of every struct nested in it
fn reachable_fields(graph: &UsageGraph, ty: SymbolId) -> Vec<SymbolId> {
    let mut fields = Vec::new();
    let mut seen = HashSet::from([ty]);
    let mut pending = vec![ty];
    while let Some(current) = pending.pop() {
        for &field in graph.fields_of(current) {
            fields.push(field);
            if let Some(nested) = graph.symbol(field).field_type {
                if seen.insert(nested) {
                    pending.push(nested);
                }
            }
        }
    }
    fields
}
