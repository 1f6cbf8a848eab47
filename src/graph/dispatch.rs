use super::{SymbolId, UsageGraph};
use crate::model::{InterfaceId, Satisfaction};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Possible dynamic targets of interface method calls, keyed by
/// (interface, method name).
///
/// A call through an interface value is credited to every concrete method
/// of every type satisfying the interface. This over-approximates: a dead
/// implementation of a live interface counts as used.
#[derive(Debug, Default)]
pub struct DispatchTable {
    targets: HashMap<(InterfaceId, String), Vec<SymbolId>>,
}

impl DispatchTable {
    pub fn build(graph: &UsageGraph, satisfactions: &[Satisfaction]) -> Self {
        let mut methods_by_receiver: HashMap<SymbolId, Vec<SymbolId>> = HashMap::new();
        let mut interface_methods: HashMap<InterfaceId, HashSet<&str>> = HashMap::new();

        for symbol in graph.symbols() {
            if let Some(receiver) = symbol.receiver {
                methods_by_receiver.entry(receiver).or_default().push(symbol.id);
            }
            if let Some(interface) = symbol.interface {
                interface_methods
                    .entry(interface)
                    .or_default()
                    .insert(symbol.name.as_str());
            }
        }

        let mut targets: HashMap<(InterfaceId, String), Vec<SymbolId>> = HashMap::new();
        for satisfaction in satisfactions {
            let Some(concrete) = graph.symbol_for(satisfaction.concrete) else {
                debug!("Satisfaction names unknown type {}", satisfaction.concrete);
                continue;
            };
            let Some(names) = interface_methods.get(&satisfaction.interface) else {
                continue;
            };
            for &method in methods_by_receiver.get(&concrete).into_iter().flatten() {
                let name = &graph.symbol(method).name;
                if names.contains(name.as_str()) {
                    targets
                        .entry((satisfaction.interface, name.clone()))
                        .or_default()
                        .push(method);
                }
            }
        }

        for methods in targets.values_mut() {
            methods.sort();
            methods.dedup();
        }

        Self { targets }
    }

    /// Concrete methods a call of the abstract method `method` may reach
    pub fn targets(&self, graph: &UsageGraph, method: SymbolId) -> &[SymbolId] {
        let symbol = graph.symbol(method);
        let Some(interface) = symbol.interface else {
            return &[];
        };
        self.targets
            .get(&(interface, symbol.name.clone()))
            .map(|methods| methods.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
