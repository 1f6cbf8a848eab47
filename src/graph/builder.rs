use super::{DispatchTable, Edge, EdgeKind, Symbol, SymbolId, SymbolKind, UsageGraph};
use crate::error::{Result, UsageError};
use crate::model::{DeclId, Declaration, Location, Occurrence, Resolution, Scope, SemanticModel, Span};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// A resolved edge waiting to be added to the graph
pub(crate) type PendingEdge = (SymbolId, SymbolId, Edge);

/// Builder for constructing the usage graph, one file after another
pub struct UsageGraphBuilder<'m, M: SemanticModel + ?Sized> {
    model: &'m M,
}

impl<'m, M: SemanticModel + ?Sized> UsageGraphBuilder<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self { model }
    }

    /// Build the final graph, resolving every occurrence
    pub fn build(self) -> Result<UsageGraph> {
        let (mut graph, scanner) = prepare(self.model)?;

        for file in sorted_files(self.model) {
            let edges = scanner.scan(&graph, file, self.model.occurrences(file));
            debug!("{}: {} edges", file.display(), edges.len());
            for (from, to, edge) in edges {
                graph.add_edge(from, to, edge);
            }
        }

        info!(
            "Usage graph: {} symbols, {} edges",
            graph.symbol_count(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

/// Files in path order, so edge insertion order does not depend on the model
pub(crate) fn sorted_files<M: SemanticModel + ?Sized>(model: &M) -> Vec<&Path> {
    let mut files = model.files();
    files.sort();
    files.dedup();
    files
}

/// Create every symbol and the lookup tables edge emission needs
pub(crate) fn prepare<M: SemanticModel + ?Sized>(model: &M) -> Result<(UsageGraph, Scanner)> {
    let mut files = model.files();
    files.sort();
    if let Some(pair) = files.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(UsageError::DuplicateFile {
            path: pair[0].to_path_buf(),
        });
    }

    let mut declarations = model.declarations();
    declarations.sort_by(|a, b| a.location.cmp(&b.location).then(a.id.cmp(&b.id)));

    let mut seen: HashMap<_, &Declaration> = HashMap::new();
    for decl in &declarations {
        if let Some(first) = seen.insert(decl.id, decl) {
            return Err(UsageError::DuplicateDeclaration {
                id: decl.id,
                first: first.location.clone(),
                second: decl.location.clone(),
            });
        }
    }

    let mut graph = UsageGraph::new();

    // Ids are assigned up front so receiver/owner links can point forward
    let first_id = graph.next_id().0;
    let ids: HashMap<_, SymbolId> = declarations
        .iter()
        .enumerate()
        .map(|(i, decl)| (decl.id, SymbolId(first_id + i as u32)))
        .collect();

    for decl in &declarations {
        let mut symbol = Symbol::from_declaration(graph.next_id(), decl);
        symbol.receiver = decl.receiver.and_then(|r| ids.get(&r).copied());
        symbol.owner = decl.owner.and_then(|o| ids.get(&o).copied());
        symbol.field_type = decl.field_type.and_then(|t| ids.get(&t).copied());
        graph.add_symbol(symbol);
    }

    let discard_site = sorted_files(model)
        .into_iter()
        .flat_map(|file| model.occurrences(file).iter())
        .filter(|occ| occ.resolution == Resolution::Discard)
        .map(|occ| &occ.location)
        .min()
        .cloned();
    if let Some(location) = discard_site {
        graph.add_discard(location);
    }

    let mut aliases = HashMap::new();
    for alias in model.aliases() {
        match (graph.symbol_for(alias.alias), graph.symbol_for(alias.original)) {
            (Some(from), Some(to)) => {
                aliases.insert(from, to);
            }
            _ => debug!("Skipping alias {} -> {}: unknown declaration", alias.alias, alias.original),
        }
    }

    let scanner = Scanner {
        owners: OwnerIndex::build(&graph),
        dispatch: DispatchTable::build(&graph, model.satisfactions()),
        aliases,
    };

    debug!(
        "Prepared {} symbols, {} dispatch keys, {} aliases",
        graph.symbol_count(),
        scanner.dispatch.len(),
        scanner.aliases.len()
    );

    Ok((graph, scanner))
}

/// Symbols whose extent owns the references inside it, per file
#[derive(Debug, Default)]
pub(crate) struct OwnerIndex {
    by_file: HashMap<PathBuf, Vec<(SymbolId, Span)>>,
}

impl OwnerIndex {
    fn build(graph: &UsageGraph) -> Self {
        let mut by_file: HashMap<PathBuf, Vec<(SymbolId, Span)>> = HashMap::new();
        for symbol in graph.symbols() {
            if !owns_references(symbol) {
                continue;
            }
            if let Some(extent) = symbol.extent {
                by_file
                    .entry(symbol.location.file.clone())
                    .or_default()
                    .push((symbol.id, extent));
            }
        }
        Self { by_file }
    }

    /// Innermost owner whose extent contains `location`
    fn innermost(&self, location: &Location) -> Option<SymbolId> {
        let point = location.point();
        self.by_file
            .get(&location.file)?
            .iter()
            .filter(|(_, extent)| extent.contains(point))
            .max_by_key(|(id, extent)| (extent.start, Reverse(extent.end), Reverse(*id)))
            .map(|(id, _)| *id)
    }
}

fn owns_references(symbol: &Symbol) -> bool {
    match symbol.kind {
        SymbolKind::Function | SymbolKind::Type => true,
        SymbolKind::Variable | SymbolKind::Constant => {
            symbol.scope == Scope::Package
        }
        SymbolKind::Field | SymbolKind::Discard | SymbolKind::Root => false,
    }
}

/// Turns occurrences into edges. Read-only, so files can be scanned in
/// parallel against the same prepared graph.
#[derive(Debug)]
pub(crate) struct Scanner {
    owners: OwnerIndex,
    dispatch: DispatchTable,
    aliases: HashMap<SymbolId, SymbolId>,
}

impl Scanner {
    pub(crate) fn scan(
        &self,
        graph: &UsageGraph,
        file: &Path,
        occurrences: &[Occurrence],
    ) -> Vec<PendingEdge> {
        let mut ordered: Vec<&Occurrence> = occurrences.iter().collect();
        ordered.sort_by(|a, b| a.location.cmp(&b.location).then(a.kind.cmp(&b.kind)));

        let mut edges = Vec::with_capacity(ordered.len());
        for occ in ordered {
            if occ.location.file != file {
                trace!("Occurrence at {} listed under {}", occ.location, file.display());
            }
            self.scan_occurrence(graph, occ, &mut edges);
        }
        edges
    }

    fn scan_occurrence(&self, graph: &UsageGraph, occ: &Occurrence, edges: &mut Vec<PendingEdge>) {
        let source = self
            .owners
            .innermost(&occ.location)
            .unwrap_or(UsageGraph::ROOT);
        let direct = EdgeKind::Occurrence(occ.kind);

        match occ.resolution {
            Resolution::Unresolved => {
                trace!("Unresolved occurrence at {}", occ.location);
            }
            Resolution::Discard => {
                if let Some(discard) = graph.discard() {
                    edges.push((source, discard, Edge::new(EdgeKind::Discard, occ.location.clone())));
                }
            }
            Resolution::Declaration(decl) => {
                let Some(target) = self.target(graph, decl, occ) else {
                    return;
                };
                if occ.kind.is_value_use() {
                    if let Some(supplier) = self.supplier(graph, target) {
                        let kind = if supplier == target { direct } else { EdgeKind::Alias };
                        edges.push((source, supplier, Edge::new(kind, occ.location.clone())));
                    }
                } else {
                    edges.push((source, target, Edge::new(direct, occ.location.clone())));
                }
            }
            Resolution::Dispatch(method) => {
                let Some(target) = self.target(graph, method, occ) else {
                    return;
                };
                edges.push((source, target, Edge::new(direct, occ.location.clone())));
                for &concrete in self.dispatch.targets(graph, target) {
                    edges.push((
                        source,
                        concrete,
                        Edge::new(EdgeKind::Dispatch, occ.location.clone()),
                    ));
                }
            }
        }
    }

    /// Resolve a declaration to its symbol, dropping references from its own header
    fn target(
        &self,
        graph: &UsageGraph,
        decl: DeclId,
        occ: &Occurrence,
    ) -> Option<SymbolId> {
        let Some(target) = graph.symbol_for(decl) else {
            debug!("Occurrence at {} names unknown declaration {}", occ.location, decl);
            return None;
        };
        if graph.symbol(target).header_contains(&occ.location) {
            trace!("Skipping header reference to {} at {}", graph.symbol(target).name, occ.location);
            return None;
        }
        Some(target)
    }

    /// Declaration supplying the value a call or instantiation uses.
    ///
    /// Functions and types supply themselves; a simple alias supplies the
    /// end of its alias chain. Any other variable supplies nothing beyond
    /// its plain identifier occurrence.
    fn supplier(&self, graph: &UsageGraph, target: SymbolId) -> Option<SymbolId> {
        match graph.symbol(target).kind {
            SymbolKind::Function | SymbolKind::Type | SymbolKind::Constant => Some(target),
            SymbolKind::Variable | SymbolKind::Field => self.resolve_alias(target),
            SymbolKind::Discard | SymbolKind::Root => None,
        }
    }

    /// End of the alias chain starting at `start`; a cyclic chain has none
    fn resolve_alias(&self, start: SymbolId) -> Option<SymbolId> {
        let mut current = *self.aliases.get(&start)?;
        let mut visited = HashSet::from([start]);
        while let Some(&next) = self.aliases.get(&current) {
            if !visited.insert(current) {
                trace!("Alias cycle through symbol {}", current);
                return None;
            }
            current = next;
        }
        Some(current)
    }
}
