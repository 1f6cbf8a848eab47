mod builder;
mod dispatch;
mod edge;
mod parallel_builder;
mod symbol;

pub use builder::UsageGraphBuilder;
pub use dispatch::DispatchTable;
pub use edge::{Edge, EdgeKind};
pub use parallel_builder::ParallelGraphBuilder;
pub use symbol::{KindMask, Symbol, SymbolId, SymbolKind};

use crate::model::{DeclId, Location};
use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// The usage graph: an arena of symbols and the reference edges between them.
///
/// Node indices of the underlying petgraph equal symbol ids; symbol 0 is
/// always the program root.
#[derive(Debug)]
pub struct UsageGraph {
    /// Nodes are SymbolIds, edges are references
    inner: DiGraph<SymbolId, Edge>,

    /// Symbol details, indexed by SymbolId
    symbols: Vec<Symbol>,

    /// Map from front-end declaration to symbol
    decl_index: HashMap<DeclId, SymbolId>,

    /// Map from composite type to its fields
    fields_index: HashMap<SymbolId, Vec<SymbolId>>,

    discard: Option<SymbolId>,
}

impl UsageGraph {
    pub const ROOT: SymbolId = SymbolId(0);

    /// Create a graph holding only the program root
    pub fn new() -> Self {
        let mut graph = Self {
            inner: DiGraph::new(),
            symbols: Vec::new(),
            decl_index: HashMap::new(),
            fields_index: HashMap::new(),
            discard: None,
        };
        graph.push(Symbol::root(Self::ROOT));
        graph
    }

    fn push(&mut self, symbol: Symbol) -> SymbolId {
        let id = symbol.id;
        let node = self.inner.add_node(id);
        debug_assert_eq!(node.index(), id.index());

        if let Some(decl) = symbol.decl {
            self.decl_index.insert(decl, id);
        }
        if let Some(owner) = symbol.owner {
            self.fields_index.entry(owner).or_default().push(id);
        }
        self.symbols.push(symbol);
        id
    }

    /// Id the next added symbol will get
    pub fn next_id(&self) -> SymbolId {
        SymbolId(self.symbols.len() as u32)
    }

    /// Add a symbol; its id must be [`UsageGraph::next_id`]
    pub fn add_symbol(&mut self, symbol: Symbol) -> SymbolId {
        assert_eq!(symbol.id, self.next_id(), "symbols must be added in id order");
        self.push(symbol)
    }

    /// Add the discard pseudo-symbol
    pub fn add_discard(&mut self, location: Location) -> SymbolId {
        let id = self.push(Symbol::discard(self.next_id(), location));
        self.discard = Some(id);
        id
    }

    /// Add a reference edge
    pub fn add_edge(&mut self, from: SymbolId, to: SymbolId, edge: Edge) {
        self.inner
            .add_edge(NodeIndex::new(from.index()), NodeIndex::new(to.index()), edge);
    }

    /// The underlying petgraph, for traversals
    pub fn inner(&self) -> &DiGraph<SymbolId, Edge> {
        &self.inner
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    /// All symbols in id order, pseudo-symbols included
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Declared symbols of the enabled kinds
    pub fn registry(&self, mask: KindMask) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(move |s| {
            s.kind
                .decl_kind()
                .map(|kind| mask.contains(kind))
                .unwrap_or(false)
        })
    }

    pub fn symbol_for(&self, decl: DeclId) -> Option<SymbolId> {
        self.decl_index.get(&decl).copied()
    }

    pub fn discard(&self) -> Option<SymbolId> {
        self.discard
    }

    /// Fields owned by a composite type
    pub fn fields_of(&self, ty: SymbolId) -> &[SymbolId] {
        self.fields_index
            .get(&ty)
            .map(|fields| fields.as_slice())
            .unwrap_or(&[])
    }

    /// Every edge as (source, target, edge), in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (SymbolId, SymbolId, &Edge)> {
        self.inner.edge_references().map(|edge| {
            (
                self.inner[edge.source()],
                self.inner[edge.target()],
                edge.weight(),
            )
        })
    }

    /// Edges the code of `id` owns, in insertion order
    pub fn references_from(&self, id: SymbolId) -> impl Iterator<Item = (SymbolId, &Edge)> {
        self.directed(id, Direction::Outgoing)
            .into_iter()
            .map(move |edge| (self.inner[edge.target()], edge.weight()))
    }

    /// Edges pointing at `id`, in insertion order
    pub fn references_to(&self, id: SymbolId) -> impl Iterator<Item = (SymbolId, &Edge)> {
        self.directed(id, Direction::Incoming)
            .into_iter()
            .map(move |edge| (self.inner[edge.source()], edge.weight()))
    }

    fn directed(&self, id: SymbolId, direction: Direction) -> Vec<EdgeReference<'_, Edge>> {
        let mut edges: Vec<_> = self
            .inner
            .edges_directed(NodeIndex::new(id.index()), direction)
            .collect();
        edges.sort_by_key(|edge| edge.id());
        edges
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Find declared symbols by name, in id order
    pub fn find_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.symbols.iter().filter(move |s| s.name == name)
    }
}

impl Default for UsageGraph {
    fn default() -> Self {
        Self::new()
    }
}
