use crate::model::{DeclId, DeclKind, Declaration, InterfaceId, Location, Scope, Span};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Stable index of a symbol in the usage-graph arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of symbol, including the two pseudo-symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Constant,
    Variable,
    Function,
    Type,
    Field,

    /// The blank identifier; aggregates every discard site
    Discard,

    /// Top-level initialization and always-live context
    Root,
}

impl SymbolKind {
    pub fn decl_kind(&self) -> Option<DeclKind> {
        match self {
            SymbolKind::Constant => Some(DeclKind::Constant),
            SymbolKind::Variable => Some(DeclKind::Variable),
            SymbolKind::Function => Some(DeclKind::Function),
            SymbolKind::Type => Some(DeclKind::Type),
            SymbolKind::Field => Some(DeclKind::Field),
            SymbolKind::Discard | SymbolKind::Root => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self.decl_kind() {
            Some(kind) => kind.display_name(),
            None if *self == SymbolKind::Discard => "discard",
            None => "root",
        }
    }
}

impl From<DeclKind> for SymbolKind {
    fn from(kind: DeclKind) -> Self {
        match kind {
            DeclKind::Constant => SymbolKind::Constant,
            DeclKind::Variable => SymbolKind::Variable,
            DeclKind::Function => SymbolKind::Function,
            DeclKind::Type => SymbolKind::Type,
            DeclKind::Field => SymbolKind::Field,
        }
    }
}

/// Set of declaration kinds that are checked and reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindMask(u8);

impl KindMask {
    pub const NONE: KindMask = KindMask(0);
    pub const ALL: KindMask = KindMask(0b1_1111);

    fn bit(kind: DeclKind) -> u8 {
        match kind {
            DeclKind::Constant => 1,
            DeclKind::Field => 1 << 1,
            DeclKind::Function => 1 << 2,
            DeclKind::Type => 1 << 3,
            DeclKind::Variable => 1 << 4,
        }
    }

    pub fn of(kinds: &[DeclKind]) -> Self {
        kinds.iter().fold(Self::NONE, |mask, &kind| mask.with(kind))
    }

    pub fn with(self, kind: DeclKind) -> Self {
        KindMask(self.0 | Self::bit(kind))
    }

    pub fn without(self, kind: DeclKind) -> Self {
        KindMask(self.0 & !Self::bit(kind))
    }

    pub fn contains(&self, kind: DeclKind) -> bool {
        self.0 & Self::bit(kind) != 0
    }

    /// Whether a symbol of this kind is reported. The discard pseudo-symbol
    /// always is; the program root never is.
    pub fn reports(&self, kind: SymbolKind) -> bool {
        match kind.decl_kind() {
            Some(kind) => self.contains(kind),
            None => kind == SymbolKind::Discard,
        }
    }
}

impl Default for KindMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// A node of the usage graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    pub id: SymbolId,

    /// Front-end declaration, absent for pseudo-symbols
    pub decl: Option<DeclId>,

    pub name: String,

    pub kind: SymbolKind,

    pub location: Location,

    pub header: Option<Span>,

    pub extent: Option<Span>,

    pub scope: Scope,

    pub exported: bool,

    /// Receiver type of a concrete method
    pub receiver: Option<SymbolId>,

    /// Interface of an abstract method
    pub interface: Option<InterfaceId>,

    /// Owning type of a field
    pub owner: Option<SymbolId>,

    /// Named type a field holds
    pub field_type: Option<SymbolId>,

    pub test: bool,
}

impl Symbol {
    fn pseudo(id: SymbolId, name: &str, kind: SymbolKind, location: Location) -> Self {
        Self {
            id,
            decl: None,
            name: name.to_string(),
            kind,
            location,
            header: None,
            extent: None,
            scope: Scope::Package,
            exported: false,
            receiver: None,
            interface: None,
            owner: None,
            field_type: None,
            test: false,
        }
    }

    pub fn root(id: SymbolId) -> Self {
        Self::pseudo(id, "<root>", SymbolKind::Root, Location::new(PathBuf::new(), 0, 0))
    }

    pub fn discard(id: SymbolId, location: Location) -> Self {
        Self::pseudo(id, "_", SymbolKind::Discard, location)
    }

    /// Receiver, owner and field type links are filled in once every
    /// declaration has an id
    pub fn from_declaration(id: SymbolId, decl: &Declaration) -> Self {
        Self {
            id,
            decl: Some(decl.id),
            name: decl.name.clone(),
            kind: decl.kind.into(),
            location: decl.location.clone(),
            header: Some(decl.header),
            extent: Some(decl.extent),
            scope: decl.scope,
            exported: decl.exported,
            receiver: None,
            interface: decl.interface,
            owner: None,
            field_type: None,
            test: decl.test,
        }
    }

    /// Whether `location` falls inside this symbol's own declaration header
    pub fn header_contains(&self, location: &Location) -> bool {
        self.location.file == location.file
            && self
                .header
                .map(|header| header.contains(location.point()))
                .unwrap_or(false)
    }

    pub fn display(&self) -> String {
        format!("{} {} ({})", self.kind.display_name(), self.name, self.location)
    }
}
