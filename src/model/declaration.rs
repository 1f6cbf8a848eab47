use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Front-end identity of a declaration, unique within one program
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(pub u32);

impl std::fmt::Display for DeclId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of an interface type, named or literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceId(pub u32);

/// Kind of declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Constant,
    Variable,
    Function,
    Type,
    Field,
}

impl DeclKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            DeclKind::Constant => "const",
            DeclKind::Variable => "var",
            DeclKind::Function => "func",
            DeclKind::Type => "type",
            DeclKind::Field => "field",
        }
    }

    /// Kind named by a per-kind check flag or ignore pattern
    pub fn from_check_name(name: &str) -> Option<Self> {
        match name {
            "consts" => Some(DeclKind::Constant),
            "vars" => Some(DeclKind::Variable),
            "funcs" => Some(DeclKind::Function),
            "types" => Some(DeclKind::Type),
            "fields" => Some(DeclKind::Field),
            _ => None,
        }
    }
}

/// Lexical scope a declaration lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    #[default]
    Package,
    Local,
}

/// Line/column pair (both 1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub line: usize,
    pub column: usize,
}

impl Point {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Inclusive range inside a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Point,
    pub end: Point,
}

impl Span {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.start <= point && point <= self.end
    }
}

/// Location in source code
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path
    pub file: PathBuf,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.line, self.column)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A source declaration as reported by the semantic front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub id: DeclId,

    pub name: String,

    pub kind: DeclKind,

    /// Position of the declared identifier
    pub location: Location,

    /// Signature or definition line; references inside it never count for
    /// the declaration itself
    pub header: Span,

    /// Whole declaration including any body or initializer
    pub extent: Span,

    #[serde(default)]
    pub scope: Scope,

    #[serde(default)]
    pub exported: bool,

    /// Receiver type of a concrete method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<DeclId>,

    /// Interface an abstract method belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<InterfaceId>,

    /// Composite type owning a field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<DeclId>,

    /// Named type of a field's value, when declared in the program
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<DeclId>,

    /// Test function (a root when test sources are analyzed)
    #[serde(default)]
    pub test: bool,
}

impl Declaration {
    /// Create a declaration whose header and extent cover only its identifier
    pub fn new(id: DeclId, name: impl Into<String>, kind: DeclKind, location: Location) -> Self {
        let name = name.into();
        let start = location.point();
        let end = Point::new(start.line, start.column + name.len().saturating_sub(1));
        Self {
            id,
            name,
            kind,
            location,
            header: Span::new(start, end),
            extent: Span::new(start, end),
            scope: Scope::Package,
            exported: false,
            receiver: None,
            interface: None,
            owner: None,
            field_type: None,
            test: false,
        }
    }

    /// Extend the header (and the extent, if shorter) up to `line:column`
    pub fn header_to(&mut self, line: usize, column: usize) -> &mut Self {
        self.header.start = Point::new(self.location.line, 1);
        self.header.end = Point::new(line, column);
        self.extent.start = self.extent.start.min(self.header.start);
        self.extent.end = self.extent.end.max(self.header.end);
        self
    }

    /// Extend the extent through the end of `line`
    pub fn body_to(&mut self, line: usize) -> &mut Self {
        self.extent.start = Point::new(self.extent.start.line, 1);
        self.extent.end = Point::new(line, usize::MAX);
        self
    }

    pub fn local(&mut self) -> &mut Self {
        self.scope = Scope::Local;
        self
    }

    pub fn exported(&mut self) -> &mut Self {
        self.exported = true;
        self
    }

    pub fn receiver(&mut self, ty: DeclId) -> &mut Self {
        self.receiver = Some(ty);
        self
    }

    pub fn interface(&mut self, interface: InterfaceId) -> &mut Self {
        self.interface = Some(interface);
        self
    }

    pub fn owned_by(&mut self, ty: DeclId) -> &mut Self {
        self.owner = Some(ty);
        self
    }

    pub fn of_type(&mut self, ty: DeclId) -> &mut Self {
        self.field_type = Some(ty);
        self
    }

    pub fn test(&mut self) -> &mut Self {
        self.test = true;
        self
    }

    /// Get a display string for this declaration
    pub fn display(&self) -> String {
        format!("{} {} ({})", self.kind.display_name(), self.name, self.location)
    }
}
