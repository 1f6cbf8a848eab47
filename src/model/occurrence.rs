use super::{DeclId, Location};
use serde::{Deserialize, Serialize};

/// Syntactic position that can refer to a declared entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceKind {
    /// Plain identifier
    Identifier,

    /// Member/selector expression (`x.f`, `pkg.Name`)
    Selector,

    /// Function value being invoked
    CallTarget,

    /// Type of a composite literal (`T{}`)
    CompositeType,

    /// Declared type of a binding (`var v T`)
    ValueType,

    /// Type listed in a type-switch case
    TypeSwitchCase,

    /// Field or method promoted through an embedded field
    EmbeddedField,

    /// Named result implicitly read by a bare `return`
    ImplicitResult,
}

impl OccurrenceKind {
    /// Occurrences that name the value being invoked or instantiated rather
    /// than the binding holding it
    pub fn is_value_use(&self) -> bool {
        matches!(
            self,
            OccurrenceKind::CallTarget | OccurrenceKind::CompositeType | OccurrenceKind::ValueType
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OccurrenceKind::Identifier => "ident",
            OccurrenceKind::Selector => "selector",
            OccurrenceKind::CallTarget => "call",
            OccurrenceKind::CompositeType => "composite",
            OccurrenceKind::ValueType => "value-type",
            OccurrenceKind::TypeSwitchCase => "type-switch",
            OccurrenceKind::EmbeddedField => "embedded",
            OccurrenceKind::ImplicitResult => "implicit-result",
        }
    }
}

/// What an occurrence refers to, as decided by the semantic front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Statically resolved declaration
    Declaration(DeclId),

    /// Call through an interface value; carries the abstract method
    Dispatch(DeclId),

    /// Blank-identifier site
    Discard,

    /// The front end could not resolve it
    Unresolved,
}

/// A single reference site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    pub location: Location,

    pub kind: OccurrenceKind,

    pub resolution: Resolution,
}

impl Occurrence {
    pub fn new(location: Location, kind: OccurrenceKind, resolution: Resolution) -> Self {
        Self {
            location,
            kind,
            resolution,
        }
    }
}
