use crate::model::{Location, OccurrenceKind};
use serde::{Deserialize, Serialize};

/// Why a reference edge exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// A syntactic reference site
    Occurrence(OccurrenceKind),

    /// A value use credited through a simple alias to the original declaration
    Alias,

    /// Possible dynamic target of an interface method call
    Dispatch,

    /// A blank-identifier site
    Discard,

    /// Entry point registered with the runtime
    Entry,

    /// Entry point invoked by the runtime
    RuntimeCall,

    /// Exported surface callable from outside the analyzed unit
    Exported,

    /// Field possibly accessed through reflection
    Reflection,
}

impl EdgeKind {
    /// Edges not backed by a reference site in the source
    pub fn is_synthetic(&self) -> bool {
        matches!(
            self,
            EdgeKind::Entry | EdgeKind::RuntimeCall | EdgeKind::Exported | EdgeKind::Reflection
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Occurrence(kind) => kind.as_str(),
            EdgeKind::Alias => "alias",
            EdgeKind::Dispatch => "dispatch",
            EdgeKind::Discard => "discard",
            EdgeKind::Entry => "entry",
            EdgeKind::RuntimeCall => "runtime-call",
            EdgeKind::Exported => "exported",
            EdgeKind::Reflection => "reflection",
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "The code defining the source mentions the target here"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub kind: EdgeKind,

    pub location: Location,
}

impl Edge {
    pub fn new(kind: EdgeKind, location: Location) -> Self {
        Self { kind, location }
    }
}
