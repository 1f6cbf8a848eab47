use crate::analysis::Usage;
use crate::graph::{KindMask, SymbolKind};
use crate::model::Location;
use serde::Serialize;

/// A positioned diagnostic for one usage record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub location: Location,
    pub text: String,
    pub name: String,
    pub kind: SymbolKind,
    pub count: usize,
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.text)
    }
}

/// "x is used 1 time", "x is used 0 times"
pub fn usage_text(name: &str, count: usize) -> String {
    if count == 1 {
        format!("{} is used 1 time", name)
    } else {
        format!("{} is used {} times", name, count)
    }
}

/// Turns usage records into problems for the enabled kinds
pub struct LintAdapter {
    mask: KindMask,
}

impl LintAdapter {
    pub fn new(mask: KindMask) -> Self {
        Self { mask }
    }

    /// One problem per usage whose kind passes the mask; unordered
    pub fn problems(&self, usages: &[Usage]) -> Vec<Problem> {
        usages
            .iter()
            .filter(|usage| self.mask.reports(usage.kind))
            .map(|usage| Problem {
                location: usage.location.clone(),
                text: usage_text(&usage.name, usage.count),
                name: usage.name.clone(),
                kind: usage.kind,
                count: usage.count,
            })
            .collect()
    }
}
