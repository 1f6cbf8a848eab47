use crate::error::{Result, UsageError};
use crate::graph::KindMask;
use crate::model::{DeclKind, Location};
use regex::Regex;

/// Suppresses problems of some kinds in files matching a glob.
///
/// Written as `glob:kind[,kind...]`, kinds being `consts`, `fields`,
/// `funcs`, `types`, `vars` or `*` for all of them.
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    pattern: String,
    glob: Regex,
    kinds: KindMask,
}

impl IgnorePattern {
    /// Parse a whitespace-separated list of ignore strings
    pub fn parse_all(value: &str) -> Result<Vec<Self>> {
        value.split_whitespace().map(Self::parse).collect()
    }

    pub fn parse(part: &str) -> Result<Self> {
        let malformed = || UsageError::MalformedIgnore(part.to_string());

        let (pattern, checks) = part.split_once(':').ok_or_else(malformed)?;
        if pattern.is_empty() || checks.is_empty() || checks.contains(':') {
            return Err(malformed());
        }

        let mut kinds = KindMask::NONE;
        for check in checks.split(',') {
            kinds = match check {
                "*" => KindMask::ALL,
                name => kinds.with(DeclKind::from_check_name(name).ok_or_else(malformed)?),
            };
        }

        Ok(Self {
            pattern: pattern.to_string(),
            glob: compile_glob(pattern)?,
            kinds,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether a problem of `kind` at `location` is suppressed. Discard
    /// sites have no kind and are only suppressed by `*`.
    pub fn matches(&self, location: &Location, kind: Option<DeclKind>) -> bool {
        let kind_matches = match kind {
            Some(kind) => self.kinds.contains(kind),
            None => self.kinds == KindMask::ALL,
        };
        kind_matches && self.glob.is_match(&location.file.to_string_lossy())
    }
}

/// Translate a path glob into an anchored regex.
///
/// `**` crosses directory separators, `*` and `?` do not.
pub fn compile_glob(glob: &str) -> Result<Regex> {
    let mut regex = String::from("^");
    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    regex.push_str("(?:.*/)?");
                } else {
                    regex.push_str(".*");
                }
            }
            '*' => regex.push_str("[^/]*"),
            '?' => regex.push_str("[^/]"),
            c => regex.push_str(&regex::escape(&c.to_string())),
        }
    }
    regex.push('$');

    Regex::new(&regex).map_err(|source| UsageError::IgnorePattern {
        pattern: glob.to_string(),
        source,
    })
}
