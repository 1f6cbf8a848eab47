use super::{
    DeclId, DeclKind, Declaration, InterfaceId, Location, Occurrence, OccurrenceKind, Resolution,
    SemanticModel,
};
use crate::error::{Result, UsageError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A variable or field holding a function/type value without transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub alias: DeclId,
    pub original: DeclId,
}

/// A concrete named type whose method set satisfies an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Satisfaction {
    pub interface: InterfaceId,
    pub concrete: DeclId,
}

/// Where an opaquely-typed value ends up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpaqueContext {
    /// Converted to an `any`/empty-interface slot
    Opaque,
    /// Passed to the named routine (e.g. `encoding/json.Marshal`)
    Routine(String),
}

/// A value of a named type flowing somewhere its fields may be read by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpaqueFlow {
    pub location: Location,
    pub value_type: DeclId,
    pub context: OpaqueContext,
}

/// Facts for one source file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFacts {
    pub path: PathBuf,
    pub declarations: Vec<Declaration>,
    pub occurrences: Vec<Occurrence>,
}

/// In-memory semantic model, as serialized by a front end into a fact document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Program {
    pub files: Vec<FileFacts>,
    pub aliases: Vec<Alias>,
    pub satisfactions: Vec<Satisfaction>,
    pub opaque_flows: Vec<OpaqueFlow>,
}

impl Program {
    /// Load and validate a fact document (JSON, or YAML by extension)
    pub fn from_path(path: &Path) -> Result<Self> {
        let program = Self::read(path)?;
        program.validate()?;
        Ok(program)
    }

    /// Load several documents and merge them into one program; cross-document
    /// ids are only checked once everything is merged
    pub fn from_paths(paths: &[PathBuf]) -> Result<Self> {
        let mut program = Program::default();
        for path in paths {
            program.merge(Self::read(path)?);
        }
        program.validate()?;
        Ok(program)
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| UsageError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let mut program: Program = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents).map_err(|e| UsageError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?,
            _ => serde_json::from_str(&contents).map_err(|e| UsageError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?,
        };

        program.normalize();
        debug!(
            "Loaded {}: {} files, {} declarations",
            path.display(),
            program.files.len(),
            program.declaration_count()
        );

        Ok(program)
    }

    /// Append another program's facts; files with the same path are combined
    pub fn merge(&mut self, other: Program) {
        for file in other.files {
            self.push_file(file);
        }
        self.aliases.extend(other.aliases);
        self.satisfactions.extend(other.satisfactions);
        self.opaque_flows.extend(other.opaque_flows);
    }

    /// Combine entries of this program that list the same file path
    pub fn normalize(&mut self) {
        for file in std::mem::take(&mut self.files) {
            self.push_file(file);
        }
    }

    fn push_file(&mut self, file: FileFacts) {
        match self.files.iter_mut().find(|f| f.path == file.path) {
            Some(existing) => {
                existing.declarations.extend(file.declarations);
                existing.occurrences.extend(file.occurrences);
            }
            None => self.files.push(file),
        }
    }

    pub fn declaration_count(&self) -> usize {
        self.files.iter().map(|f| f.declarations.len()).sum()
    }

    /// Check declaration identity and the ids the program-wide facts name
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashMap<DeclId, &Declaration> = HashMap::new();
        for decl in self.files.iter().flat_map(|f| f.declarations.iter()) {
            if let Some(first) = seen.insert(decl.id, decl) {
                return Err(UsageError::DuplicateDeclaration {
                    id: decl.id,
                    first: first.location.clone(),
                    second: decl.location.clone(),
                });
            }
        }

        let require = |id: DeclId, context: String| -> Result<()> {
            if seen.contains_key(&id) {
                Ok(())
            } else {
                Err(UsageError::DanglingDeclaration { id, context })
            }
        };

        for decl in seen.values() {
            if let Some(receiver) = decl.receiver {
                require(receiver, format!("receiver of {}", decl.display()))?;
            }
            if let Some(owner) = decl.owner {
                require(owner, format!("owner of {}", decl.display()))?;
            }
            if let Some(ty) = decl.field_type {
                require(ty, format!("type of {}", decl.display()))?;
            }
        }
        for alias in &self.aliases {
            require(alias.alias, "an alias fact".to_string())?;
            require(alias.original, "an alias fact".to_string())?;
        }
        for satisfaction in &self.satisfactions {
            require(satisfaction.concrete, "a satisfaction fact".to_string())?;
        }
        for flow in &self.opaque_flows {
            require(flow.value_type, format!("the opaque flow at {}", flow.location))?;
        }

        Ok(())
    }
}

impl SemanticModel for Program {
    fn files(&self) -> Vec<&Path> {
        self.files.iter().map(|f| f.path.as_path()).collect()
    }

    fn declarations(&self) -> Vec<&Declaration> {
        self.files.iter().flat_map(|f| f.declarations.iter()).collect()
    }

    fn occurrences(&self, file: &Path) -> &[Occurrence] {
        self.files
            .iter()
            .find(|f| f.path == file)
            .map(|f| f.occurrences.as_slice())
            .unwrap_or(&[])
    }

    fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    fn satisfactions(&self) -> &[Satisfaction] {
        &self.satisfactions
    }

    fn opaque_flows(&self) -> &[OpaqueFlow] {
        &self.opaque_flows
    }
}

/// Incrementally assembles a [`Program`], assigning declaration ids in order
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    program: Program,
    current: PathBuf,
    next_id: u32,
}

impl ProgramBuilder {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        let mut builder = Self {
            program: Program::default(),
            current: PathBuf::new(),
            next_id: 1,
        };
        builder.file(file);
        builder
    }

    /// Switch the file subsequent declarations and occurrences belong to
    pub fn file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.current = path.into();
        if !self.program.files.iter().any(|f| f.path == self.current) {
            self.program.files.push(FileFacts {
                path: self.current.clone(),
                ..FileFacts::default()
            });
        }
        self
    }

    fn current_file(&mut self) -> &mut FileFacts {
        let index = self
            .program
            .files
            .iter()
            .position(|f| f.path == self.current)
            .unwrap_or(0);
        &mut self.program.files[index]
    }

    pub fn at(&self, line: usize, column: usize) -> Location {
        Location::new(self.current.clone(), line, column)
    }

    pub fn declare(
        &mut self,
        kind: DeclKind,
        name: &str,
        line: usize,
        column: usize,
    ) -> &mut Declaration {
        let id = DeclId(self.next_id);
        self.next_id += 1;
        let location = self.at(line, column);
        let file = self.current_file();
        file.declarations.push(Declaration::new(id, name, kind, location));
        let last = file.declarations.len() - 1;
        &mut file.declarations[last]
    }

    pub fn occurrence(
        &mut self,
        line: usize,
        column: usize,
        kind: OccurrenceKind,
        resolution: Resolution,
    ) -> &mut Self {
        let location = self.at(line, column);
        self.current_file()
            .occurrences
            .push(Occurrence::new(location, kind, resolution));
        self
    }

    /// Occurrence statically resolved to `target`
    pub fn refer(
        &mut self,
        line: usize,
        column: usize,
        kind: OccurrenceKind,
        target: DeclId,
    ) -> &mut Self {
        self.occurrence(line, column, kind, Resolution::Declaration(target))
    }

    /// Identifier occurrence plus the call-target occurrence of a direct call
    pub fn call(&mut self, line: usize, column: usize, target: DeclId) -> &mut Self {
        self.refer(line, column, OccurrenceKind::Identifier, target)
            .refer(line, column, OccurrenceKind::CallTarget, target)
    }

    /// Identifier occurrence plus the literal-type occurrence of `T{}`
    pub fn composite(&mut self, line: usize, column: usize, ty: DeclId) -> &mut Self {
        self.refer(line, column, OccurrenceKind::Identifier, ty)
            .refer(line, column, OccurrenceKind::CompositeType, ty)
    }

    pub fn discard(&mut self, line: usize, column: usize) -> &mut Self {
        self.occurrence(line, column, OccurrenceKind::Identifier, Resolution::Discard)
    }

    pub fn alias(&mut self, alias: DeclId, original: DeclId) -> &mut Self {
        self.program.aliases.push(Alias { alias, original });
        self
    }

    pub fn satisfies(&mut self, interface: InterfaceId, concrete: DeclId) -> &mut Self {
        self.program.satisfactions.push(Satisfaction { interface, concrete });
        self
    }

    pub fn opaque_flow(
        &mut self,
        line: usize,
        column: usize,
        value_type: DeclId,
        context: OpaqueContext,
    ) -> &mut Self {
        let location = self.at(line, column);
        self.program.opaque_flows.push(OpaqueFlow {
            location,
            value_type,
            context,
        });
        self
    }

    pub fn build(self) -> Program {
        self.program
    }
}
