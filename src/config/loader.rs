use super::ignore::{compile_glob, IgnorePattern};
use crate::error::{Result, UsageError};
use crate::graph::KindMask;
use crate::model::DeclKind;
use crate::report::{ReportFormat, SortOrder};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for a usecount run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Declaration kinds that are reported
    pub checks: ChecksConfig,

    /// Root selection and heuristics
    pub analysis: AnalysisConfig,

    /// What counts as a reflective use of a type's fields
    pub reflection: ReflectionConfig,

    /// Presentation of the results
    pub report: ReportConfig,

    /// Ignore strings, each `glob:kind[,kind...]`
    pub ignore: Vec<String>,

    /// Globs of fact documents to skip during discovery
    pub exclude: Vec<String>,

    /// Write the usage graph to this file (overwritten)
    pub debug: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksConfig {
    pub consts: bool,
    pub fields: bool,
    pub funcs: bool,
    pub types: bool,
    pub vars: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Treat the input as a library: every exported symbol is a root
    pub whole_program: bool,

    /// Grant liveness to fields of types likely accessed through reflection
    pub consider_reflection: bool,

    /// Test functions are roots
    pub tests: bool,

    /// Scan files on the rayon pool
    pub parallel: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflectionConfig {
    /// Values converted to an `any`-typed slot count as reflective
    pub opaque_values: bool,

    /// Routines whose arguments are inspected by name
    pub routines: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,

    pub sort: SortOrder,

    /// Show only the first n problems; 0 shows all
    pub top: usize,

    /// Hide symbols used more often than this
    pub max_uses: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            checks: ChecksConfig::default(),
            analysis: AnalysisConfig::default(),
            reflection: ReflectionConfig::default(),
            report: ReportConfig::default(),
            ignore: vec![],
            exclude: vec!["**/target/**".to_string(), "**/.git/**".to_string()],
            debug: None,
        }
    }
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            consts: true,
            fields: true,
            funcs: true,
            types: true,
            vars: true,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            whole_program: false,
            consider_reflection: true,
            tests: false,
            parallel: false,
        }
    }
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            opaque_values: true,
            routines: [
                "encoding/json.Marshal",
                "encoding/json.Unmarshal",
                "encoding/xml.Marshal",
                "encoding/xml.Unmarshal",
                "reflect.ValueOf",
                "reflect.TypeOf",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Terminal,
            sort: SortOrder::Uses,
            top: 5,
            max_uses: None,
        }
    }
}

impl ChecksConfig {
    /// Kinds enabled for reporting
    pub fn mask(&self) -> KindMask {
        [
            (self.consts, DeclKind::Constant),
            (self.fields, DeclKind::Field),
            (self.funcs, DeclKind::Function),
            (self.types, DeclKind::Type),
            (self.vars, DeclKind::Variable),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .fold(KindMask::NONE, |mask, (_, kind)| mask.with(kind))
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| UsageError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let parse_error = |message: String| UsageError::Config {
            path: path.to_path_buf(),
            message,
        };

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let config: Config = match extension {
            "yml" | "yaml" => {
                serde_yaml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?
            }
            "toml" => toml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?,
            _ => {
                // Try YAML first, then TOML
                match serde_yaml::from_str(&contents) {
                    Ok(config) => config,
                    Err(_) => toml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?,
                }
            }
        };

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".usecount.yml",
            ".usecount.yaml",
            ".usecount.toml",
            "usecount.yml",
            "usecount.yaml",
            "usecount.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    /// Parse every ignore string; a malformed one fails the whole run
    pub fn ignore_patterns(&self) -> Result<Vec<IgnorePattern>> {
        let mut patterns = Vec::new();
        for value in &self.ignore {
            patterns.extend(IgnorePattern::parse_all(value)?);
        }
        Ok(patterns)
    }

    /// Compile the discovery exclude globs
    pub fn exclude_patterns(&self) -> Result<Vec<Regex>> {
        self.exclude.iter().map(|glob| compile_glob(glob)).collect()
    }
}
