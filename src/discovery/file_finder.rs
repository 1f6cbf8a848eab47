use crate::config::Config;
use crate::error::{Result, UsageError};
use ignore::WalkBuilder;
use rayon::prelude::*;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Serialization of a fact document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactFormat {
    Json,
    Yaml,
}

impl FactFormat {
    /// Format of a discoverable fact document (`*.facts.json`, `*.facts.yaml`)
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        if file_name.ends_with(".facts.json") {
            Some(FactFormat::Json)
        } else if file_name.ends_with(".facts.yaml") || file_name.ends_with(".facts.yml") {
            Some(FactFormat::Yaml)
        } else {
            None
        }
    }
}

/// A fact document found on disk
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FactDocument {
    pub path: PathBuf,
}

/// Finds fact documents under the paths given on the command line
pub struct FileFinder {
    exclude: Vec<Regex>,
}

impl FileFinder {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            exclude: config.exclude_patterns()?,
        })
    }

    /// Explicit files are taken as they are; directories are walked for
    /// fact documents. The result is sorted and free of duplicates.
    pub fn find_documents(&self, paths: &[PathBuf]) -> Result<Vec<FactDocument>> {
        let mut documents = Vec::new();
        let mut directories = Vec::new();

        for path in paths {
            if path.is_file() {
                documents.push(FactDocument { path: path.clone() });
            } else if path.is_dir() {
                directories.push(path.clone());
            } else {
                return Err(UsageError::Read {
                    path: path.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
                });
            }
        }

        let found: Vec<FactDocument> = directories
            .par_iter()
            .flat_map(|dir| self.scan_directory(dir))
            .collect();
        documents.extend(found);

        documents.sort();
        documents.dedup();
        debug!("Found {} fact documents", documents.len());
        Ok(documents)
    }

    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude.iter().any(|glob| glob.is_match(&path_str))
    }

    /// Scan a single directory for fact documents
    fn scan_directory(&self, dir: &Path) -> Vec<FactDocument> {
        debug!("Scanning for fact documents in: {}", dir.display());

        let walker = WalkBuilder::new(dir)
            .hidden(true)           // Skip hidden files
            .git_ignore(true)       // Respect .gitignore
            .ignore(true)           // Respect .ignore files
            .parents(true)          // Check parent directories for ignore files
            .follow_links(false)
            .build();

        walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let path = entry.path();

                if self.should_exclude(path) {
                    trace!("Excluding: {}", path.display());
                    return None;
                }

                let format = FactFormat::from_path(path)?;
                trace!("Found {:?}: {}", format, path.display());
                Some(FactDocument {
                    path: path.to_path_buf(),
                })
            })
            .collect()
    }
}
