mod file_finder;

pub use file_finder::{FactDocument, FactFormat, FileFinder};
