mod ignore;
mod loader;

pub use ignore::{compile_glob, IgnorePattern};
pub use loader::{AnalysisConfig, ChecksConfig, Config, ReflectionConfig, ReportConfig};
