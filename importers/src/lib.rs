//! Importers Crate
//!
//! This crate turns the dashboard's tabular exports into typed records. It is
//! shared by the assistant library and anything else that needs to read the
//! projects and team tables.
//!
//! # Architecture
//!
//! - **Types**: `Project`, `TeamMember` and `LoadError` live in the `shared-types` crate
//! - **Implementations**: CSV splitting, cell coercion and templates live here
//!
//! # Example
//!
//! ```rust,ignore
//! use importers::TabularImporter;
//!
//! let importer = TabularImporter::new();
//! let projects = importer.import_projects(&std::fs::read("projets.csv")?)?;
//! ```

pub mod tabular;

// Re-export commonly used types
pub use tabular::templates::{column_guide, csv_template};
pub use tabular::{parse_deadline, TabularImporter};
