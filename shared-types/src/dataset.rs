use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// The two tables the assistant reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetKind {
    Projects,
    Team,
}

impl DatasetKind {
    /// Fixed column order expected in the tabular source
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::Projects => &[
                "id",
                "name",
                "client",
                "status",
                "priority",
                "deadline",
                "owner",
                "completion",
                "description",
            ],
            DatasetKind::Team => &[
                "name",
                "role",
                "availability",
                "specialty",
                "active_projects",
            ],
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "projects" | "projets" | "projet" | "project" => Some(DatasetKind::Projects),
            "team" | "equipe" | "équipe" | "members" => Some(DatasetKind::Team),
            _ => None,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Projects => write!(f, "projects"),
            DatasetKind::Team => write!(f, "team"),
        }
    }
}

/// Counts reported after a successful load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
pub struct LoadSummary {
    pub projects: usize,
    pub members: usize,
}

/// Errors raised while loading tabular data
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Source unreachable: {0}")]
    Unreachable(String),

    #[error("Malformed {dataset} data: {reason}")]
    Malformed { dataset: DatasetKind, reason: String },
}

/// Request to replace one table with pasted CSV text
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ImportCsvRequest {
    pub dataset: DatasetKind,
    pub csv: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dataset_kind() {
        assert_eq!(DatasetKind::parse("Projets"), Some(DatasetKind::Projects));
        assert_eq!(DatasetKind::parse("équipe"), Some(DatasetKind::Team));
        assert_eq!(DatasetKind::parse("invoices"), None);
    }

    #[test]
    fn test_column_counts() {
        assert_eq!(DatasetKind::Projects.columns().len(), 9);
        assert_eq!(DatasetKind::Team.columns().len(), 5);
    }

    #[test]
    fn test_load_error_message() {
        let err = LoadError::Malformed {
            dataset: DatasetKind::Team,
            reason: "missing header".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed team data: missing header");
    }
}
