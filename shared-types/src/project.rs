use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Project priority, ordered from least to most pressing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Parse a priority label as written in the spreadsheets (French or English).
    /// Unknown labels fall back to `Medium`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "haute" | "high" | "élevée" | "elevee" | "urgent" => Priority::High,
            "basse" | "low" | "faible" => Priority::Low,
            _ => Priority::Medium,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Basse",
            Priority::Medium => "Moyenne",
            Priority::High => "Haute",
        }
    }
}

/// Project row loaded from the projects table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client: String,
    pub status: String,
    pub priority: Priority,
    pub deadline: Option<NaiveDate>,
    /// Name of the responsible team member. Not enforced against the team table.
    pub owner: String,
    /// Completion percentage, always within 0..=100
    pub completion: u8,
    pub description: String,
}

impl Project {
    /// Whole days between `today` and the deadline; negative once the deadline has passed.
    pub fn days_until_deadline(&self, today: NaiveDate) -> Option<i64> {
        self.deadline.map(|deadline| (deadline - today).num_days())
    }

    pub fn has_status(&self, status: &str) -> bool {
        self.status.trim().to_lowercase() == status.trim().to_lowercase()
    }
}

/// Response containing a list of projects
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(deadline: Option<NaiveDate>) -> Project {
        Project {
            id: "1".to_string(),
            name: "Audit SEO".to_string(),
            client: "Digital Plus".to_string(),
            status: "En cours".to_string(),
            priority: Priority::High,
            deadline,
            owner: "Alex".to_string(),
            completion: 90,
            description: String::new(),
        }
    }

    #[test]
    fn test_priority_labels() {
        assert_eq!(Priority::from_label("Haute"), Priority::High);
        assert_eq!(Priority::from_label(" low "), Priority::Low);
        assert_eq!(Priority::from_label("Moyenne"), Priority::Medium);
        assert_eq!(Priority::from_label("???"), Priority::Medium);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_days_until_deadline() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let due = project(NaiveDate::from_ymd_opt(2024, 3, 12));
        assert_eq!(due.days_until_deadline(today), Some(2));

        let late = project(NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(late.days_until_deadline(today), Some(-9));

        assert_eq!(project(None).days_until_deadline(today), None);
    }

    #[test]
    fn test_status_comparison_ignores_case() {
        let p = project(None);
        assert!(p.has_status("en cours"));
        assert!(p.has_status("EN COURS "));
        assert!(!p.has_status("Terminé"));
    }
}
