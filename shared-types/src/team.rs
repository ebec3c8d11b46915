use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Team member availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    Available,
    Busy,
    OnLeave,
    InMeeting,
    Unspecified,
}

impl Availability {
    /// Parse an availability label (French or English, any case).
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "disponible" | "available" | "libre" => Availability::Available,
            "occupé" | "occupe" | "busy" => Availability::Busy,
            "absent" | "en congé" | "en conge" | "congé" | "on leave" | "on-leave" => {
                Availability::OnLeave
            }
            "en réunion" | "en reunion" | "réunion" | "in meeting" | "in-meeting" => {
                Availability::InMeeting
            }
            _ => Availability::Unspecified,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Availability::Available => "Disponible",
            Availability::Busy => "Occupé",
            Availability::OnLeave => "Absent",
            Availability::InMeeting => "En réunion",
            Availability::Unspecified => "Non renseignée",
        }
    }
}

/// Team member row loaded from the team table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct TeamMember {
    /// Also the join key used by `Project::owner`
    pub name: String,
    pub role: String,
    pub specialty: String,
    pub availability: Availability,
    /// Counter supplied by the spreadsheet, not recomputed from project owners
    pub active_projects: u32,
}

/// Response containing the team
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct TeamResponse {
    pub members: Vec<TeamMember>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_labels() {
        assert_eq!(Availability::from_label("Disponible"), Availability::Available);
        assert_eq!(Availability::from_label("OCCUPÉ"), Availability::Busy);
        assert_eq!(Availability::from_label("En congé"), Availability::OnLeave);
        assert_eq!(Availability::from_label("in meeting"), Availability::InMeeting);
        assert_eq!(Availability::from_label(""), Availability::Unspecified);
    }

    #[test]
    fn test_availability_serializes_kebab_case() {
        let json = serde_json::to_string(&Availability::OnLeave).unwrap();
        assert_eq!(json, "\"on-leave\"");
    }
}
