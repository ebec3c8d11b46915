mod csv_parser;
mod date_parser;
mod processors;
pub mod templates;

pub use csv_parser::CsvParser;
pub use date_parser::parse_deadline;

use shared_types::{DatasetKind, LoadError, Project, TeamMember};

/// Turns raw delimited text into project and team records
pub struct TabularImporter {
    csv_parser: CsvParser,
}

impl TabularImporter {
    pub fn new() -> Self {
        Self {
            csv_parser: CsvParser::new(),
        }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            csv_parser: CsvParser::with_delimiter(delimiter),
        }
    }

    pub fn import_projects(&self, content: &[u8]) -> Result<Vec<Project>, LoadError> {
        let rows = self.csv_parser.parse_rows(DatasetKind::Projects, content)?;
        let total = rows.len();

        let projects: Vec<Project> = rows
            .iter()
            .filter_map(|row| processors::process_project(row))
            .collect();

        if projects.len() < total {
            tracing::debug!(
                "Skipped {} project row(s) without a name",
                total - projects.len()
            );
        }

        Ok(projects)
    }

    pub fn import_team(&self, content: &[u8]) -> Result<Vec<TeamMember>, LoadError> {
        let rows = self.csv_parser.parse_rows(DatasetKind::Team, content)?;
        let total = rows.len();

        let members: Vec<TeamMember> = rows
            .iter()
            .filter_map(|row| processors::process_member(row))
            .collect();

        if members.len() < total {
            tracing::debug!(
                "Skipped {} team row(s) without a name",
                total - members.len()
            );
        }

        Ok(members)
    }
}

impl Default for TabularImporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Availability;

    const PROJECTS: &str = "id,name,client,status,priority,deadline,owner,completion,description
1,Refonte Site Web Luxe,Maison Luxe,En cours,Haute,2024-03-01,Sarah Martin,60,Nouveau site
2,Audit SEO,Digital Plus,Review,Moyenne,2024-03-05,Alex,90,Audit
3,Application Mobile,TechStart,Planifié,Basse,2024-04-10,Alex,10
4,,Sans Nom,En cours,Haute,2024-03-01,Alex,10,Sans nom
";

    const TEAM: &str = "name,role,availability,specialty,active_projects
Sarah Martin,Chef de projet,Disponible,Gestion de projet,2
Alex,Développeur,Occupé,Backend,1
";

    #[test]
    fn test_import_projects_drops_short_and_nameless_rows() {
        let projects = TabularImporter::new()
            .import_projects(PROJECTS.as_bytes())
            .unwrap();

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "Refonte Site Web Luxe");
        assert_eq!(projects[1].client, "Digital Plus");
    }

    #[test]
    fn test_import_team() {
        let members = TabularImporter::new().import_team(TEAM.as_bytes()).unwrap();

        assert_eq!(members.len(), 2);
        assert_eq!(members[0].active_projects, 2);
        assert_eq!(members[1].availability, Availability::Busy);
    }

    #[test]
    fn test_team_file_is_not_a_projects_file() {
        let err = TabularImporter::new()
            .import_projects(TEAM.as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Malformed {
                dataset: DatasetKind::Projects,
                ..
            }
        ));
    }
}
