use crate::tabular::date_parser::parse_deadline;
use shared_types::{Availability, Priority, Project, TeamMember};

/// Leading-digit integer coercion: "75" and "75%" give 75, garbage gives 0.
pub fn parse_count(value: &str) -> u32 {
    let digits: String = value
        .trim()
        .trim_start_matches('+')
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().unwrap_or(0)
}

pub fn parse_completion(value: &str) -> u8 {
    parse_count(value).min(100) as u8
}

/// Build a project from a row in fixed column order. Returns `None` when the
/// project name is blank.
pub fn process_project(row: &[String]) -> Option<Project> {
    let field = |i: usize| row.get(i).map(|s| s.trim().to_string()).unwrap_or_default();

    let name = field(1);
    if name.is_empty() {
        return None;
    }

    Some(Project {
        id: field(0),
        name,
        client: field(2),
        status: field(3),
        priority: Priority::from_label(&field(4)),
        deadline: parse_deadline(&field(5)),
        owner: field(6),
        completion: parse_completion(&field(7)),
        description: field(8),
    })
}

/// Build a team member from a row in fixed column order. Returns `None` when
/// the member name is blank.
pub fn process_member(row: &[String]) -> Option<TeamMember> {
    let field = |i: usize| row.get(i).map(|s| s.trim().to_string()).unwrap_or_default();

    let name = field(0);
    if name.is_empty() {
        return None;
    }

    Some(TeamMember {
        name,
        role: field(1),
        availability: Availability::from_label(&field(2)),
        specialty: field(3),
        active_projects: parse_count(&field(4)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_count_coercion() {
        assert_eq!(parse_count("3"), 3);
        assert_eq!(parse_count(" 75% "), 75);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("-4"), 0);
    }

    #[test]
    fn test_completion_is_clamped() {
        assert_eq!(parse_completion("140"), 100);
        assert_eq!(parse_completion("90"), 90);
    }

    #[test]
    fn test_process_project() {
        let project = process_project(&row(&[
            "1",
            "Audit SEO",
            "Digital Plus",
            "En cours",
            "Haute",
            "2024-02-15",
            "Alex",
            "90",
            "Audit complet",
        ]))
        .unwrap();

        assert_eq!(project.id, "1");
        assert_eq!(project.priority, Priority::High);
        assert_eq!(project.deadline, NaiveDate::from_ymd_opt(2024, 2, 15));
        assert_eq!(project.completion, 90);
        assert_eq!(project.owner, "Alex");
    }

    #[test]
    fn test_project_with_bad_values_defaults() {
        let project = process_project(&row(&[
            "7", "Refonte", "Luxe", "Planifié", "??", "demain", "", "n/a", "",
        ]))
        .unwrap();

        assert_eq!(project.priority, Priority::Medium);
        assert!(project.deadline.is_none());
        assert_eq!(project.completion, 0);
    }

    #[test]
    fn test_blank_names_are_rejected() {
        assert!(process_project(&row(&["1", "  ", "c", "s", "p", "", "", "", ""])).is_none());
        assert!(process_member(&row(&["", "Dev", "Disponible", "Web", "1"])).is_none());
    }

    #[test]
    fn test_process_member() {
        let member =
            process_member(&row(&["Sarah Martin", "Designer", "Occupé", "UI/UX", "2"])).unwrap();
        assert_eq!(member.availability, Availability::Busy);
        assert_eq!(member.active_projects, 2);
    }
}
