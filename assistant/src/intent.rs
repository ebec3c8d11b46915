use shared_types::{DatasetKind, IntentKind, Project, TeamMember};

use crate::store::Records;

/// Intents with a side effect on the assistant itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    LlmStatus,
    Refresh,
}

/// Intents answered purely from the derived snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Greeting,
    Help,
    Template { dataset: DatasetKind, guide: bool },
    ImportHelp,
    Projects,
    Team,
    Deadlines,
    Status,
    Summary,
    ProjectSearch(Vec<Project>),
    Member {
        member: TeamMember,
        projects: Vec<Project>,
    },
}

impl Query {
    pub fn kind(&self) -> IntentKind {
        match self {
            Query::Greeting => IntentKind::Greeting,
            Query::Help => IntentKind::Help,
            Query::Template { .. } => IntentKind::Template,
            Query::ImportHelp => IntentKind::ImportHelp,
            Query::Projects => IntentKind::Projects,
            Query::Team => IntentKind::Team,
            Query::Deadlines => IntentKind::Deadlines,
            Query::Status => IntentKind::Status,
            Query::Summary => IntentKind::Summary,
            Query::ProjectSearch(_) => IntentKind::ProjectSearch,
            Query::Member { .. } => IntentKind::MemberLookup,
        }
    }

    /// Help, import instructions and templates are static text; everything else may be enriched
    pub fn is_augmentable(&self) -> bool {
        !matches!(self, Query::Help | Query::Template { .. } | Query::ImportHelp)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Command(Command),
    Query(Query),
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::Command(Command::LlmStatus) => IntentKind::LlmStatus,
            Intent::Command(Command::Refresh) => IntentKind::Refresh,
            Intent::Query(query) => query.kind(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Greeting,
    Help,
    Template,
    LlmStatus,
    Refresh,
    ImportHelp,
    Projects,
    Team,
    Deadlines,
    Status,
    Summary,
}

/// Checked in order; the first rule with a matching keyword wins
const RULES: &[(Rule, &[&str])] = &[
    (Rule::Greeting, &["bonjour", "salut", "hello", "coucou", "hey"]),
    (Rule::Help, &["aide", "help", "commandes", "commands"]),
    (Rule::Template, &["template"]),
    (Rule::LlmStatus, &["llm", "ollama"]),
    (Rule::Refresh, &["actualiser", "refresh", "recharger", "reload"]),
    // after refresh: "recharger" contains "charger"
    (Rule::ImportHelp, &["csv", "charger", "importer"]),
    (Rule::Projects, &["projet", "project", "dossier"]),
    (
        Rule::Team,
        &["équipe", "equipe", "team", "membre", "member", "collaborateur"],
    ),
    (
        Rule::Deadlines,
        &["deadline", "échéance", "echeance", "urgent", "retard", "overdue"],
    ),
    (Rule::Status, &["statut", "status", "avancement", "progression"]),
    (
        Rule::Summary,
        &["résumé", "resume", "synthèse", "synthese", "summary", "overview"],
    ),
];

const TEAM_TEMPLATE_WORDS: &[&str] = &["équipe", "equipe", "team"];
const COLUMN_GUIDE_WORDS: &[&str] = &["excel", "xlsx", "colonnes", "columns"];

/// Keyword table plus a fallback search over project and member names
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, utterance: &str, records: &Records) -> Option<Intent> {
        let text = normalize(utterance);
        if text.is_empty() {
            return None;
        }

        for (rule, keywords) in RULES {
            if contains_any(&text, keywords) {
                return Some(intent_for(*rule, &text));
            }
        }

        search_entities(&text, records).map(Intent::Query)
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn intent_for(rule: Rule, text: &str) -> Intent {
    match rule {
        Rule::Greeting => Intent::Query(Query::Greeting),
        Rule::Help => Intent::Query(Query::Help),
        Rule::Template => {
            let dataset = if contains_any(text, TEAM_TEMPLATE_WORDS) {
                DatasetKind::Team
            } else {
                DatasetKind::Projects
            };
            Intent::Query(Query::Template {
                dataset,
                guide: contains_any(text, COLUMN_GUIDE_WORDS),
            })
        }
        Rule::LlmStatus => Intent::Command(Command::LlmStatus),
        Rule::Refresh => Intent::Command(Command::Refresh),
        Rule::ImportHelp => Intent::Query(Query::ImportHelp),
        Rule::Projects => Intent::Query(Query::Projects),
        Rule::Team => Intent::Query(Query::Team),
        Rule::Deadlines => Intent::Query(Query::Deadlines),
        Rule::Status => Intent::Query(Query::Status),
        Rule::Summary => Intent::Query(Query::Summary),
    }
}

fn search_entities(text: &str, records: &Records) -> Option<Query> {
    let by_name: Vec<Project> = records
        .projects
        .iter()
        .filter(|p| p.name.to_lowercase().contains(text))
        .cloned()
        .collect();
    if !by_name.is_empty() {
        return Some(Query::ProjectSearch(by_name));
    }

    let by_client: Vec<Project> = records
        .projects
        .iter()
        .filter(|p| p.client.to_lowercase().contains(text))
        .cloned()
        .collect();
    if !by_client.is_empty() {
        return Some(Query::ProjectSearch(by_client));
    }

    let member = records
        .members
        .iter()
        .find(|m| m.name.to_lowercase().contains(text))?;

    let member_name = member.name.to_lowercase();
    let projects = records
        .projects
        .iter()
        .filter(|p| p.owner.to_lowercase().contains(&member_name))
        .cloned()
        .collect();

    Some(Query::Member {
        member: member.clone(),
        projects,
    })
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Lower-case, strip leading and trailing punctuation, collapse inner whitespace
fn normalize(utterance: &str) -> String {
    utterance
        .to_lowercase()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Availability, Priority};

    fn project(name: &str, client: &str, owner: &str) -> Project {
        Project {
            id: name.to_string(),
            name: name.to_string(),
            client: client.to_string(),
            status: "En cours".to_string(),
            priority: Priority::High,
            deadline: None,
            owner: owner.to_string(),
            completion: 50,
            description: String::new(),
        }
    }

    fn records() -> Records {
        Records {
            projects: vec![
                project("Refonte Site Web Luxe", "Maison Luxe", "Sarah Martin"),
                project("Audit SEO", "Digital Plus", "Alex Bernard"),
                project("Campagne Printemps", "Digital Plus", "Sarah Martin"),
            ],
            members: vec![
                TeamMember {
                    name: "Sarah Martin".to_string(),
                    role: "Chef de projet".to_string(),
                    specialty: "Gestion".to_string(),
                    availability: Availability::Available,
                    active_projects: 2,
                },
                TeamMember {
                    name: "Julie Petit".to_string(),
                    role: "Designer".to_string(),
                    specialty: "UI".to_string(),
                    availability: Availability::Busy,
                    active_projects: 0,
                },
            ],
        }
    }

    fn kind(utterance: &str) -> Option<IntentKind> {
        IntentClassifier::new()
            .classify(utterance, &records())
            .map(|intent| intent.kind())
    }

    #[test]
    fn test_keywords_ignore_case_and_punctuation() {
        assert_eq!(kind("Bonjour !"), Some(IntentKind::Greeting));
        assert_eq!(kind("HELLO"), Some(IntentKind::Greeting));
        assert_eq!(kind("  deadlines?? "), Some(IntentKind::Deadlines));
        assert_eq!(kind("Quel est le STATUT ?"), Some(IntentKind::Status));
        assert_eq!(kind("Résumé, svp."), Some(IntentKind::Summary));
        assert_eq!(kind("Montre l'équipe"), Some(IntentKind::Team));
        assert_eq!(kind("liste des projets"), Some(IntentKind::Projects));
    }

    #[test]
    fn test_first_declared_rule_wins() {
        // Greeting is declared before projects
        assert_eq!(kind("bonjour, mes projets ?"), Some(IntentKind::Greeting));
        // Template is declared before team
        assert_eq!(kind("template équipe"), Some(IntentKind::Template));
        // Refresh is declared before projects
        assert_eq!(kind("recharger les projets"), Some(IntentKind::Refresh));
        // Template is declared before import instructions
        assert_eq!(kind("template csv"), Some(IntentKind::Template));
    }

    #[test]
    fn test_import_instructions() {
        assert_eq!(kind("charger un CSV"), Some(IntentKind::ImportHelp));
        assert_eq!(kind("comment importer mes projets ?"), Some(IntentKind::ImportHelp));
        assert_eq!(kind("recharger"), Some(IntentKind::Refresh));
        assert!(!Query::ImportHelp.is_augmentable());
    }

    #[test]
    fn test_commands() {
        let classifier = IntentClassifier::new();
        assert_eq!(
            classifier.classify("statut ollama", &records()),
            Some(Intent::Command(Command::LlmStatus))
        );
        assert_eq!(
            classifier.classify("Actualiser", &records()),
            Some(Intent::Command(Command::Refresh))
        );
    }

    #[test]
    fn test_template_variants() {
        let classifier = IntentClassifier::new();
        assert_eq!(
            classifier.classify("template", &records()),
            Some(Intent::Query(Query::Template {
                dataset: DatasetKind::Projects,
                guide: false
            }))
        );
        assert_eq!(
            classifier.classify("template team colonnes", &records()),
            Some(Intent::Query(Query::Template {
                dataset: DatasetKind::Team,
                guide: true
            }))
        );
    }

    #[test]
    fn test_project_name_search() {
        let intent = IntentClassifier::new()
            .classify("site web", &records())
            .unwrap();
        match intent {
            Intent::Query(Query::ProjectSearch(projects)) => {
                assert_eq!(projects.len(), 1);
                assert_eq!(projects[0].name, "Refonte Site Web Luxe");
            }
            other => panic!("unexpected intent: {:?}", other),
        }
    }

    #[test]
    fn test_client_search() {
        let intent = IntentClassifier::new()
            .classify("Digital Plus", &records())
            .unwrap();
        match intent {
            Intent::Query(Query::ProjectSearch(projects)) => assert_eq!(projects.len(), 2),
            other => panic!("unexpected intent: {:?}", other),
        }
    }

    #[test]
    fn test_member_search_collects_owned_projects() {
        let intent = IntentClassifier::new()
            .classify("sarah", &records())
            .unwrap();
        match intent {
            Intent::Query(Query::Member { member, projects }) => {
                assert_eq!(member.name, "Sarah Martin");
                assert_eq!(projects.len(), 2);
            }
            other => panic!("unexpected intent: {:?}", other),
        }

        let intent = IntentClassifier::new()
            .classify("Julie", &records())
            .unwrap();
        assert!(matches!(
            intent,
            Intent::Query(Query::Member { ref projects, .. }) if projects.is_empty()
        ));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(kind(""), None);
        assert_eq!(kind("   ?! "), None);
        assert_eq!(kind("zzz inconnu"), None);
    }

    #[test]
    fn test_substring_inside_longer_word_matches() {
        // "hey" inside "they" still reads as a greeting
        assert_eq!(kind("they said"), Some(IntentKind::Greeting));
    }

    #[test]
    fn test_augmentable_queries() {
        assert!(Query::Deadlines.is_augmentable());
        assert!(!Query::Help.is_augmentable());
        assert!(!Query::Template {
            dataset: DatasetKind::Team,
            guide: false
        }
        .is_augmentable());
    }
}
