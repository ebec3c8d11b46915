use serde::Serialize;
use serde_json::Value;
use shared_types::{DerivedSnapshot, Project, ScheduledProject, TeamMember};

use crate::store::Records;

pub fn build_prompt(context: &str, context_data: &Value, utterance: &str) -> String {
    let data = if context_data.is_null() {
        "Aucune donnée spécifique".to_string()
    } else {
        serde_json::to_string_pretty(context_data).unwrap_or_else(|_| context_data.to_string())
    };

    format!(
        r#"Tu es un assistant spécialisé dans la gestion de projets et d'équipes.
Tu es intégré dans un dashboard de gestion de projets appelé "SydoFlow".

RÔLE:
- Assistant pour la gestion de projets
- Expert en analyse de données de projets et d'équipes
- Conseiller en organisation et planification

CONTEXTE:
{}

DONNÉES DISPONIBLES:
{}

RÈGLES:
1. Réponds toujours en français
2. Sois concis mais informatif
3. Utilise des emojis appropriés
4. Propose des actions concrètes
5. Base tes réponses sur les données fournies
6. Si tu n'as pas assez d'informations, demande des précisions
7. Ne répète pas l'analyse déjà fournie, complète-la

FORMAT DE RÉPONSE:
- Utilise des listes à puces pour les points importants
- Mets en évidence les éléments critiques avec des emojis
- Propose des actions spécifiques quand c'est pertinent

Utilisateur: {}

Assistant:"#,
        context, data, utterance
    )
}

/// Summary of the locally computed answer, handed to the model as context
pub fn context_summary(local_text: &str, suggestions: &[String]) -> String {
    let mut context = format!("Analyse des données actuelles:\n{}\n", local_text);

    if !suggestions.is_empty() {
        context.push_str("\nSuggestions identifiées:\n");
        context.push_str(&suggestions.join("\n"));
        context.push('\n');
    }

    context
}

#[derive(Serialize)]
struct ContextData<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    projets: Option<&'a [Project]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    projets_urgents: Option<&'a [ScheduledProject]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    projets_en_retard: Option<&'a [ScheduledProject]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    equipe: Option<&'a [TeamMember]>,
    suggestions: &'a [String],
}

/// Pick the records worth sending along with the utterance
pub fn relevant_data(
    utterance: &str,
    records: &Records,
    snapshot: &DerivedSnapshot,
) -> Result<Value, serde_json::Error> {
    let text = utterance.to_lowercase();
    let mentions_projects = text.contains("projet") || text.contains("dossier");
    let mentions_team =
        text.contains("équipe") || text.contains("equipe") || text.contains("membre");

    let data = if mentions_projects {
        ContextData {
            projets: Some(records.projects.as_slice()),
            projets_urgents: Some(snapshot.urgent.as_slice()),
            projets_en_retard: Some(snapshot.overdue.as_slice()),
            equipe: None,
            suggestions: &snapshot.suggestions,
        }
    } else if mentions_team {
        ContextData {
            projets: None,
            projets_urgents: None,
            projets_en_retard: None,
            equipe: Some(records.members.as_slice()),
            suggestions: &snapshot.suggestions,
        }
    } else {
        ContextData {
            projets: Some(records.projects.as_slice()),
            projets_urgents: None,
            projets_en_retard: None,
            equipe: Some(records.members.as_slice()),
            suggestions: &snapshot.suggestions,
        }
    };

    serde_json::to_value(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsCalculator;
    use chrono::NaiveDate;
    use serde_json::json;

    fn snapshot(records: &Records) -> DerivedSnapshot {
        MetricsCalculator::default().snapshot(records, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    #[test]
    fn test_prompt_contains_every_part() {
        let prompt = build_prompt(
            "Analyse des données actuelles:\n3 projets",
            &json!({ "projets": [] }),
            "Que faire ?",
        );

        assert!(prompt.contains("CONTEXTE:\nAnalyse des données actuelles:\n3 projets"));
        assert!(prompt.contains("\"projets\": []"));
        assert!(prompt.ends_with("Utilisateur: Que faire ?\n\nAssistant:"));
    }

    #[test]
    fn test_prompt_without_data() {
        let prompt = build_prompt("ctx", &Value::Null, "salut");
        assert!(prompt.contains("DONNÉES DISPONIBLES:\nAucune donnée spécifique"));
    }

    #[test]
    fn test_context_summary_lists_suggestions() {
        let context = context_summary("📊 Projets", &["⚠️ 1 projet(s) en retard".to_string()]);
        assert_eq!(
            context,
            "Analyse des données actuelles:\n📊 Projets\n\nSuggestions identifiées:\n⚠️ 1 projet(s) en retard\n"
        );
    }

    #[test]
    fn test_relevant_data_by_topic() {
        let records = Records::default();
        let snapshot = snapshot(&records);

        let projects = relevant_data("mes projets", &records, &snapshot).unwrap();
        assert!(projects.get("projets_urgents").is_some());
        assert!(projects.get("equipe").is_none());

        let team = relevant_data("Les membres", &records, &snapshot).unwrap();
        assert!(team.get("equipe").is_some());
        assert!(team.get("projets").is_none());

        let both = relevant_data("résumé", &records, &snapshot).unwrap();
        assert!(both.get("projets").is_some() && both.get("equipe").is_some());
        assert!(both.get("suggestions").is_some());
    }
}
