use importers::{column_guide, csv_template};
use shared_types::{
    DatasetKind, DerivedSnapshot, LlmAvailability, LlmStatus, LoadError, LoadSummary, Project,
    ResponseKind, ResponseStyle, ScheduledProject, TeamMember,
};

use crate::intent::Query;

pub const APOLOGY: &str = "❌ Désolé, une erreur est survenue. Veuillez réessayer.";

const LOADING: &str = "🔄 Je charge encore vos données... Un petit moment ! 😊";

/// Text and follow-up prompts produced for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReply {
    pub text: String,
    pub suggestions: Vec<String>,
    pub kind: ResponseKind,
}

impl RenderedReply {
    fn new(text: String, suggestions: &[&str], kind: ResponseKind) -> Self {
        Self {
            text,
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            kind,
        }
    }
}

/// Turns a query and a snapshot into French text.
///
/// Output depends only on its inputs, so identical snapshots give identical
/// strings. The style only changes headings and closing remarks.
pub struct ResponseRenderer {
    style: ResponseStyle,
}

impl ResponseRenderer {
    pub fn new(style: ResponseStyle) -> Self {
        Self { style }
    }

    pub fn render(&self, query: &Query, snapshot: &DerivedSnapshot) -> RenderedReply {
        match query {
            Query::Greeting => self.greeting(snapshot),
            Query::Help => self.help(snapshot),
            Query::Template { dataset, guide } => self.template(*dataset, *guide),
            Query::ImportHelp => self.import_help(),
            Query::Projects => self.projects(snapshot),
            Query::Team => self.team(snapshot),
            Query::Deadlines => self.deadlines(snapshot),
            Query::Status => self.status(snapshot),
            Query::Summary => self.summary(snapshot),
            Query::ProjectSearch(projects) => self.project_details(projects, snapshot),
            Query::Member { member, projects } => self.member_details(member, projects),
        }
    }

    /// Reply when nothing in the utterance was recognized
    pub fn render_fallback(&self, snapshot: &DerivedSnapshot) -> RenderedReply {
        let mut text = format!(
            "{}\n\n",
            self.pick(
                "🤖 Hmm, je ne suis pas sûr de comprendre votre question ! 😅",
                "Je n'ai pas compris la question."
            )
        );
        text.push_str("Je peux vous aider avec :\n");
        text.push_str(&format!(
            "• Vos {} projets (tapez \"projets\")\n",
            snapshot.total_projects
        ));
        text.push_str(&format!(
            "• Votre équipe de {} membres (tapez \"équipe\")\n",
            snapshot.total_members
        ));
        text.push_str("• Les échéances importantes (tapez \"deadlines\")\n");
        text.push_str("• Un résumé complet (tapez \"résumé\")\n\n");
        text.push_str("Tapez \"aide\" pour voir toutes les commandes.");

        RenderedReply::new(
            text,
            &["projets", "équipe", "deadlines", "aide"],
            ResponseKind::Suggestion,
        )
    }

    pub fn render_loading(&self) -> RenderedReply {
        RenderedReply::new(LOADING.to_string(), &[], ResponseKind::Info)
    }

    pub fn render_llm_status(&self, status: &LlmStatus) -> RenderedReply {
        let available = status.availability == LlmAvailability::Available;

        let mut text = String::from("🧠 **Statut du LLM :**\n\n");
        text.push_str(&format!("• Disponible : {}\n", yes_no(available)));
        text.push_str(&format!("• Activé : {}\n", yes_no(status.enabled)));
        text.push_str(&format!("• Modèle : {}\n", status.model));
        text.push_str(&format!("• Température : {:.1}\n\n", status.temperature));

        if available {
            text.push_str("Le LLM est prêt à enrichir vos réponses.");
        } else {
            text.push_str("Pour activer le LLM, installez et démarrez Ollama sur votre machine.");
        }

        RenderedReply::new(text, &["projets", "résumé"], ResponseKind::Info)
    }

    pub fn render_refresh(&self, result: &Result<LoadSummary, LoadError>) -> RenderedReply {
        match result {
            Ok(summary) => {
                let mut text = format!(
                    "{}\n\n",
                    self.pick("🔄 **Données actualisées !** 😊", "🔄 **Données actualisées !**")
                );
                text.push_str(&format!("• {} projet(s) chargé(s)\n", summary.projects));
                text.push_str(&format!("• {} membre(s) d'équipe\n", summary.members));
                text.push_str(self.pick("\n✅ Les données sont maintenant à jour !", ""));

                RenderedReply::new(
                    text.trim_end().to_string(),
                    &["projets", "équipe", "deadlines"],
                    ResponseKind::Info,
                )
            }
            Err(err) => RenderedReply::new(
                format!("❌ Erreur lors de l'actualisation des données : {}", err),
                &["aide"],
                ResponseKind::Alert,
            ),
        }
    }

    fn greeting(&self, snapshot: &DerivedSnapshot) -> RenderedReply {
        let mut text = format!(
            "{}\n\n",
            self.pick(
                "👋 Salut ! Je suis votre assistant SydoFlow ! 😊",
                "Bonjour, je suis l'assistant SydoFlow."
            )
        );
        text.push_str(&format!(
            "Je peux vous aider à analyser vos {} projets et votre équipe de {} membres.\n\n",
            snapshot.total_projects, snapshot.total_members
        ));
        text.push_str("Que souhaitez-vous savoir ?");

        RenderedReply::new(
            text,
            &["projets", "équipe", "deadlines", "aide"],
            ResponseKind::Info,
        )
    }

    fn help(&self, snapshot: &DerivedSnapshot) -> RenderedReply {
        let mut text = format!(
            "{}\n\n",
            self.pick(
                "🤖 **Salut ! Je suis votre assistant SydoFlow !** 😊",
                "**Commandes disponibles**"
            )
        );
        text.push_str("📊 **Je peux analyser :**\n");
        text.push_str("• \"projets\" - État de vos projets\n");
        text.push_str("• \"équipe\" - Votre équipe et disponibilités\n");
        text.push_str("• \"deadlines\" - Échéances importantes\n");
        text.push_str("• \"statuts\" - Répartition par statut\n");
        text.push_str("• \"résumé\" - Vue d'ensemble\n\n");
        text.push_str("🔍 **Je peux chercher :**\n");
        text.push_str("• [Nom de projet ou de client] - Détails d'un projet\n");
        text.push_str("• [Nom de membre] - Infos sur un membre\n\n");
        text.push_str("🛠️ **Autres commandes :**\n");
        text.push_str("• \"template\" / \"template équipe\" - Modèle CSV à remplir\n");
        text.push_str("• \"csv\" - Comment charger vos données\n");
        text.push_str("• \"actualiser\" - Recharger les données\n");
        text.push_str("• \"llm\" - Statut de l'enrichissement IA\n\n");
        text.push_str(&format!(
            "Je connais vos {} projets et {} membres.",
            snapshot.total_projects, snapshot.total_members
        ));

        RenderedReply {
            text,
            suggestions: snapshot.suggestions.clone(),
            kind: ResponseKind::Suggestion,
        }
    }

    fn template(&self, dataset: DatasetKind, guide: bool) -> RenderedReply {
        let title = match dataset {
            DatasetKind::Projects => "Projets",
            DatasetKind::Team => "Équipe",
        };

        let mut text = format!(
            "📋 **Template CSV {} :**\n\n```csv\n{}\n```\n\n",
            title,
            csv_template(dataset)
        );
        if guide {
            text.push_str(&column_guide(dataset));
            text.push('\n');
        }
        text.push_str(
            "Copiez ce template, remplacez les données d'exemple par vos vraies données, puis importez-le.",
        );

        let other = match dataset {
            DatasetKind::Projects => "template équipe",
            DatasetKind::Team => "template projets",
        };
        RenderedReply::new(text, &[other, "template colonnes", "aide"], ResponseKind::Info)
    }

    fn import_help(&self) -> RenderedReply {
        let mut text = String::from("📁 **Chargement de données CSV**\n\n");
        text.push_str("Vous pouvez charger vos données de deux façons :\n\n");
        text.push_str(
            "1️⃣ **Remplacer les fichiers** `projets.csv` et `equipe.csv` du dossier de données, puis tapez \"actualiser\"\n",
        );
        text.push_str("2️⃣ **Importer** un tableau collé depuis le tableau de bord\n\n");
        text.push_str("Tapez \"template projets\" ou \"template équipe\" pour voir le format attendu.");

        RenderedReply::new(
            text,
            &["template projets", "template équipe", "actualiser"],
            ResponseKind::Info,
        )
    }

    fn projects(&self, snapshot: &DerivedSnapshot) -> RenderedReply {
        let mut text = format!(
            "{}\n\n",
            self.pick(
                "📊 **Voici l'état de vos projets !** 😊",
                "📊 **État des projets**"
            )
        );
        text.push_str("🎯 **Résumé rapide :**\n");
        text.push_str(&format!("• {} projet(s) au total\n", snapshot.total_projects));
        text.push_str(&format!(
            "• {} projet(s) en cours\n",
            snapshot.in_progress_projects
        ));
        text.push_str(&format!("• {} projet(s) urgent(s)\n", snapshot.urgent.len()));
        text.push_str(&format!(
            "• {} projet(s) en retard\n\n",
            snapshot.overdue.len()
        ));

        if !snapshot.urgent.is_empty() {
            text.push_str("🚨 **Projets urgents :**\n");
            for scheduled in &snapshot.urgent {
                text.push_str(&format!(
                    "• {} ({}) - {} jour(s) restant(s)\n",
                    scheduled.project.name, scheduled.project.client, scheduled.days_remaining
                ));
            }
            text.push('\n');
        }

        if !snapshot.overdue.is_empty() {
            text.push_str("⚠️ **Projets en retard :**\n");
            for scheduled in &snapshot.overdue {
                text.push_str(&overdue_line(scheduled));
            }
        }

        if snapshot.urgent.is_empty() && snapshot.overdue.is_empty() {
            text.push_str(self.pick(
                "✅ **Super !** Aucun projet en urgence pour le moment ! 🎉",
                "✅ Aucun projet en urgence.",
            ));
        }

        RenderedReply::new(
            text.trim_end().to_string(),
            &["équipe", "deadlines", "résumé"],
            ResponseKind::Analysis,
        )
    }

    fn team(&self, snapshot: &DerivedSnapshot) -> RenderedReply {
        let mut text = format!(
            "{}\n\n",
            self.pick("👥 **Voici votre équipe !** 😊", "👥 **Équipe**")
        );
        text.push_str("📊 **Statut général :**\n");
        text.push_str(&format!("• {} membre(s) au total\n", snapshot.total_members));
        text.push_str(&format!(
            "• {} membre(s) disponible(s)\n",
            snapshot.available_members.len()
        ));
        text.push_str(&format!(
            "• {} membre(s) surchargé(s)\n\n",
            snapshot.overloaded_members.len()
        ));

        if !snapshot.overloaded_members.is_empty() {
            text.push_str("⚠️ **Membres surchargés :**\n");
            for member in &snapshot.overloaded_members {
                text.push_str(&format!(
                    "• {} ({}) - {} projet(s)\n",
                    member.name, member.role, member.active_projects
                ));
            }
            text.push('\n');
        }

        if snapshot.available_members.is_empty() {
            text.push_str("Aucun membre disponible actuellement.");
        } else {
            text.push_str("✅ **Membres disponibles :**\n");
            for member in &snapshot.available_members {
                text.push_str(&format!("• {} - {}\n", member.name, member.specialty));
            }
        }

        RenderedReply::new(
            text.trim_end().to_string(),
            &["projets", "deadlines", "résumé"],
            ResponseKind::Info,
        )
    }

    fn deadlines(&self, snapshot: &DerivedSnapshot) -> RenderedReply {
        let mut text = format!(
            "{}\n\n",
            self.pick("⏰ **Échéances à surveiller !** 👀", "⏰ **Échéances**")
        );

        if !snapshot.overdue.is_empty() {
            text.push_str("🚨 **Projets en retard :**\n");
            for scheduled in &snapshot.overdue {
                text.push_str(&overdue_line(scheduled));
            }
            text.push('\n');
        }

        if !snapshot.urgent.is_empty() {
            text.push_str(&format!(
                "⚠️ **Projets urgents (≤{} jours) :**\n",
                snapshot.urgent_within_days
            ));
            for scheduled in &snapshot.urgent {
                text.push_str(&format!(
                    "• {} ({}) - {} jour(s)\n",
                    scheduled.project.name, scheduled.project.client, scheduled.days_remaining
                ));
            }
        }

        if snapshot.overdue.is_empty() && snapshot.urgent.is_empty() {
            text.push_str(self.pick(
                "🎉 **Parfait !** Aucune échéance critique pour le moment ! 😌",
                "Aucune échéance critique.",
            ));
        }

        let kind = if snapshot.overdue.is_empty() {
            ResponseKind::Info
        } else {
            ResponseKind::Alert
        };
        RenderedReply::new(
            text.trim_end().to_string(),
            &["projets", "équipe", "résumé"],
            kind,
        )
    }

    fn status(&self, snapshot: &DerivedSnapshot) -> RenderedReply {
        let mut text = format!(
            "{}\n\n",
            self.pick(
                "📈 **Répartition de vos projets :** 📊",
                "📈 **Répartition par statut**"
            )
        );

        for entry in &snapshot.status_histogram {
            text.push_str(&format!(
                "{} **{}** : {} projet(s)\n",
                status_emoji(&entry.status),
                entry.status,
                entry.count
            ));
        }

        text.push_str(&format!(
            "\n📊 **Progression moyenne :** {}%",
            snapshot.average_completion
        ));
        if self.style == ResponseStyle::Friendly {
            text.push(' ');
            text.push_str(progress_remark(snapshot.average_completion));
        }

        RenderedReply::new(text, &["projets", "équipe", "deadlines"], ResponseKind::Info)
    }

    fn summary(&self, snapshot: &DerivedSnapshot) -> RenderedReply {
        let mut text = format!(
            "{}\n\n",
            self.pick(
                "📋 **Résumé de votre situation !** 😊",
                "📋 **Résumé**"
            )
        );
        text.push_str("🎯 **En un coup d'œil :**\n");
        text.push_str(&format!(
            "• {} projet(s) au total, {} en cours\n",
            snapshot.total_projects, snapshot.in_progress_projects
        ));
        text.push_str(&format!(
            "• {} membre(s) d'équipe, {} disponible(s)\n",
            snapshot.total_members,
            snapshot.available_members.len()
        ));
        text.push_str(&format!(
            "• {} retard(s), {} urgent(s)\n",
            snapshot.overdue.len(),
            snapshot.urgent.len()
        ));
        text.push_str(&format!(
            "• Progression moyenne : {}%\n\n",
            snapshot.average_completion
        ));

        if snapshot.suggestions.is_empty() {
            text.push_str(self.pick(
                "🎉 **Tout va bien !** Aucune urgence particulière ! 😌",
                "Aucune urgence particulière.",
            ));
        } else {
            text.push_str("🎯 **Actions recommandées :**\n");
            for suggestion in &snapshot.suggestions {
                text.push_str(&format!("• {}\n", suggestion));
            }
        }

        RenderedReply {
            text: text.trim_end().to_string(),
            suggestions: snapshot.suggestions.clone(),
            kind: ResponseKind::Analysis,
        }
    }

    fn project_details(&self, projects: &[Project], snapshot: &DerivedSnapshot) -> RenderedReply {
        let blocks: Vec<String> = projects
            .iter()
            .map(|project| self.project_block(project, snapshot))
            .collect();

        RenderedReply::new(
            blocks.join("\n\n"),
            &["projets", "équipe", "deadlines"],
            ResponseKind::Info,
        )
    }

    fn project_block(&self, project: &Project, snapshot: &DerivedSnapshot) -> String {
        let days = project.days_until_deadline(snapshot.today);

        let mut text = format!("📁 **{}**", project.name);
        if self.style == ResponseStyle::Friendly {
            let mood = match days {
                Some(d) if d < 0 => "😱",
                Some(d) if d <= snapshot.urgent_within_days => "⚠️",
                _ => "😊",
            };
            text.push(' ');
            text.push_str(mood);
        }
        text.push_str("\n\n");

        text.push_str(&format!("👤 **Client :** {}\n", project.client));
        text.push_str(&format!("📊 **Statut :** {}\n", project.status));
        text.push_str(&format!("⚡ **Priorité :** {}\n", project.priority.label()));
        text.push_str(&format!("👨‍💼 **Responsable :** {}\n", project.owner));
        text.push_str(&format!("📈 **Progression :** {}%\n", project.completion));

        match (project.deadline, days) {
            (Some(deadline), Some(days)) => text.push_str(&format!(
                "📅 **Échéance :** {} ({} jour(s))\n",
                deadline.format("%Y-%m-%d"),
                days
            )),
            _ => text.push_str("📅 **Échéance :** Non définie\n"),
        }

        if !project.description.is_empty() {
            text.push_str(&format!("📝 **Description :** {}\n", project.description));
        }

        text.trim_end().to_string()
    }

    fn member_details(&self, member: &TeamMember, projects: &[Project]) -> RenderedReply {
        let mut text = format!("👤 **{}**\n\n", member.name);
        text.push_str(&format!("🎯 **Rôle :** {}\n", member.role));
        text.push_str(&format!(
            "📊 **Disponibilité :** {}\n",
            member.availability.label()
        ));
        text.push_str(&format!("🛠️ **Spécialité :** {}\n", member.specialty));
        text.push_str(&format!(
            "📁 **Projets actifs :** {}\n\n",
            member.active_projects
        ));

        if projects.is_empty() {
            text.push_str("📋 Aucun projet en charge actuellement.");
        } else {
            text.push_str("📋 **Projets en charge :**\n");
            for project in projects {
                text.push_str(&format!("• {} ({}%)\n", project.name, project.completion));
            }
        }

        RenderedReply::new(
            text.trim_end().to_string(),
            &["projets", "équipe", "deadlines"],
            ResponseKind::Info,
        )
    }

    fn pick<'a>(&self, friendly: &'a str, plain: &'a str) -> &'a str {
        match self.style {
            ResponseStyle::Friendly => friendly,
            ResponseStyle::Plain => plain,
        }
    }
}

impl Default for ResponseRenderer {
    fn default() -> Self {
        Self::new(ResponseStyle::default())
    }
}

fn overdue_line(scheduled: &ScheduledProject) -> String {
    format!(
        "• {} - {} jour(s) de retard\n",
        scheduled.project.name,
        -scheduled.days_remaining
    )
}

fn status_emoji(status: &str) -> &'static str {
    match status {
        "En cours" => "🔄",
        "Review" => "👀",
        "Planifié" => "📅",
        "Terminé" | "Done" => "✅",
        _ => "📋",
    }
}

fn progress_remark(average: u8) -> &'static str {
    if average >= 80 {
        "🎉 Excellent !"
    } else if average >= 60 {
        "👍 Bien avancé !"
    } else {
        "💪 On y travaille !"
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "✅ Oui"
    } else {
        "❌ Non"
    }
}
