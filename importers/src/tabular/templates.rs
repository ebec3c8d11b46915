use shared_types::DatasetKind;

const PROJECT_SAMPLE_ROWS: &str = "1,Exemple Projet,Client ABC,En cours,Haute,2024-02-15,Jean Dupont,75,Description du projet\n\
2,Autre Projet,Client XYZ,Planifié,Moyenne,2024-02-20,Marie Martin,25,Autre description";

const TEAM_SAMPLE_ROWS: &str = "Jean Dupont,Chef de projet,Disponible,Gestion de projet,2\n\
Marie Martin,Développeur,Occupé,Développement web,1\n\
Pierre Durand,Designer,Disponible,UI/UX Design,0";

/// CSV text with the expected header and two or three sample rows
pub fn csv_template(dataset: DatasetKind) -> String {
    let rows = match dataset {
        DatasetKind::Projects => PROJECT_SAMPLE_ROWS,
        DatasetKind::Team => TEAM_SAMPLE_ROWS,
    };

    format!("{}\n{}", dataset.columns().join(","), rows)
}

const PROJECT_COLUMNS: &[(&str, &str)] = &[
    ("id", "Identifiant unique"),
    ("name", "Nom du projet"),
    ("client", "Nom du client"),
    ("status", "En cours, Planifié, Review, Terminé..."),
    ("priority", "Haute, Moyenne, Basse"),
    ("deadline", "Date d'échéance (AAAA-MM-JJ)"),
    ("owner", "Nom du responsable"),
    ("completion", "Pourcentage (0-100)"),
    ("description", "Description du projet"),
];

const TEAM_COLUMNS: &[(&str, &str)] = &[
    ("name", "Nom complet"),
    ("role", "Poste ou fonction"),
    ("availability", "Disponible, Occupé, Absent, En réunion"),
    ("specialty", "Compétence principale"),
    ("active_projects", "Nombre de projets en cours"),
];

const PROJECT_TIPS: &[&str] = &[
    "La première ligne doit contenir les en-têtes",
    "Les dates doivent être au format AAAA-MM-JJ",
    "Les pourcentages sont des nombres (75, pas \"75%\")",
];

const TEAM_TIPS: &[&str] = &[
    "La première ligne doit contenir les en-têtes",
    "Les nombres doivent être des valeurs numériques",
];

/// Human readable description of each expected column
pub fn column_guide(dataset: DatasetKind) -> String {
    let (title, columns, tips) = match dataset {
        DatasetKind::Projects => (
            "📊 **Colonnes du fichier projets :**",
            PROJECT_COLUMNS,
            PROJECT_TIPS,
        ),
        DatasetKind::Team => (
            "👥 **Colonnes du fichier équipe :**",
            TEAM_COLUMNS,
            TEAM_TIPS,
        ),
    };

    let mut output = format!("{}\n\n", title);
    for (name, description) in columns {
        output.push_str(&format!("- {} : {}\n", name, description));
    }

    output.push_str("\n**Conseils :**\n");
    for tip in tips {
        output.push_str(&format!("• {}\n", tip));
    }

    output
}
