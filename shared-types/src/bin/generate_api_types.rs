use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Record types
    types.push(clean_type(Priority::export_to_string()?));
    types.push(clean_type(Project::export_to_string()?));
    types.push(clean_type(ProjectsResponse::export_to_string()?));
    types.push(clean_type(Availability::export_to_string()?));
    types.push(clean_type(TeamMember::export_to_string()?));
    types.push(clean_type(TeamResponse::export_to_string()?));

    // Dataset types
    types.push(clean_type(DatasetKind::export_to_string()?));
    types.push(clean_type(LoadSummary::export_to_string()?));
    types.push(clean_type(ImportCsvRequest::export_to_string()?));

    // Analysis types
    types.push(clean_type(ScheduledProject::export_to_string()?));
    types.push(clean_type(StatusCount::export_to_string()?));
    types.push(clean_type(DerivedSnapshot::export_to_string()?));

    // Chat types
    types.push(clean_type(IntentKind::export_to_string()?));
    types.push(clean_type(ResponseKind::export_to_string()?));
    types.push(clean_type(ResponseStyle::export_to_string()?));
    types.push(clean_type(ChatRequest::export_to_string()?));
    types.push(clean_type(AssistantReply::export_to_string()?));

    // LLM types
    types.push(clean_type(LlmAvailability::export_to_string()?));
    types.push(clean_type(LlmStatus::export_to_string()?));
    types.push(clean_type(ModelsResponse::export_to_string()?));
    types.push(clean_type(ModelRequest::export_to_string()?));

    types.push(clean_type(ErrorResponse::export_to_string()?));

    let output_dir = Path::new("../gui/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Check if the type definition includes imports (like DerivedSnapshot which imports Project)
    let lines: Vec<&str> = type_def.lines().collect();
    let has_import = lines
        .iter()
        .any(|line| line.trim().starts_with("import type"));

    let filtered: Vec<&str> = lines
        .iter()
        .filter(|line| {
            let trimmed = line.trim();
            // Keep import lines if they're part of a type definition
            if trimmed.starts_with("import type") {
                return has_import;
            }
            // Filter out the generated comment line
            !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .cloned()
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
