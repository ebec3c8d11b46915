use anyhow::{Context, Result};
use clap::Parser;
use shared_types::{AssistantReply, ResponseStyle};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

use assistant::{Assistant, AssistantConfig};

#[derive(Parser, Debug)]
#[command(name = "chat", about = "Talk to the SydoFlow project assistant from a terminal")]
struct Cli {
    /// Projects table (file path or http(s) URL)
    #[arg(long, value_name = "SOURCE", requires = "team")]
    projects: Option<String>,

    /// Team table (file path or http(s) URL)
    #[arg(long, value_name = "SOURCE", requires = "projects")]
    team: Option<String>,

    /// Directory containing projets.csv and equipe.csv
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Reply tone: friendly or plain
    #[arg(long)]
    style: Option<ResponseStyle>,

    /// Never call the text-generation server
    #[arg(long)]
    no_llm: bool,

    /// Answer a single message and exit
    #[arg(long, short)]
    message: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let (mut config, config_path) =
        AssistantConfig::load().context("Failed to load assistant config")?;
    tracing::debug!("Using config at {:?}", config_path);

    if cli.projects.is_some() {
        config.data.projects = cli.projects.clone();
        config.data.team = cli.team.clone();
    }
    if let Some(dir) = cli.data_dir {
        if cli.projects.is_none() {
            config.data.projects = None;
            config.data.team = None;
        }
        config.data.data_dir = Some(dir);
    }
    if let Some(style) = cli.style {
        config.assistant.style = style;
    }
    if cli.no_llm {
        config.assistant.llm_auto_enable = false;
    }

    let assistant = Assistant::from_config(&config);
    match assistant.reload().await {
        Ok(summary) => tracing::info!(
            "Ready with {} project(s) and {} member(s)",
            summary.projects,
            summary.members
        ),
        Err(err) => tracing::warn!("Could not load data: {}", err),
    }

    if let Some(message) = cli.message {
        print_reply(&assistant.handle(&message).await);
        return Ok(());
    }

    repl(&assistant).await
}

async fn repl(assistant: &Assistant) -> Result<()> {
    println!("SydoFlow assistant. Tapez \"aide\" pour les commandes, \"quit\" pour sortir.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit" | "q") {
            break;
        }

        print_reply(&assistant.handle(line).await);
    }

    Ok(())
}

fn print_reply(reply: &AssistantReply) {
    println!("\n{}\n", reply.text);
    if !reply.suggestions.is_empty() {
        println!("💡 {}\n", reply.suggestions.join(" | "));
    }
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
