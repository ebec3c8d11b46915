use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use shared_types::ResponseStyle;
use std::path::{Path, PathBuf};

use crate::metrics::Thresholds;
use crate::ollama::OllamaSettings;
use crate::store::{DataSource, DataSources};

const DEFAULT_CONFIG: &str = r#"
[data]
# Paths or http(s) URLs of the two tables
# projects = "/path/to/projets.csv"
# team = "/path/to/equipe.csv"
# Directory scanned for projets.csv/projects.csv and equipe.csv/team.csv
# data_dir = "/path/to/data"
delimiter = ","
# Upper bound for fetching a table from an http(s) URL
fetch_timeout_secs = 30

[analysis]
urgent_within_days = 3
overload_at = 2
busy_portfolio_above = 5
snapshot_ttl_secs = 300
terminal_statuses = ["Terminé", "Done"]
in_progress_status = "En cours"

[assistant]
# "friendly" or "plain"
style = "friendly"
llm_auto_enable = true

[ollama]
base_url = "http://localhost:11434"
model = "llama3.2:3b"
temperature = 0.7
max_tokens = 1000
probe_timeout_secs = 3
timeout_secs = 30

[server]
host = "127.0.0.1"
port = 8080

[cors]
allowed_origins = ["http://localhost:5173"]
"#;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AssistantConfig {
    pub data: DataConfig,
    pub analysis: AnalysisConfig,
    pub assistant: ChatConfig,
    pub ollama: OllamaConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct DataConfig {
    pub projects: Option<String>,
    pub team: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub delimiter: char,
    pub fetch_timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            projects: None,
            team: None,
            data_dir: None,
            delimiter: ',',
            fetch_timeout_secs: 30,
        }
    }
}

impl DataConfig {
    /// Explicit paths win over a scanned data directory.
    pub fn sources(&self) -> Option<DataSources> {
        if let (Some(projects), Some(team)) = (&self.projects, &self.team) {
            return Some(DataSources {
                projects: DataSource::from_location(projects),
                team: DataSource::from_location(team),
            });
        }

        self.data_dir.as_deref().and_then(DataSources::discover)
    }

    pub fn fetch_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b','
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AnalysisConfig {
    pub urgent_within_days: i64,
    pub overload_at: u32,
    pub busy_portfolio_above: usize,
    pub snapshot_ttl_secs: u64,
    pub terminal_statuses: Vec<String>,
    pub in_progress_status: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        Self {
            urgent_within_days: thresholds.urgent_within_days,
            overload_at: thresholds.overload_at,
            busy_portfolio_above: thresholds.busy_portfolio_above,
            snapshot_ttl_secs: 300,
            terminal_statuses: thresholds.terminal_statuses,
            in_progress_status: thresholds.in_progress_status,
        }
    }
}

impl AnalysisConfig {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            urgent_within_days: self.urgent_within_days.max(0),
            overload_at: self.overload_at,
            busy_portfolio_above: self.busy_portfolio_above,
            terminal_statuses: self.terminal_statuses.clone(),
            in_progress_status: self.in_progress_status.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ChatConfig {
    pub style: ResponseStyle,
    pub llm_auto_enable: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            style: ResponseStyle::Friendly,
            llm_auto_enable: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub probe_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2:3b".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            probe_timeout_secs: 3,
            timeout_secs: 30,
        }
    }
}

impl OllamaConfig {
    pub fn settings(&self) -> OllamaSettings {
        OllamaSettings {
            base_url: self.base_url.clone(),
            probe_timeout: std::time::Duration::from_secs(self.probe_timeout_secs),
            timeout: std::time::Duration::from_secs(self.timeout_secs),
        }
    }
}

impl AssistantConfig {
    /// Load the config file, writing a commented default one on first run.
    /// Environment variables such as `SYDOFLOW__OLLAMA__MODEL` override file values.
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let config = Self::load_from(&config_path)?;
        Ok((config, config_path))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("SYDOFLOW")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("sydoflow").join("assistant.toml")
    } else {
        PathBuf::from("assistant.toml")
    }
}
