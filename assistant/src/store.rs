use chrono::NaiveDate;
use importers::TabularImporter;
use shared_types::{DatasetKind, LoadError, LoadSummary, Project, TeamMember};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of "today" for deadline arithmetic
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Clock pinned to one date, used by tests and replays
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Both tables, always replaced together
#[derive(Debug, Clone, Default)]
pub struct Records {
    pub projects: Vec<Project>,
    pub members: Vec<TeamMember>,
}

impl Records {
    pub fn summary(&self) -> LoadSummary {
        LoadSummary {
            projects: self.projects.len(),
            members: self.members.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
    Inline(String),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched, anything else is a file path
    pub fn from_location(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::Path(PathBuf::from(location))
        }
    }

    async fn read(&self, http: &reqwest::Client, timeout: Duration) -> Result<Vec<u8>, LoadError> {
        match self {
            DataSource::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|e| LoadError::Unreachable(format!("{}: {}", path.display(), e))),
            DataSource::Url(url) => {
                let response = http
                    .get(url)
                    .timeout(timeout)
                    .send()
                    .await
                    .map_err(|e| LoadError::Unreachable(format!("{}: {}", url, e)))?;

                if !response.status().is_success() {
                    return Err(LoadError::Unreachable(format!(
                        "{}: HTTP {}",
                        url,
                        response.status()
                    )));
                }

                let body = response
                    .bytes()
                    .await
                    .map_err(|e| LoadError::Unreachable(format!("{}: {}", url, e)))?;
                Ok(body.to_vec())
            }
            DataSource::Inline(text) => Ok(text.as_bytes().to_vec()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub projects: DataSource,
    pub team: DataSource,
}

impl DataSources {
    /// Look for the two exports in a directory, French file names first
    pub fn discover(dir: &Path) -> Option<Self> {
        let find = |names: &[&str]| {
            names
                .iter()
                .map(|name| dir.join(name))
                .find(|path| path.is_file())
        };

        let projects = find(&["projets.csv", "projects.csv"])?;
        let team = find(&["equipe.csv", "team.csv"])?;

        Some(Self {
            projects: DataSource::Path(projects),
            team: DataSource::Path(team),
        })
    }
}

struct StoreState {
    records: Arc<Records>,
    generation: u64,
    loaded: bool,
}

/// Records, generation and loaded flag read under one lock
#[derive(Debug, Clone)]
pub struct StoreView {
    pub records: Arc<Records>,
    pub generation: u64,
    pub loaded: bool,
}

/// In-memory copy of the projects and team tables.
///
/// Loads are serialized; readers always see either the previous or the new
/// record set, never a mix of both.
pub struct RecordStore {
    importer: TabularImporter,
    http: reqwest::Client,
    fetch_timeout: Duration,
    state: RwLock<StoreState>,
    load_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::with_importer(TabularImporter::new())
    }

    pub fn with_importer(importer: TabularImporter) -> Self {
        Self {
            importer,
            http: reqwest::Client::new(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            state: RwLock::new(StoreState {
                records: Arc::new(Records::default()),
                generation: 0,
                loaded: false,
            }),
            load_lock: Mutex::new(()),
        }
    }

    /// Upper bound for each URL fetch, covering connect and body
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Fetch and parse both tables, then swap them in.
    /// On any error the current records are kept.
    pub async fn load(&self, sources: &DataSources) -> Result<LoadSummary, LoadError> {
        let _guard = self.load_lock.lock().await;

        let projects_raw = sources.projects.read(&self.http, self.fetch_timeout).await?;
        let team_raw = sources.team.read(&self.http, self.fetch_timeout).await?;

        let projects = self.importer.import_projects(&projects_raw)?;
        let members = self.importer.import_team(&team_raw)?;

        let summary = self.swap(Records { projects, members }).await;
        tracing::info!(
            "Loaded {} project(s) and {} team member(s)",
            summary.projects,
            summary.members
        );
        Ok(summary)
    }

    /// Swap in records built elsewhere, bypassing parsing
    pub async fn replace(&self, projects: Vec<Project>, members: Vec<TeamMember>) -> LoadSummary {
        let _guard = self.load_lock.lock().await;
        self.swap(Records { projects, members }).await
    }

    /// Replace a single table from pasted CSV text, keeping the other one
    pub async fn import_csv(&self, dataset: DatasetKind, csv: &str) -> Result<LoadSummary, LoadError> {
        let _guard = self.load_lock.lock().await;

        let current = self.records().await;
        let records = match dataset {
            DatasetKind::Projects => Records {
                projects: self.importer.import_projects(csv.as_bytes())?,
                members: current.members.clone(),
            },
            DatasetKind::Team => Records {
                projects: current.projects.clone(),
                members: self.importer.import_team(csv.as_bytes())?,
            },
        };

        let summary = self.swap(records).await;
        tracing::info!("Imported {} table from pasted text", dataset);
        Ok(summary)
    }

    pub async fn records(&self) -> Arc<Records> {
        self.state.read().await.records.clone()
    }

    pub async fn current(&self) -> StoreView {
        let state = self.state.read().await;
        StoreView {
            records: state.records.clone(),
            generation: state.generation,
            loaded: state.loaded,
        }
    }

    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }

    pub async fn is_loaded(&self) -> bool {
        self.state.read().await.loaded
    }

    async fn swap(&self, records: Records) -> LoadSummary {
        let summary = records.summary();
        let mut state = self.state.write().await;
        state.records = Arc::new(records);
        state.generation += 1;
        state.loaded = true;
        summary
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
