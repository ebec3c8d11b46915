use shared_types::{
    AssistantReply, DatasetKind, DerivedSnapshot, IntentKind, LlmStatus, LoadError, LoadSummary,
    ResponseKind, ResponseStyle,
};
use std::sync::Arc;

use crate::config::AssistantConfig;
use crate::gateway::{AugmentationGateway, GenerationResult, SamplingOptions};
use crate::intent::{Command, Intent, IntentClassifier, Query};
use crate::metrics::{MetricsCalculator, SnapshotCache, Thresholds};
use crate::ollama::OllamaClient;
use crate::render::{RenderedReply, ResponseRenderer, APOLOGY};
use crate::store::{Clock, DataSources, RecordStore, Records, SystemClock};
use crate::system_prompt;

const ENRICHMENT_HEADER: &str = "🤖 **Enrichissement IA :**";

/// One chat turn from utterance to reply.
///
/// Answers are always computed locally first. When augmentation is enabled
/// and the generation server is available, its output is appended to the
/// local text rather than replacing it.
pub struct Assistant {
    store: Arc<RecordStore>,
    sources: Option<DataSources>,
    classifier: IntentClassifier,
    calculator: MetricsCalculator,
    cache: SnapshotCache,
    renderer: ResponseRenderer,
    gateway: Arc<AugmentationGateway>,
    clock: Arc<dyn Clock>,
}

impl Assistant {
    pub fn new(store: Arc<RecordStore>, gateway: Arc<AugmentationGateway>) -> Self {
        Self {
            store,
            sources: None,
            classifier: IntentClassifier::new(),
            calculator: MetricsCalculator::default(),
            cache: SnapshotCache::new(300),
            renderer: ResponseRenderer::default(),
            gateway,
            clock: Arc::new(SystemClock),
        }
    }

    /// Wire every component from the loaded configuration
    pub fn from_config(config: &AssistantConfig) -> Self {
        let store = Arc::new(
            RecordStore::with_importer(importers::TabularImporter::with_delimiter(
                config.data.delimiter_byte(),
            ))
            .with_fetch_timeout(config.data.fetch_timeout()),
        );
        let generator = Arc::new(OllamaClient::new(config.ollama.settings()));
        let gateway = Arc::new(AugmentationGateway::new(
            generator,
            config.ollama.model.clone(),
            SamplingOptions {
                temperature: config.ollama.temperature,
                max_tokens: config.ollama.max_tokens,
            },
            config.assistant.llm_auto_enable,
        ));

        let assistant = Self::new(store, gateway)
            .with_thresholds(config.analysis.thresholds())
            .with_snapshot_ttl(config.analysis.snapshot_ttl_secs)
            .with_style(config.assistant.style);

        match config.data.sources() {
            Some(sources) => assistant.with_sources(sources),
            None => assistant,
        }
    }

    pub fn with_sources(mut self, sources: DataSources) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.calculator = MetricsCalculator::new(thresholds);
        self
    }

    pub fn with_snapshot_ttl(mut self, ttl_secs: u64) -> Self {
        self.cache = SnapshotCache::new(ttl_secs);
        self
    }

    pub fn with_style(mut self, style: ResponseStyle) -> Self {
        self.renderer = ResponseRenderer::new(style);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn gateway(&self) -> &AugmentationGateway {
        &self.gateway
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Answer one utterance. Never fails; internal errors become an apology.
    pub async fn handle(&self, utterance: &str) -> AssistantReply {
        match self.try_handle(utterance).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Failed to answer {:?}: {:#}", utterance, e);
                AssistantReply {
                    text: APOLOGY.to_string(),
                    suggestions: Vec::new(),
                    kind: ResponseKind::Alert,
                    intent: None,
                    generated_by_external: false,
                }
            }
        }
    }

    async fn try_handle(&self, utterance: &str) -> anyhow::Result<AssistantReply> {
        let view = self.store.current().await;
        let records = view.records;
        let intent = self.classifier.classify(utterance, &records);
        tracing::debug!("Classified {:?} as {:?}", utterance, intent);

        let query = match intent {
            Some(Intent::Command(command)) => return Ok(self.run_command(command).await),
            Some(Intent::Query(query)) => Some(query),
            None => None,
        };

        if !view.loaded {
            return Ok(local_reply(
                self.renderer.render_loading(),
                query.as_ref().map(Query::kind),
            ));
        }

        let snapshot = self.snapshot_for(&records, view.generation).await;
        let (local, augmentable) = match &query {
            Some(query) => (self.renderer.render(query, &snapshot), query.is_augmentable()),
            None => (self.renderer.render_fallback(&snapshot), true),
        };
        let intent = query.as_ref().map(Query::kind);

        if !augmentable || !self.augmentation_active().await {
            return Ok(local_reply(local, intent));
        }

        let context_data = system_prompt::relevant_data(utterance, &records, &snapshot)?;
        match self
            .gateway
            .augment(utterance, &local.text, &context_data)
            .await
        {
            GenerationResult::Generated(generated) => Ok(AssistantReply {
                text: format!("{}\n\n{}\n{}", local.text, ENRICHMENT_HEADER, generated),
                suggestions: local.suggestions,
                kind: local.kind,
                intent,
                generated_by_external: true,
            }),
            GenerationResult::NotGenerated { reason } => {
                tracing::debug!("Answering locally: {}", reason);
                Ok(local_reply(local, intent))
            }
        }
    }

    async fn run_command(&self, command: Command) -> AssistantReply {
        match command {
            Command::LlmStatus => {
                self.gateway.check().await;
                let status = self.gateway.status().await;
                local_reply(
                    self.renderer.render_llm_status(&status),
                    Some(IntentKind::LlmStatus),
                )
            }
            Command::Refresh => {
                let result = self.reload().await;
                local_reply(
                    self.renderer.render_refresh(&result),
                    Some(IntentKind::Refresh),
                )
            }
        }
    }

    async fn augmentation_active(&self) -> bool {
        if !self.gateway.status().await.enabled {
            return false;
        }
        self.gateway.ensure_checked().await;
        self.gateway.status().await.is_active()
    }

    async fn snapshot_for(&self, records: &Records, generation: u64) -> Arc<DerivedSnapshot> {
        let today = self.clock.today();
        self.cache
            .get_or_compute(generation, today, || self.calculator.snapshot(records, today))
            .await
    }

    /// Current derived facts, computed from whatever is loaded
    pub async fn snapshot(&self) -> Arc<DerivedSnapshot> {
        let view = self.store.current().await;
        self.snapshot_for(&view.records, view.generation).await
    }

    /// Re-read the configured sources
    pub async fn reload(&self) -> Result<LoadSummary, LoadError> {
        let Some(sources) = &self.sources else {
            return Err(LoadError::Unreachable(
                "no data source configured".to_string(),
            ));
        };
        self.store.load(sources).await
    }

    pub async fn import_csv(&self, dataset: DatasetKind, csv: &str) -> Result<LoadSummary, LoadError> {
        self.store.import_csv(dataset, csv).await
    }

    pub async fn llm_status(&self) -> LlmStatus {
        self.gateway.status().await
    }

    pub async fn check_llm(&self) -> LlmStatus {
        self.gateway.check().await;
        self.gateway.status().await
    }

    /// Only flips while the generation server is available
    pub async fn toggle_llm(&self) -> LlmStatus {
        self.gateway.toggle().await
    }
}

fn local_reply(rendered: RenderedReply, intent: Option<IntentKind>) -> AssistantReply {
    AssistantReply {
        text: rendered.text,
        suggestions: rendered.suggestions,
        kind: rendered.kind,
        intent,
        generated_by_external: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::tests::FakeGenerator;
    use crate::ollama::OllamaSettings;
    use crate::store::{DataSource, FixedClock};
    use chrono::NaiveDate;
    use shared_types::{LlmAvailability, Priority, Project};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    const PROJECTS: &str = "id,name,client,status,priority,deadline,owner,completion,description
1,Refonte Site Web Luxe,Maison Luxe,En cours,Haute,2024-03-20,Sarah Martin,60,Nouveau site
2,Audit SEO,Digital Plus,En cours,Moyenne,2024-03-03,Alex,90,Audit
3,Application Mobile,TechStart,Planifié,Basse,2024-02-25,Alex,10,App
";

    const TEAM: &str = "name,role,availability,specialty,active_projects
Sarah Martin,Chef de projet,Disponible,Gestion de projet,2
Alex,Développeur,Occupé,Backend,1
";

    const LOADING_TEXT: &str = "🔄 Je charge encore vos données... Un petit moment ! 😊";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn sources() -> DataSources {
        DataSources {
            projects: DataSource::Inline(PROJECTS.to_string()),
            team: DataSource::Inline(TEAM.to_string()),
        }
    }

    fn assistant_with(generator: FakeGenerator) -> (Assistant, Arc<FakeGenerator>) {
        let generator = Arc::new(generator);
        let gateway = Arc::new(AugmentationGateway::new(
            generator.clone(),
            "llama3.2:3b",
            SamplingOptions::default(),
            true,
        ));
        let assistant = Assistant::new(Arc::new(RecordStore::new()), gateway)
            .with_sources(sources())
            .with_clock(Arc::new(FixedClock(today())));
        (assistant, generator)
    }

    #[tokio::test]
    async fn test_loading_message_before_data() {
        let (assistant, _) = assistant_with(FakeGenerator::offline());
        let reply = assistant.handle("projets").await;
        assert_eq!(reply.text, LOADING_TEXT);
        assert_eq!(reply.intent, Some(IntentKind::Projects));
    }

    #[tokio::test]
    async fn test_deadlines_without_llm() {
        let (assistant, generator) = assistant_with(FakeGenerator::offline());
        assistant.reload().await.unwrap();

        let reply = assistant.handle("Deadlines ?").await;
        assert!(reply.text.contains("• Audit SEO (Digital Plus) - 2 jour(s)"));
        assert!(reply.text.contains("• Application Mobile - 5 jour(s) de retard"));
        assert_eq!(reply.kind, ResponseKind::Alert);
        assert!(!reply.generated_by_external);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_greeting_counts() {
        let (assistant, _) = assistant_with(FakeGenerator::offline());
        assistant.reload().await.unwrap();

        for utterance in ["bonjour", "Hello!"] {
            let reply = assistant.handle(utterance).await;
            assert_eq!(reply.intent, Some(IntentKind::Greeting));
            assert!(reply.text.contains("3 projets"));
            assert!(reply.text.contains("2 membres"));
            assert_eq!(reply.suggestions, vec!["projets", "équipe", "deadlines", "aide"]);
        }
    }

    #[tokio::test]
    async fn test_augmentation_enriches_local_text() {
        let (assistant, generator) = assistant_with(FakeGenerator::answering("Priorisez l'audit."));
        assistant.reload().await.unwrap();

        let reply = assistant.handle("deadlines").await;
        assert!(reply.generated_by_external);
        assert!(reply.text.contains("• Audit SEO (Digital Plus) - 2 jour(s)"));
        assert!(reply
            .text
            .ends_with("\n\n🤖 **Enrichissement IA :**\nPriorisez l'audit."));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_help_is_never_augmented() {
        let (assistant, generator) = assistant_with(FakeGenerator::answering("extra"));
        assistant.reload().await.unwrap();

        let reply = assistant.handle("aide").await;
        assert!(!reply.generated_by_external);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_augmentation_falls_back_to_local() {
        let (assistant, _) = assistant_with(FakeGenerator::failing(500));
        assistant.reload().await.unwrap();

        let reply = assistant.handle("équipe").await;
        assert!(!reply.generated_by_external);
        assert!(!reply.text.contains("Enrichissement IA"));
        assert_eq!(
            assistant.llm_status().await.availability,
            LlmAvailability::Available
        );
    }

    #[tokio::test]
    async fn test_invalid_endpoint_keeps_local_text() {
        let gateway = Arc::new(AugmentationGateway::new(
            Arc::new(OllamaClient::new(OllamaSettings {
                base_url: "http://127.0.0.1:9".to_string(),
                probe_timeout: Duration::from_secs(1),
                timeout: Duration::from_secs(1),
            })),
            "llama3.2:3b",
            SamplingOptions::default(),
            true,
        ));
        let store = Arc::new(RecordStore::new());
        store.load(&sources()).await.unwrap();

        let offline = Assistant::new(store, gateway).with_clock(Arc::new(FixedClock(today())));

        let reply = offline.handle("résumé").await;
        let expected = ResponseRenderer::default().render(&Query::Summary, &*offline.snapshot().await);
        assert_eq!(reply.text, expected.text);
        assert_eq!(reply.kind, ResponseKind::Analysis);
        assert!(!reply.generated_by_external);
    }

    #[tokio::test]
    async fn test_llm_status_command() {
        let (assistant, _) = assistant_with(FakeGenerator::answering("ok"));
        let reply = assistant.handle("statut du llm").await;
        assert_eq!(reply.intent, Some(IntentKind::LlmStatus));
        assert!(reply.text.contains("• Disponible : ✅ Oui"));
    }

    #[tokio::test]
    async fn test_refresh_command() {
        let (assistant, _) = assistant_with(FakeGenerator::offline());
        let reply = assistant.handle("actualiser").await;
        assert_eq!(reply.intent, Some(IntentKind::Refresh));
        assert!(reply.text.contains("• 3 projet(s) chargé(s)"));
        assert!(assistant.store().is_loaded().await);
    }

    #[tokio::test]
    async fn test_refresh_without_sources() {
        let gateway = Arc::new(AugmentationGateway::new(
            Arc::new(FakeGenerator::offline()),
            "llama3.2:3b",
            SamplingOptions::default(),
            false,
        ));
        let assistant = Assistant::new(Arc::new(RecordStore::new()), gateway);
        let reply = assistant.handle("refresh").await;
        assert_eq!(reply.kind, ResponseKind::Alert);
    }

    #[tokio::test]
    async fn test_entity_search_through_assistant() {
        let (assistant, _) = assistant_with(FakeGenerator::offline());
        assistant.reload().await.unwrap();

        let reply = assistant.handle("site web").await;
        assert_eq!(reply.intent, Some(IntentKind::ProjectSearch));
        assert!(reply.text.contains("Refonte Site Web Luxe"));

        let reply = assistant.handle("quelque chose d'inconnu").await;
        assert_eq!(reply.intent, None);
        assert_eq!(reply.kind, ResponseKind::Suggestion);
    }

    #[tokio::test]
    async fn test_import_csv_updates_answers() {
        let (assistant, _) = assistant_with(FakeGenerator::offline());
        assistant.reload().await.unwrap();

        let team = "name,role,availability,specialty,active_projects\nJulie,Designer,Disponible,UI,0\n";
        assistant.import_csv(DatasetKind::Team, team).await.unwrap();

        let snapshot = assistant.snapshot().await;
        assert_eq!(snapshot.total_members, 1);
        assert!(snapshot.overloaded_members.is_empty());
    }

    #[tokio::test]
    async fn test_replaced_records_feed_snapshot() {
        let (assistant, _) = assistant_with(FakeGenerator::offline());
        assert_eq!(assistant.handle("projets").await.text, LOADING_TEXT);

        let audit = Project {
            id: "1".to_string(),
            name: "Audit SEO".to_string(),
            client: "Digital Plus".to_string(),
            status: "En cours".to_string(),
            priority: Priority::Medium,
            deadline: Some(today() + chrono::Duration::days(3)),
            owner: "Alex".to_string(),
            completion: 40,
            description: String::new(),
        };
        assistant.store().replace(vec![audit], Vec::new()).await;

        let snapshot = assistant.snapshot().await;
        assert_eq!(snapshot.total_projects, 1);
        assert_eq!(snapshot.urgent.len(), 1);

        let reply = assistant.handle("projets").await;
        assert!(reply.text.contains("• 1 projet(s) au total"));
    }

    #[tokio::test]
    async fn test_snapshot_is_stable() {
        let (assistant, _) = assistant_with(FakeGenerator::offline());
        assistant.reload().await.unwrap();
        assert_eq!(*assistant.snapshot().await, *assistant.snapshot().await);
    }

    #[tokio::test]
    async fn test_toggle_llm() {
        let (assistant, _) = assistant_with(FakeGenerator::answering("ok"));
        assert!(assistant.toggle_llm().await.enabled);

        assistant.check_llm().await;
        assert!(!assistant.toggle_llm().await.enabled);
    }
}
