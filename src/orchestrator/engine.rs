use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogHandle};
use crate::config::LoaderConfig;
use crate::context::{ContextDetector, ProjectContext};
use crate::error::Result;
use crate::fetch::{DocumentStore, RuleCache, RuleFetcher};
use crate::prompt::{self, PromptCategory, UserIntent};
use crate::scoring::{SelectionLimits, select};

use super::format::format_injection;

/// Elapsed milliseconds per pipeline stage.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StageTimings {
    pub detect_ms: u64,
    pub classify_ms: u64,
    pub select_ms: u64,
    pub fetch_ms: u64,
    pub format_ms: u64,
    pub total_ms: u64,
}

/// Diagnostic record accompanying every pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct LoadMetadata {
    pub timestamp: DateTime<Utc>,
    pub project_context: Option<ProjectContext>,
    pub category: Option<PromptCategory>,
    pub intent: Option<UserIntent>,
    pub rules_loaded: usize,
    pub rule_paths: Vec<String>,
    pub timing: StageTimings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoadMetadata {
    fn empty() -> Self {
        Self {
            timestamp: Utc::now(),
            project_context: None,
            category: None,
            intent: None,
            rules_loaded: 0,
            rule_paths: Vec::new(),
            timing: StageTimings::default(),
            error: None,
        }
    }
}

/// Result of one pipeline run. `injected` absent means "continue processing
/// the original request, nothing loaded", which is also what every failure
/// mode degrades to.
#[derive(Debug, Clone, Serialize)]
pub struct LoadOutcome {
    pub injected: Option<String>,
    pub metadata: LoadMetadata,
}

impl LoadOutcome {
    fn skipped() -> Self {
        Self {
            injected: None,
            metadata: LoadMetadata::empty(),
        }
    }

    fn degraded(error: String, elapsed: Duration) -> Self {
        let mut metadata = LoadMetadata::empty();
        metadata.error = Some(error);
        metadata.timing.total_ms = elapsed.as_millis() as u64;
        Self {
            injected: None,
            metadata,
        }
    }
}

/// The selection pipeline: context detection, classification, scoring,
/// budgeted selection and cached fetching, in sequence.
pub struct RulesEngine {
    config: LoaderConfig,
    catalog: CatalogHandle,
    detector: ContextDetector,
    fetcher: RuleFetcher,
}

impl RulesEngine {
    pub fn new(config: LoaderConfig, catalog: Catalog, store: Arc<dyn DocumentStore>) -> Self {
        let cache = config
            .cache_enabled
            .then(|| Arc::new(RuleCache::new(Duration::from_secs(config.cache_ttl_secs))));
        let fetcher = RuleFetcher::new(store, cache, config.tokenizer.clone());

        Self {
            config,
            catalog: CatalogHandle::new(catalog),
            detector: ContextDetector::new(),
            fetcher,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog.current()
    }

    /// Replace the catalog atomically; in-flight requests keep their
    /// snapshot.
    pub fn reload_catalog(&self, catalog: Catalog) {
        self.catalog.swap(catalog);
    }

    /// Run the full pipeline for one request.
    ///
    /// Never returns an error: any stage failure is converted into an
    /// outcome with no injected content and the diagnostic in metadata. The
    /// assistant session continues uninterrupted either way.
    pub async fn run(&self, request_text: &str, working_dir: &Path) -> LoadOutcome {
        if !self.config.enable_auto_load {
            debug!("Auto-load disabled, skipping pipeline");
            return LoadOutcome::skipped();
        }

        let started = Instant::now();
        let outcome = match self.run_inner(request_text, working_dir, started).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Pipeline failed; continuing without injection");
                LoadOutcome::degraded(e.to_string(), started.elapsed())
            }
        };

        if outcome.metadata.timing.total_ms > self.config.orchestrator.latency_warn_ms {
            warn!(
                total_ms = outcome.metadata.timing.total_ms,
                threshold_ms = self.config.orchestrator.latency_warn_ms,
                "Rule loading exceeded latency threshold"
            );
        }

        outcome
    }

    async fn run_inner(
        &self,
        request_text: &str,
        working_dir: &Path,
        started: Instant,
    ) -> Result<LoadOutcome> {
        let mut metadata = LoadMetadata::empty();

        let stage = Instant::now();
        let context = self.detector.detect(working_dir);
        metadata.timing.detect_ms = stage.elapsed().as_millis() as u64;

        let stage = Instant::now();
        let category = prompt::classify(request_text);
        let intent = prompt::extract_intent(request_text);
        metadata.timing.classify_ms = stage.elapsed().as_millis() as u64;

        metadata.category = Some(category);

        // Token-saving short-circuit for non-code requests.
        if self
            .config
            .orchestrator
            .early_exit_categories
            .contains(&category)
        {
            debug!(category = %category, "Early exit, no rules considered");
            metadata.project_context = Some(context);
            metadata.intent = Some(intent);
            metadata.timing.total_ms = started.elapsed().as_millis() as u64;
            return Ok(LoadOutcome {
                injected: None,
                metadata,
            });
        }

        let stage = Instant::now();
        let catalog = self.catalog.current();
        let limits = SelectionLimits {
            max_rules: self.config.max_rules,
            max_tokens: self.config.max_tokens,
        };
        let selected = select(
            &catalog,
            &context,
            &intent,
            Some(category),
            limits,
            &self.config.scoring,
        );
        metadata.timing.select_ms = stage.elapsed().as_millis() as u64;

        let stage = Instant::now();
        let rules = self.fetcher.fetch_all(&selected).await;
        metadata.timing.fetch_ms = stage.elapsed().as_millis() as u64;

        let stage = Instant::now();
        let injected = if rules.is_empty() {
            None
        } else {
            Some(format_injection(&context, &rules))
        };
        metadata.timing.format_ms = stage.elapsed().as_millis() as u64;

        metadata.rules_loaded = rules.len();
        metadata.rule_paths = rules.iter().map(|r| r.path.clone()).collect();
        metadata.project_context = Some(context);
        metadata.intent = Some(intent);
        metadata.timing.total_ms = started.elapsed().as_millis() as u64;

        info!(
            category = %category,
            selected = selected.len(),
            loaded = metadata.rules_loaded,
            total_ms = metadata.timing.total_ms,
            "Rule loading complete"
        );

        Ok(LoadOutcome { injected, metadata })
    }
}
