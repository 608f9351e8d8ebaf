use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::markers::{
    CI_MARKERS, CLOUD_MARKERS, CONTAINER_MARKERS, FRAMEWORK_MARKERS, LANGUAGE_MARKERS,
    MANIFEST_MARKERS, MONITORING_MARKERS, SUPERSET_MARKERS, TEST_DIR_MARKERS, VERSION_MANIFESTS,
};
use super::types::{Maturity, ProjectContext};

/// Confidence contribution per detected item. Additive and capped, so more
/// evidence never lowers the score.
const LANGUAGE_CONFIDENCE: f32 = 0.3;
const FRAMEWORK_CONFIDENCE: f32 = 0.15;
const CLOUD_CONFIDENCE: f32 = 0.1;

/// Detects the technology profile of a project directory.
///
/// Pure function of filesystem state at call time. A missing or partial
/// project yields an empty context, never an error; unreadable manifest
/// files are logged and skipped without aborting the rest of detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextDetector;

impl ContextDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, dir: &Path) -> ProjectContext {
        let mut context = ProjectContext::default();

        for marker in LANGUAGE_MARKERS {
            // First matching pattern wins for this language.
            if marker.patterns.iter().any(|p| pattern_exists(dir, p)) {
                context.languages.insert(marker.language.to_string());
            }
        }

        // Drop a subset language when its superset has an unambiguous marker.
        for rule in SUPERSET_MARKERS {
            if context.languages.contains(rule.subset)
                && context.languages.contains(rule.superset)
                && dir.join(rule.marker).exists()
            {
                context.languages.remove(rule.subset);
            }
        }

        let manifests = self.read_manifests(dir, &context);

        for marker in FRAMEWORK_MARKERS {
            if !context.languages.contains(marker.language) {
                continue;
            }
            let hit = MANIFEST_MARKERS
                .iter()
                .filter(|m| m.language == marker.language)
                .flat_map(|m| m.manifests)
                .any(|name| {
                    manifests
                        .get(name)
                        .is_some_and(|content| content.contains(marker.needle))
                });
            if hit {
                context.frameworks.insert(marker.framework.to_string());
            }
        }

        for marker in CLOUD_MARKERS {
            let config_hit = marker.config_files.iter().any(|p| pattern_exists(dir, p));
            let dep_hit = marker
                .dependency_needles
                .iter()
                .any(|needle| manifests.values().any(|content| content.contains(needle)));
            if config_hit || dep_hit {
                context.cloud_providers.insert(marker.provider.to_string());
            }
        }

        context.maturity = self.detect_maturity(dir);
        context.confidence = (context.languages.len() as f32 * LANGUAGE_CONFIDENCE
            + context.frameworks.len() as f32 * FRAMEWORK_CONFIDENCE
            + context.cloud_providers.len() as f32 * CLOUD_CONFIDENCE)
            .min(1.0);

        debug!(
            languages = context.languages.len(),
            frameworks = context.frameworks.len(),
            cloud = context.cloud_providers.len(),
            maturity = %context.maturity,
            confidence = context.confidence,
            "Context detection complete"
        );

        context
    }

    /// Read dependency manifests for detected languages only, lowercased
    /// for substring matching. Each file is read at most once.
    fn read_manifests(&self, dir: &Path, context: &ProjectContext) -> BTreeMap<&'static str, String> {
        let mut manifests = BTreeMap::new();

        for marker in MANIFEST_MARKERS {
            if !context.languages.contains(marker.language) {
                continue;
            }
            for name in marker.manifests {
                if manifests.contains_key(name) {
                    continue;
                }
                let path = dir.join(name);
                if !path.is_file() {
                    continue;
                }
                match std::fs::read_to_string(&path) {
                    Ok(content) => {
                        manifests.insert(*name, content.to_lowercase());
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Skipping unreadable manifest");
                    }
                }
            }
        }

        manifests
    }

    /// Decision table over build/release evidence. Ambiguous combinations
    /// default to the lowest tier.
    fn detect_maturity(&self, dir: &Path) -> Maturity {
        let ci = CI_MARKERS.iter().any(|p| dir.join(p).exists());
        let container = CONTAINER_MARKERS.iter().any(|p| dir.join(p).exists());
        let tests = TEST_DIR_MARKERS.iter().any(|p| dir.join(p).is_dir());
        let monitoring = MONITORING_MARKERS.iter().any(|p| dir.join(p).exists());
        let stable = self
            .project_version(dir)
            .is_some_and(|v| !v.trim_start_matches('v').starts_with("0."));

        if ci && container && (tests || monitoring || stable) {
            Maturity::Production
        } else if ci || (container && tests) {
            Maturity::PreProduction
        } else {
            Maturity::Mvp
        }
    }

    fn project_version(&self, dir: &Path) -> Option<String> {
        for (name, key) in VERSION_MANIFESTS {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    if let Some(version) = extract_version(&content, key) {
                        return Some(version);
                    }
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable manifest");
                }
            }
        }
        None
    }
}

/// Check a marker pattern against the directory. `*.ext` patterns scan the
/// top two levels; anything else is an exact path.
fn pattern_exists(dir: &Path, pattern: &str) -> bool {
    if let Some(ext) = pattern.strip_prefix("*.") {
        WalkDir::new(dir)
            .max_depth(2)
            .into_iter()
            .filter_entry(|e| !is_skippable_directory(e.file_name().to_string_lossy().as_ref()))
            .filter_map(|e| e.ok())
            .any(|e| {
                e.path().is_file() && e.path().extension().is_some_and(|x| x == ext)
            })
    } else {
        dir.join(pattern).exists()
    }
}

fn is_skippable_directory(name: &str) -> bool {
    matches!(name, ".git" | "node_modules" | "target" | "__pycache__")
}

/// Pull a version value out of a manifest line like `version = "1.2.0"` or
/// `"version": "1.2.0",`.
fn extract_version(content: &str, key: &str) -> Option<String> {
    for line in content.lines() {
        let trimmed = line.trim_start();
        if !trimmed.starts_with(key) {
            continue;
        }
        let rest = trimmed[key.len()..].trim_start();
        let Some(rest) = rest.strip_prefix([':', '=']) else {
            continue;
        };
        let value = rest.trim().trim_end_matches(',').trim_matches('"');
        if !value.is_empty() && value.chars().next().is_some_and(|c| c.is_ascii_digit() || c == 'v')
        {
            return Some(value.to_string());
        }
    }
    None
}
