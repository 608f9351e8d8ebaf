use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How far along the project is. Nudges scoring toward maturity-appropriate
/// rules; ambiguous evidence defaults to `Mvp`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Maturity {
    #[default]
    Mvp,
    PreProduction,
    Production,
}

impl Maturity {
    pub fn all() -> Vec<Maturity> {
        vec![Self::Mvp, Self::PreProduction, Self::Production]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mvp => "mvp",
            Self::PreProduction => "pre-production",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for Maturity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detected technology profile of a project directory.
///
/// Created fresh per request, never persisted. Sets are ordered so summaries
/// and serialized metadata are deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectContext {
    pub languages: BTreeSet<String>,
    pub frameworks: BTreeSet<String>,
    pub cloud_providers: BTreeSet<String>,
    pub maturity: Maturity,
    /// Bounded additive evidence score in [0, 1]. Informational only.
    pub confidence: f32,
}

impl ProjectContext {
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty() && self.frameworks.is_empty() && self.cloud_providers.is_empty()
    }

    /// Human-readable one-line-per-field summary for the injection header.
    pub fn summary(&self) -> String {
        fn join(set: &BTreeSet<String>) -> String {
            if set.is_empty() {
                "none".to_string()
            } else {
                set.iter().cloned().collect::<Vec<_>>().join(", ")
            }
        }

        format!(
            "Languages: {}\nFrameworks: {}\nCloud: {}\nMaturity: {}",
            join(&self.languages),
            join(&self.frameworks),
            join(&self.cloud_providers),
            self.maturity
        )
    }
}
