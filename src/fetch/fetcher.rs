use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::RuleInfo;
use crate::config::TokenizerConfig;
use crate::error::Result;
use crate::utils::estimate_tokens_with_encoding;

use super::cache::{Rule, RuleCache};
use super::store::DocumentStore;

/// Per-rule fetch result. Failure is data here, not an exception, so the
/// batch loop continues past individual failures.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Served from the cache.
    Hit(Rule),
    /// Retrieved from the store and cached.
    Fetched(Rule),
    Failed {
        path: String,
        error: String,
    },
}

/// Resolves selected rules to ready-to-inject content.
pub struct RuleFetcher {
    store: Arc<dyn DocumentStore>,
    cache: Option<Arc<RuleCache>>,
    tokenizer: TokenizerConfig,
}

impl RuleFetcher {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        cache: Option<Arc<RuleCache>>,
        tokenizer: TokenizerConfig,
    ) -> Self {
        Self {
            store,
            cache,
            tokenizer,
        }
    }

    /// Fetch all selected rules, preserving selection order.
    ///
    /// Fetches for distinct rules are issued concurrently; there is no
    /// ordering dependency between them. Failed rules are logged and
    /// omitted; if every fetch fails the result is simply empty.
    pub async fn fetch_all(&self, selected: &[RuleInfo]) -> Vec<Rule> {
        let outcomes =
            futures::future::join_all(selected.iter().map(|info| self.fetch_one(info))).await;

        let mut rules = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                FetchOutcome::Hit(rule) | FetchOutcome::Fetched(rule) => rules.push(rule),
                FetchOutcome::Failed { path, error } => {
                    warn!(path = %path, error = %error, "Skipping unfetchable rule");
                }
            }
        }
        rules
    }

    /// Fetch a single rule, consulting the cache first.
    ///
    /// A concurrent miss on the same key may redundantly fetch and
    /// overwrite; rule content is idempotent so that is duplicate work, not
    /// a correctness problem.
    pub async fn fetch_one(&self, info: &RuleInfo) -> FetchOutcome {
        if let Some(cache) = &self.cache {
            if let Some(rule) = cache.get(&info.path) {
                debug!(path = %info.path, "Cache hit");
                return FetchOutcome::Hit(rule);
            }
        }

        match self.retrieve(info).await {
            Ok(rule) => {
                if let Some(cache) = &self.cache {
                    cache.set(info.path.clone(), rule.clone());
                }
                FetchOutcome::Fetched(rule)
            }
            Err(e) => FetchOutcome::Failed {
                path: info.path.clone(),
                error: e.to_string(),
            },
        }
    }

    async fn retrieve(&self, info: &RuleInfo) -> Result<Rule> {
        let content = self.store.fetch(&info.path).await?;
        let (title, body) = parse_title(&info.path, &content);
        let estimated_tokens = estimate_tokens_with_encoding(
            &body,
            self.tokenizer.encoding,
            self.tokenizer.heuristic_chars_per_token,
        );

        Ok(Rule {
            path: info.path.clone(),
            title,
            content: body,
            estimated_tokens,
        })
    }
}

/// Parse a human-readable title out of rule content.
///
/// Preference order: frontmatter `title:` key, first `# ` heading, path
/// stem. Frontmatter, when present, is stripped from the returned body.
fn parse_title(path: &str, content: &str) -> (String, String) {
    #[derive(serde::Deserialize)]
    struct Frontmatter {
        #[serde(default)]
        title: Option<String>,
    }

    if let Some(rest) = content.strip_prefix("---\n") {
        if let Some(end) = rest.find("\n---\n") {
            let frontmatter = &rest[..end];
            let body = rest[end + 5..].trim_start().to_string();

            let title = serde_yaml_bw::from_str::<Frontmatter>(frontmatter)
                .ok()
                .and_then(|fm| fm.title);
            if let Some(title) = title {
                return (title, body);
            }
            return (heading_or_stem(path, &body), body);
        }
    }

    (heading_or_stem(path, content), content.to_string())
}

fn heading_or_stem(path: &str, content: &str) -> String {
    content
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|heading| heading.trim().to_string())
        .unwrap_or_else(|| {
            Path::new(path)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(path)
                .to_string()
        })
}
