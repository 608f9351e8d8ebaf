use tracing::debug;

use crate::catalog::{Catalog, RuleInfo};
use crate::config::ScoringConfig;
use crate::context::ProjectContext;
use crate::prompt::{PromptCategory, UserIntent};

use super::scorer::{ScoredRule, score_rule};

/// Hard limits on a selection.
#[derive(Debug, Clone, Copy)]
pub struct SelectionLimits {
    pub max_rules: usize,
    pub max_tokens: usize,
}

/// Score every catalog rule, drop those under the relevance floor and sort
/// descending. The sort is stable, so equal scores keep catalog order and
/// the ranking is reproducible.
pub fn rank(
    catalog: &Catalog,
    context: &ProjectContext,
    intent: &UserIntent,
    category: Option<PromptCategory>,
    weights: &ScoringConfig,
) -> Vec<ScoredRule> {
    let mut scored: Vec<ScoredRule> = catalog
        .rules()
        .iter()
        .map(|rule| score_rule(rule, context, intent, category, weights))
        .filter(|s| s.score >= weights.relevance_floor)
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored
}

/// Budget-constrained selection: greedy, order-preserving knapsack-lite.
///
/// Walks the ranked list accepting any rule whose estimate fits the
/// remaining token budget; a rule that does not fit is skipped, not
/// backtracked. Deliberately simple so outputs are stable. Stops at
/// `max_rules` even with budget to spare. Malformed inputs (empty catalog,
/// zero budgets) yield an empty selection, never an error.
pub fn select(
    catalog: &Catalog,
    context: &ProjectContext,
    intent: &UserIntent,
    category: Option<PromptCategory>,
    limits: SelectionLimits,
    weights: &ScoringConfig,
) -> Vec<RuleInfo> {
    if limits.max_rules == 0 || limits.max_tokens == 0 {
        return Vec::new();
    }

    let ranked = rank(catalog, context, intent, category, weights);

    let mut selected = Vec::new();
    let mut remaining = limits.max_tokens;

    for scored in ranked {
        if selected.len() >= limits.max_rules {
            break;
        }
        if scored.rule.estimated_tokens > remaining {
            continue;
        }
        remaining -= scored.rule.estimated_tokens;
        debug!(
            path = %scored.rule.path,
            score = scored.score,
            reasons = ?scored.reasons,
            "Selected rule"
        );
        selected.push(scored.rule);
    }

    selected
}
