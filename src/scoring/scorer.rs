use crate::catalog::{RuleCategory, RuleInfo};
use crate::config::ScoringConfig;
use crate::context::ProjectContext;
use crate::prompt::{PromptCategory, Urgency, UserIntent};

/// A rule plus its accumulated relevance score and the audit trail of which
/// factors contributed. Ephemeral: produced and consumed within one
/// selection call.
#[derive(Debug, Clone)]
pub struct ScoredRule {
    pub rule: RuleInfo,
    pub score: f32,
    pub reasons: Vec<String>,
}

/// Score one rule against the detected context and extracted intent.
///
/// Factors are independent and additive; relative ordering of the weights
/// is the contract (see `ScoringConfig`), the absolute values are tuning.
pub fn score_rule(
    rule: &RuleInfo,
    context: &ProjectContext,
    intent: &UserIntent,
    category: Option<PromptCategory>,
    weights: &ScoringConfig,
) -> ScoredRule {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    if rule.category == RuleCategory::Base {
        score += weights.base_bonus;
        reasons.push("base rule".to_string());
    }

    if let Some(language) = &rule.language {
        if context.languages.contains(language) {
            score += weights.language_match_weight;
            reasons.push(format!("matches project language: {language}"));
        }
    }

    if let Some(framework) = &rule.framework {
        if context.frameworks.contains(framework) {
            score += weights.framework_match_weight;
            reasons.push(format!("matches project framework: {framework}"));
        }
    }

    if let Some(provider) = &rule.cloud_provider {
        if context.cloud_providers.contains(provider) {
            score += weights.cloud_match_weight;
            reasons.push(format!("matches cloud provider: {provider}"));
        }
    }

    if rule.maturity.contains(&context.maturity) {
        score += weights.maturity_match_weight;
        reasons.push(format!("applies at {} maturity", context.maturity));
    }

    let topic_overlap = rule
        .topics
        .iter()
        .filter(|t| intent.topics.contains(*t))
        .count();
    if topic_overlap > 0 {
        score += weights.topic_overlap_weight * topic_overlap as f32;
        reasons.push(format!("{topic_overlap} topic(s) match the request"));
    }

    if intent.urgency == Urgency::High && rule.topics.iter().any(|t| t == "security") {
        score += weights.urgency_security_bonus;
        reasons.push("urgent request, security rule".to_string());
    }

    if let Some(category) = category {
        let affinity = category.topic_affinity();
        let boost_overlap = rule
            .topics
            .iter()
            .filter(|t| affinity.contains(&t.as_str()))
            .count();
        if boost_overlap > 0 {
            score += weights.category_boost_weight * boost_overlap as f32;
            reasons.push(format!("{boost_overlap} topic(s) match {category} requests"));
        }
    }

    ScoredRule {
        rule: rule.clone(),
        score,
        reasons,
    }
}
