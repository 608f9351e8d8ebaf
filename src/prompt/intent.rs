use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// What the request asks to be done, extracted from leading verbs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentAction {
    Implement,
    Fix,
    Refactor,
    Review,
    #[default]
    General,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[default]
    Normal,
    High,
}

/// Topics, action and urgency extracted from a single request.
///
/// Computed once per request from the same text the classifier sees;
/// consumed only by the scorer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserIntent {
    pub topics: BTreeSet<String>,
    pub action: IntentAction,
    pub urgency: Urgency,
}

/// Topic dictionary shared by intent extraction and catalog topic
/// inference. Needles are lowercase substrings; stems ("optimiz",
/// "vulnerab") cover inflections.
const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "security",
        &[
            "security", "auth", "vulnerab", "injection", "xss", "csrf", "password", "token",
            "encrypt", "secret", "credential",
        ],
    ),
    ("testing", &["test", "coverage", "mock", "assert", "fixture"]),
    (
        "performance",
        &["performance", "slow", "optimiz", "latency", "throughput", "profil"],
    ),
    ("caching", &["cache", "caching", "memoiz", "ttl"]),
    (
        "database",
        &["database", "sql", "query", "migration", "schema"],
    ),
    ("api", &[" api", "api ", "endpoint", "graphql", "rest api"]),
    (
        "deployment",
        &["deploy", "release", "docker", "kubernetes", "ci/cd", "pipeline"],
    ),
    (
        "debugging",
        &["bug", "fix", "error", "crash", "debug", "broken", "regression"],
    ),
    ("documentation", &["document", "readme", "docstring", "changelog"]),
    ("logging", &["logging", "log message", "tracing", "observab"]),
    (
        "error-handling",
        &["exception", "error handling", "panic", "retry", "fallback"],
    ),
    (
        "architecture",
        &["architect", "design pattern", "microservice", "modular"],
    ),
    ("quality", &["quality", "refactor", "clean up", "lint", "style", "readab"]),
];

/// Action verbs in precedence order: a request that both fixes and adds is
/// a fix.
const ACTION_VERBS: &[(IntentAction, &[&str])] = &[
    (
        IntentAction::Fix,
        &["fix", "resolve", "debug", "repair", "troubleshoot"],
    ),
    (
        IntentAction::Refactor,
        &["refactor", "restructure", "clean up", "simplify"],
    ),
    (IntentAction::Review, &["review", "audit", "critique"]),
    (
        IntentAction::Implement,
        &["implement", "add", "create", "build", "write"],
    ),
];

const URGENCY_CUES: &[&str] = &[
    "urgent",
    "asap",
    "critical",
    "emergency",
    "immediately",
    "right away",
    "production is down",
    "prod is down",
    "outage",
];

/// Topics present in a piece of text, per the shared dictionary.
pub fn topics_in(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .filter(|(_, needles)| needles.iter().any(|n| lower.contains(n)))
        .map(|(topic, _)| topic.to_string())
        .collect()
}

/// Extract topics, action and urgency from request text.
pub fn extract_intent(text: &str) -> UserIntent {
    let lower = text.to_lowercase();

    let action = ACTION_VERBS
        .iter()
        .find(|(_, verbs)| verbs.iter().any(|v| lower.contains(v)))
        .map(|(action, _)| *action)
        .unwrap_or_default();

    let urgency = if URGENCY_CUES.iter().any(|cue| lower.contains(cue)) {
        Urgency::High
    } else {
        Urgency::Normal
    };

    UserIntent {
        topics: topics_in(text),
        action,
        urgency,
    }
}
