use serde::{Deserialize, Serialize};

/// Coarse classification of a user request. Exactly one per request;
/// `Unclear` is the total-function fallback, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptCategory {
    CodeImplementation,
    CodeDebugging,
    CodeReview,
    Architecture,
    Devops,
    Documentation,
    LegalBusiness,
    GeneralQuestion,
    Unclear,
}

impl PromptCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CodeImplementation => "code-implementation",
            Self::CodeDebugging => "code-debugging",
            Self::CodeReview => "code-review",
            Self::Architecture => "architecture",
            Self::Devops => "devops",
            Self::Documentation => "documentation",
            Self::LegalBusiness => "legal-business",
            Self::GeneralQuestion => "general-question",
            Self::Unclear => "unclear",
        }
    }

    /// Rule topics this category has an affinity for. Used by the scorer's
    /// category-aware boost.
    pub fn topic_affinity(&self) -> &'static [&'static str] {
        match self {
            Self::CodeImplementation => &["api", "database", "testing", "quality"],
            Self::CodeDebugging => &["debugging", "testing", "logging", "error-handling"],
            Self::CodeReview => &["quality", "testing", "security"],
            Self::Architecture => &["architecture", "api", "database", "performance"],
            Self::Devops => &["deployment", "caching", "logging", "performance"],
            Self::Documentation => &["documentation"],
            Self::LegalBusiness | Self::GeneralQuestion | Self::Unclear => &[],
        }
    }
}

impl std::fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
