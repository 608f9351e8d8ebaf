//! Ordered classification patterns.
//!
//! Evaluated top-to-bottom against the lowercased request text; the first
//! match wins. Ordering is the correctness property here: narrower, less
//! ambiguous phrasing comes before anything that shares vocabulary with
//! other categories (legal-document phrasing before generic "review",
//! debugging symptoms before implementation verbs). Treat this list as a
//! versioned artifact: reorder only with test coverage for the collision
//! you are fixing.

use super::category::PromptCategory;

/// Substring predicate over lowercased text.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Text contains this phrase.
    Phrase(&'static str),
    /// Text contains every needle.
    AllOf(&'static [&'static str]),
}

impl Matcher {
    pub fn matches(&self, text_lower: &str) -> bool {
        match self {
            Self::Phrase(phrase) => text_lower.contains(phrase),
            Self::AllOf(needles) => needles.iter().all(|n| text_lower.contains(n)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PromptPattern {
    pub matcher: Matcher,
    pub category: PromptCategory,
}

const fn phrase(phrase: &'static str, category: PromptCategory) -> PromptPattern {
    PromptPattern {
        matcher: Matcher::Phrase(phrase),
        category,
    }
}

const fn all_of(needles: &'static [&'static str], category: PromptCategory) -> PromptPattern {
    PromptPattern {
        matcher: Matcher::AllOf(needles),
        category,
    }
}

use PromptCategory::*;

pub const PATTERNS: &[PromptPattern] = &[
    // Legal / business documents. These must outrank the generic "review"
    // vocabulary below ("review this contract" is legal, not code review).
    phrase("terms of service", LegalBusiness),
    phrase("privacy policy", LegalBusiness),
    phrase("license agreement", LegalBusiness),
    phrase("non-disclosure", LegalBusiness),
    phrase("service level agreement", LegalBusiness),
    phrase("intellectual property", LegalBusiness),
    phrase("payment terms", LegalBusiness),
    phrase("gdpr", LegalBusiness),
    all_of(&["contract", "clause"], LegalBusiness),
    all_of(&["legal", "compliance"], LegalBusiness),
    // Debugging symptoms, before implementation verbs ("fix" vs "add").
    all_of(&["fix", "bug"], CodeDebugging),
    phrase("stack trace", CodeDebugging),
    phrase("traceback", CodeDebugging),
    phrase("null pointer", CodeDebugging),
    phrase("segmentation fault", CodeDebugging),
    phrase("not working", CodeDebugging),
    phrase("doesn't work", CodeDebugging),
    phrase("does not work", CodeDebugging),
    phrase("fails with", CodeDebugging),
    phrase("throws an error", CodeDebugging),
    phrase("crashes when", CodeDebugging),
    phrase("root cause", CodeDebugging),
    phrase("regression", CodeDebugging),
    phrase("vulnerab", CodeDebugging),
    phrase("sql injection", CodeDebugging),
    phrase("exploit", CodeDebugging),
    all_of(&["debug", "issue"], CodeDebugging),
    // Code review.
    phrase("code review", CodeReview),
    phrase("review this code", CodeReview),
    phrase("review my code", CodeReview),
    phrase("review the code", CodeReview),
    phrase("review these changes", CodeReview),
    all_of(&["review", "pull request"], CodeReview),
    all_of(&["review", "diff"], CodeReview),
    all_of(&["feedback", "code"], CodeReview),
    // Devops and infrastructure.
    phrase("deploy to production", Devops),
    phrase("deployment pipeline", Devops),
    phrase("ci/cd", Devops),
    phrase("github actions", Devops),
    phrase("dockerfile", Devops),
    phrase("docker compose", Devops),
    phrase("kubernetes", Devops),
    phrase("k8s", Devops),
    phrase("terraform", Devops),
    phrase("helm chart", Devops),
    phrase("rollback", Devops),
    all_of(&["provision", "infrastructure"], Devops),
    // Architecture and design.
    phrase("system design", Architecture),
    phrase("architectur", Architecture),
    phrase("design pattern", Architecture),
    phrase("microservice", Architecture),
    phrase("monolith", Architecture),
    phrase("event-driven", Architecture),
    phrase("high availability", Architecture),
    phrase("scalab", Architecture),
    phrase("tech stack", Architecture),
    all_of(&["database", "schema", "design"], Architecture),
    // Documentation.
    phrase("write documentation", Documentation),
    phrase("readme", Documentation),
    phrase("docstring", Documentation),
    phrase("api documentation", Documentation),
    phrase("changelog", Documentation),
    phrase("user guide", Documentation),
    all_of(&["add", "comments"], Documentation),
    all_of(&["document", "function"], Documentation),
    // Implementation. Broad verbs, so they sit late among code categories.
    phrase("implement", CodeImplementation),
    phrase("add a feature", CodeImplementation),
    phrase("new feature", CodeImplementation),
    phrase("write a function", CodeImplementation),
    phrase("create a function", CodeImplementation),
    phrase("add an endpoint", CodeImplementation),
    phrase("add support for", CodeImplementation),
    phrase("refactor", CodeImplementation),
    phrase("write tests", CodeImplementation),
    phrase("unit test", CodeImplementation),
    phrase("integration test", CodeImplementation),
    phrase("optimize", CodeImplementation),
    // General questions. Broadest phrasing, last on purpose.
    phrase("difference between", GeneralQuestion),
    phrase("what is", GeneralQuestion),
    phrase("what does", GeneralQuestion),
    phrase("how does", GeneralQuestion),
    phrase("why does", GeneralQuestion),
    phrase("explain", GeneralQuestion),
    phrase("which is better", GeneralQuestion),
    phrase("can you recommend", GeneralQuestion),
];

/// Keyword weights for the phase-2 fallback. A category wins only with a
/// strict unique maximum of at least `MIN_FALLBACK_SCORE`.
pub struct CategoryKeywords {
    pub category: PromptCategory,
    pub keywords: &'static [(&'static str, u32)],
}

pub const MIN_FALLBACK_SCORE: u32 = 2;

pub const FALLBACK_KEYWORDS: &[CategoryKeywords] = &[
    CategoryKeywords {
        category: CodeDebugging,
        keywords: &[
            ("bug", 2),
            ("error", 2),
            ("fix", 2),
            ("crash", 2),
            ("broken", 2),
            ("debug", 2),
            ("exception", 2),
            ("fail", 1),
            ("issue", 1),
        ],
    },
    CategoryKeywords {
        category: CodeReview,
        keywords: &[("review", 2), ("critique", 2), ("feedback", 1), ("quality", 1)],
    },
    CategoryKeywords {
        category: Devops,
        keywords: &[
            ("deploy", 2),
            ("docker", 2),
            ("infrastructure", 2),
            ("pipeline", 1),
            ("server", 1),
            ("monitoring", 1),
        ],
    },
    CategoryKeywords {
        category: Architecture,
        keywords: &[
            ("design", 1),
            ("structure", 1),
            ("pattern", 1),
            ("component", 1),
            ("coupling", 2),
        ],
    },
    CategoryKeywords {
        category: Documentation,
        keywords: &[("document", 2), ("docs", 2), ("comment", 1), ("guide", 1)],
    },
    CategoryKeywords {
        category: LegalBusiness,
        keywords: &[
            ("legal", 2),
            ("contract", 2),
            ("compliance", 2),
            ("license", 1),
            ("policy", 1),
            ("business", 1),
        ],
    },
    CategoryKeywords {
        category: CodeImplementation,
        keywords: &[
            ("function", 1),
            ("feature", 1),
            ("endpoint", 1),
            ("class", 1),
            ("code", 1),
            ("write", 1),
            ("add", 1),
            ("create", 1),
        ],
    },
    CategoryKeywords {
        category: GeneralQuestion,
        keywords: &[("what", 1), ("how", 1), ("why", 1), ("question", 1)],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matcher_phrase() {
        let m = Matcher::Phrase("stack trace");
        assert!(m.matches("got this stack trace from prod"));
        assert!(!m.matches("got this trace"));
    }

    #[test]
    fn test_matcher_all_of() {
        let m = Matcher::AllOf(&["fix", "bug"]);
        assert!(m.matches("please fix this bug"));
        assert!(!m.matches("please fix this"));
    }

    #[test]
    fn test_legal_patterns_precede_review_patterns() {
        let first_review = PATTERNS
            .iter()
            .position(|p| p.category == PromptCategory::CodeReview)
            .unwrap();
        let last_legal = PATTERNS
            .iter()
            .rposition(|p| p.category == PromptCategory::LegalBusiness)
            .unwrap();
        assert!(last_legal < first_review);
    }

    #[test]
    fn test_general_patterns_are_last() {
        let first_general = PATTERNS
            .iter()
            .position(|p| p.category == PromptCategory::GeneralQuestion)
            .unwrap();
        assert!(
            PATTERNS[first_general..]
                .iter()
                .all(|p| p.category == PromptCategory::GeneralQuestion)
        );
    }
}
