use tracing::debug;

use super::category::PromptCategory;
use super::patterns::{FALLBACK_KEYWORDS, MIN_FALLBACK_SCORE, PATTERNS};

/// Classify a request into exactly one category.
///
/// Total and deterministic: the same text always yields the same category,
/// and there is no error path; anything unmatched is `Unclear`.
pub fn classify(text: &str) -> PromptCategory {
    let lower = text.to_lowercase();
    if lower.trim().is_empty() {
        return PromptCategory::Unclear;
    }

    // Phase 1: ordered pattern table, first match wins.
    for pattern in PATTERNS {
        if pattern.matcher.matches(&lower) {
            debug!(category = %pattern.category, "Pattern match");
            return pattern.category;
        }
    }

    keyword_fallback(&lower)
}

/// Phase 2: weighted keyword tally. Requires a strict unique maximum of at
/// least `MIN_FALLBACK_SCORE`; ties and weak signals stay `Unclear`.
fn keyword_fallback(text_lower: &str) -> PromptCategory {
    let mut best = PromptCategory::Unclear;
    let mut best_score = 0u32;
    let mut tied = false;

    for entry in FALLBACK_KEYWORDS {
        let score: u32 = entry
            .keywords
            .iter()
            .filter(|(needle, _)| text_lower.contains(needle))
            .map(|(_, weight)| *weight)
            .sum();

        if score > best_score {
            best = entry.category;
            best_score = score;
            tied = false;
        } else if score == best_score && score > 0 {
            tied = true;
        }
    }

    if tied || best_score < MIN_FALLBACK_SCORE {
        debug!(best_score, tied, "Keyword fallback inconclusive");
        PromptCategory::Unclear
    } else {
        debug!(category = %best, best_score, "Keyword fallback match");
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_unclear() {
        assert_eq!(classify(""), PromptCategory::Unclear);
        assert_eq!(classify("   \n\t"), PromptCategory::Unclear);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let text = "Fix the authentication bug in auth.py";
        let first = classify(text);
        for _ in 0..10 {
            assert_eq!(classify(text), first);
        }
    }

    #[test]
    fn test_fix_bug_is_debugging() {
        assert_eq!(
            classify("Fix the authentication bug in auth.py"),
            PromptCategory::CodeDebugging
        );
    }

    #[test]
    fn test_sql_injection_report_is_debugging() {
        assert_eq!(
            classify("URGENT: SQL injection vulnerability"),
            PromptCategory::CodeDebugging
        );
    }

    #[test]
    fn test_legal_outranks_review() {
        // "review" vocabulary is present, but legal phrasing is earlier in
        // the table and must win.
        assert_eq!(
            classify("Please review our terms of service draft"),
            PromptCategory::LegalBusiness
        );
    }

    #[test]
    fn test_code_review() {
        assert_eq!(
            classify("Can you do a code review of the parser module?"),
            PromptCategory::CodeReview
        );
    }

    #[test]
    fn test_devops() {
        assert_eq!(
            classify("Set up the deployment pipeline for staging"),
            PromptCategory::Devops
        );
    }

    #[test]
    fn test_architecture() {
        assert_eq!(
            classify("How should we approach the system design for uploads?"),
            PromptCategory::Architecture
        );
    }

    #[test]
    fn test_documentation() {
        assert_eq!(
            classify("Update the readme with install steps"),
            PromptCategory::Documentation
        );
    }

    #[test]
    fn test_implementation() {
        assert_eq!(
            classify("Implement pagination for the users list"),
            PromptCategory::CodeImplementation
        );
    }

    #[test]
    fn test_general_question() {
        assert_eq!(
            classify("What is the difference between TCP and UDP?"),
            PromptCategory::GeneralQuestion
        );
    }

    #[test]
    fn test_fallback_requires_threshold() {
        // Single weak keyword ("server", weight 1) stays unclear.
        assert_eq!(classify("the server"), PromptCategory::Unclear);
    }

    #[test]
    fn test_fallback_unique_maximum() {
        // No pattern matches; debugging keywords dominate.
        assert_eq!(classify("some odd bug appeared"), PromptCategory::CodeDebugging);
    }

    #[test]
    fn test_gibberish_is_unclear() {
        assert_eq!(classify("xyzzy plugh"), PromptCategory::Unclear);
    }
}
