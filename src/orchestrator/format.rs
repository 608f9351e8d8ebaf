use crate::context::ProjectContext;
use crate::fetch::Rule;

/// Build the injectable document: detected-context summary, then each
/// selected rule's title, source path and content in selection order.
pub fn format_injection(context: &ProjectContext, rules: &[Rule]) -> String {
    let content_len: usize = rules.iter().map(|r| r.content.len()).sum();
    let mut out = String::with_capacity(content_len + 256);

    out.push_str("# Project Rules Context\n\n");
    out.push_str("## Detected Context\n");
    for line in context.summary().lines() {
        out.push_str("- ");
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');

    for rule in rules {
        out.push_str("## ");
        out.push_str(&rule.title);
        out.push('\n');
        out.push_str("Source: ");
        out.push_str(&rule.path);
        out.push_str("\n\n");
        out.push_str(rule.content.trim_end());
        out.push_str("\n\n");
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(path: &str, title: &str) -> Rule {
        Rule {
            path: path.to_string(),
            title: title.to_string(),
            content: format!("{title} body"),
            estimated_tokens: 10,
        }
    }

    #[test]
    fn test_format_structure() {
        let mut context = ProjectContext::default();
        context.languages.insert("python".into());

        let rules = vec![
            rule("base/a.md", "Alpha"),
            rule("base/b.md", "Beta"),
        ];
        let doc = format_injection(&context, &rules);

        assert!(doc.starts_with("# Project Rules Context"));
        assert!(doc.contains("- Languages: python"));
        assert!(doc.contains("## Alpha\nSource: base/a.md"));
        assert!(doc.contains("Alpha body"));

        // Selection order is preserved.
        let alpha = doc.find("## Alpha").unwrap();
        let beta = doc.find("## Beta").unwrap();
        assert!(alpha < beta);
    }

    #[test]
    fn test_format_with_no_rules_still_has_context() {
        let context = ProjectContext::default();
        let doc = format_injection(&context, &[]);
        assert!(doc.contains("## Detected Context"));
    }
}
