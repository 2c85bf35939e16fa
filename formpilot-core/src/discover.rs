use formpilot_drivers::form_browser::page::{FormElement, FormPage};
use tracing::{debug, warn};

/// The live markup uses several alternative class-name conventions for the
/// same semantic role; these are tried in sequence. A fixed list, no
/// extensibility point.
const QUESTION_PATTERNS: &[&str] = &[
    "//div[contains(@class, 'Qr7Oae')]//span[contains(@class, 'M7eMe')]",
    "//div[contains(@class, 'freebirdFormviewerViewItemsItemItem')]//span[contains(@class, 'M7eMe')]",
    "//div[contains(@class, 'geS5n')]//span[contains(@class, 'M7eMe')]",
];

/// Container-class alternatives used when re-deriving a question's
/// enclosing interactive container from its label text.
const CONTAINER_CLASSES: &[&str] = &[
    "Qr7Oae",
    "geS5n",
    "M7eMe",
    "freebirdFormviewerViewItemsItemItem",
];

/// The ancestor that wraps a question's label and its input widget.
const ANCESTOR_CONTAINER: &str = "./ancestor-or-self::div[contains(@class, 'geS5n')]";

/// Collect every question text visible in the form: de-duplicated,
/// order-preserving. Errors yield an empty scan for that pattern, never an
/// abort.
pub async fn questions(page: &FormPage) -> Vec<String> {
    let mut texts = Vec::new();

    for pattern in QUESTION_PATTERNS {
        let elements = match page.find_elements_xpath(pattern).await {
            Ok(elements) => elements,
            Err(e) => {
                warn!(target: "discover", %pattern, error = %e, "question scan failed");
                continue;
            }
        };

        for element in elements {
            match element.text().await {
                Ok(raw) => {
                    let trimmed = raw.trim();
                    if !trimmed.is_empty() {
                        texts.push(trimmed.to_string());
                    }
                }
                Err(e) => {
                    debug!(target: "discover", error = %e, "unreadable question label");
                }
            }
        }
    }

    dedupe_preserving_order(texts)
}

/// Re-derive the enclosing interactive container for a question text, or
/// `None` when no marker pattern matches. The caller records that field as
/// not found and continues.
pub async fn container_for(page: &FormPage, question: &str) -> Option<FormElement> {
    let literal = xpath_literal(question);

    for class in CONTAINER_CLASSES {
        let pattern = format!(
            "//div[contains(@class, '{}')]//span[contains(text(), {})]",
            class, literal
        );

        let span = match page.find_element_xpath(&pattern).await {
            Ok(Some(span)) => span,
            Ok(None) => continue,
            Err(e) => {
                debug!(target: "discover", %pattern, error = %e, "container probe failed");
                continue;
            }
        };

        // Walk up to the nearest enclosing container. The ancestor axis
        // yields outermost-first, so the nearest one is last.
        match span.find_elements_xpath(ANCESTOR_CONTAINER).await {
            Ok(mut ancestors) if !ancestors.is_empty() => return ancestors.pop(),
            Ok(_) => continue,
            Err(e) => {
                debug!(target: "discover", error = %e, "ancestor walk failed");
                continue;
            }
        }
    }

    None
}

fn dedupe_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Quote `s` as an XPath string literal. XPath 1.0 has no escape syntax, so
/// text containing both quote kinds must be rebuilt with `concat()`.
fn xpath_literal(s: &str) -> String {
    if !s.contains('\'') {
        return format!("'{}'", s);
    }
    if !s.contains('"') {
        return format!("\"{}\"", s);
    }

    let mut parts = Vec::new();
    for (i, part) in s.split('\'').enumerate() {
        if i > 0 {
            parts.push("\"'\"".to_string());
        }
        if !part.is_empty() {
            parts.push(format!("'{}'", part));
        }
    }
    format!("concat({})", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupe_keeps_first_occurrence_order() {
        let items = vec![
            "What is your full name?".to_string(),
            "Favorite color".to_string(),
            "What is your full name?".to_string(),
            "Birth date".to_string(),
        ];
        assert_eq!(
            dedupe_preserving_order(items),
            vec![
                "What is your full name?",
                "Favorite color",
                "Birth date",
            ]
        );
    }

    #[test]
    fn xpath_literal_plain_text() {
        assert_eq!(xpath_literal("Favorite color"), "'Favorite color'");
    }

    #[test]
    fn xpath_literal_with_apostrophe() {
        assert_eq!(
            xpath_literal("What's your name?"),
            "\"What's your name?\""
        );
    }

    #[test]
    fn xpath_literal_with_both_quote_kinds() {
        let literal = xpath_literal(r#"Say "hi" if you're here"#);
        assert!(literal.starts_with("concat("));
        assert!(literal.contains("'Say \"hi\" if you'"));
        assert!(literal.contains("\"'\""));
    }
}
