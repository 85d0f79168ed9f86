//! Selector cascade resolution
//!
//! The booking site's markup shifts between deployments and front-end
//! experiments, so every logical field is located by an ordered list of
//! selector strategies: structured test attribute first, then semantic
//! class, then a substring-matched class. The first strategy that produces
//! a non-empty match wins and later strategies are never evaluated.

use scraper::{ElementRef, Selector};
use tracing::{debug, warn};

use super::error::{ExtractionError, ExtractionResult};

/// Ordered, compiled selector strategies for one logical field.
#[derive(Debug, Clone)]
pub struct SelectorCascade {
    field: String,
    selectors: Vec<Selector>,
}

impl SelectorCascade {
    /// Compile the configured selector strings, skipping entries that fail
    /// to parse. A cascade with no usable entry cannot locate its field on
    /// any markup variant, which is a configuration error.
    pub fn compile(field: &str, sources: &[String]) -> ExtractionResult<Self> {
        let mut selectors = Vec::with_capacity(sources.len());
        for source in sources {
            match Selector::parse(source) {
                Ok(selector) => selectors.push(selector),
                Err(e) => warn!("Skipping selector '{}' for {}: {}", source, field, e),
            }
        }
        if selectors.is_empty() {
            return Err(ExtractionError::cascade_unusable(field, sources.len()));
        }
        Ok(Self {
            field: field.to_string(),
            selectors,
        })
    }

    /// Resolve the field to the first non-empty trimmed text under `scope`.
    /// Strategies are tried strictly in listed order; a hit short-circuits
    /// the rest. `default` is returned when no strategy yields text.
    pub fn resolve_text(&self, scope: ElementRef<'_>, default: &str) -> String {
        for (rank, selector) in self.selectors.iter().enumerate() {
            for element in scope.select(selector) {
                let text = element.text().collect::<String>().trim().to_string();
                if !text.is_empty() {
                    debug!("Resolved {} via strategy {}", self.field, rank);
                    return text;
                }
            }
        }
        default.to_string()
    }

    /// Resolve to the full element collection of the first strategy that
    /// matches anything under `scope`. Empty when no strategy matches.
    pub fn resolve_all<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        for (rank, selector) in self.selectors.iter().enumerate() {
            let matched: Vec<ElementRef<'a>> = scope.select(selector).collect();
            if !matched.is_empty() {
                debug!(
                    "Resolved {} to {} elements via strategy {}",
                    self.field,
                    matched.len(),
                    rank
                );
                return matched;
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn cascade(field: &str, sources: &[&str]) -> SelectorCascade {
        let owned: Vec<String> = sources.iter().map(|s| s.to_string()).collect();
        SelectorCascade::compile(field, &owned).unwrap()
    }

    #[test]
    fn first_matching_strategy_short_circuits() {
        let html = Html::parse_document(
            r#"<div><span class="primary">first</span><span class="fallback">second</span></div>"#,
        );
        let cascade = cascade("field", &[".primary", ".fallback"]);
        assert_eq!(cascade.resolve_text(html.root_element(), "N/A"), "first");
    }

    #[test]
    fn empty_text_does_not_satisfy_a_strategy() {
        let html = Html::parse_document(
            r#"<div><span class="primary">  </span><span class="fallback">second</span></div>"#,
        );
        let cascade = cascade("field", &[".primary", ".fallback"]);
        assert_eq!(cascade.resolve_text(html.root_element(), "N/A"), "second");
    }

    #[test]
    fn default_returned_when_nothing_matches() {
        let html = Html::parse_document("<div></div>");
        let cascade = cascade("field", &[".primary", ".fallback"]);
        assert_eq!(cascade.resolve_text(html.root_element(), "N/A"), "N/A");
    }

    #[test]
    fn resolve_all_returns_the_first_non_empty_collection() {
        let html = Html::parse_document(
            r#"<ul><li class="item">a</li><li class="item">b</li></ul>"#,
        );
        let cascade = cascade("items", &[".missing", ".item"]);
        assert_eq!(cascade.resolve_all(html.root_element()).len(), 2);
    }

    #[test]
    fn invalid_entries_are_skipped() {
        let html = Html::parse_document(r#"<div><span class="ok">text</span></div>"#);
        let owned = vec!["[unclosed".to_string(), ".ok".to_string()];
        let cascade = SelectorCascade::compile("field", &owned).unwrap();
        assert_eq!(cascade.resolve_text(html.root_element(), "N/A"), "text");
    }

    #[test]
    fn cascade_with_no_usable_entry_is_an_error() {
        let owned = vec!["[unclosed".to_string()];
        assert!(matches!(
            SelectorCascade::compile("field", &owned),
            Err(ExtractionError::CascadeUnusable { attempted: 1, .. })
        ));
    }
}
