//! Count extraction from rendered result pages
//!
//! The result count lives in different places depending on which page
//! layout the job board served. Extraction is an ordered cascade of rules:
//! each rule locates a text fragment and parses it, and the first rule that
//! produces a number wins.

mod pattern;

pub use pattern::parse_count;

use crate::config::ExtractionConfig;
use crate::ConfigError;
use scraper::{Html, Selector};
use thiserror::Error;

/// Selectors tried in order when no configuration overrides them
pub const DEFAULT_SELECTORS: &[&str] = &[
    "#searchCount",
    ".jobsearch-JobCountAndSortPane-jobCount",
    "[data-testid=\"jobsearch-JobCountAndSortPane-jobCount\"]",
    "span.mat-text",
];

/// No extraction rule produced a count
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("no extraction rule matched ({rules_tried} rules tried)")]
    NoMatch { rules_tried: usize },
}

/// Where a rule looks for its candidate fragment
#[derive(Debug, Clone)]
pub enum Locator {
    /// First element matching the selector with non-empty text
    Selector(Selector),

    /// Visible text of the whole document (scripts and styles excluded)
    Document,
}

impl Locator {
    fn locate(&self, document: &Html) -> Option<String> {
        match self {
            Locator::Selector(selector) => document
                .select(selector)
                .map(|element| normalize_whitespace(element.text()))
                .find(|text| !text.is_empty()),
            Locator::Document => {
                let text = visible_text(document);
                (!text.is_empty()).then_some(text)
            }
        }
    }
}

/// A `(locate, parse)` pair in the extraction cascade
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    name: String,
    locator: Locator,
    parse: fn(&str) -> Option<u64>,
}

impl ExtractionRule {
    /// Creates a rule from a CSS selector using the standard count pattern
    pub fn selector(css: &str) -> Result<Self, ConfigError> {
        let selector = Selector::parse(css)
            .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {}", css, e)))?;
        Ok(Self {
            name: css.to_string(),
            locator: Locator::Selector(selector),
            parse: parse_count,
        })
    }

    /// Creates the whole-document fallback rule
    pub fn document() -> Self {
        Self {
            name: "document".to_string(),
            locator: Locator::Document,
            parse: parse_count,
        }
    }

    /// Replaces the fragment parser
    pub fn with_parser(mut self, parse: fn(&str) -> Option<u64>) -> Self {
        self.parse = parse;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, document: &Html) -> Option<u64> {
        let fragment = self.locator.locate(document)?;
        let count = (self.parse)(&fragment);
        if count.is_none() {
            tracing::trace!("Rule {} located {:?} but found no count", self.name, fragment);
        }
        count
    }
}

/// Applies the extraction cascade to rendered page content
#[derive(Debug, Clone)]
pub struct CountExtractor {
    rules: Vec<ExtractionRule>,
}

impl CountExtractor {
    pub fn new(rules: Vec<ExtractionRule>) -> Self {
        Self { rules }
    }

    /// Builds the cascade described by the extraction configuration
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        let mut rules = config
            .selectors
            .iter()
            .map(|css| ExtractionRule::selector(css))
            .collect::<Result<Vec<_>, _>>()?;

        if config.document_fallback {
            rules.push(ExtractionRule::document());
        }

        Ok(Self::new(rules))
    }

    /// Appends a rule at the lowest priority
    pub fn push_rule(&mut self, rule: ExtractionRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[ExtractionRule] {
        &self.rules
    }

    /// Extracts the result count from page content
    ///
    /// Rules are evaluated in priority order and evaluation stops at the
    /// first rule that both locates a fragment and parses a count.
    ///
    /// # Example
    ///
    /// ```
    /// use jobwatch::CountExtractor;
    ///
    /// let extractor = CountExtractor::default();
    /// let html = r#"<div id="searchCount">Page 1 of 1,234 jobs</div>"#;
    /// assert_eq!(extractor.extract(html), Ok(1234));
    /// ```
    pub fn extract(&self, content: &str) -> Result<u64, ExtractionError> {
        let document = Html::parse_document(content);

        for rule in &self.rules {
            if let Some(count) = rule.apply(&document) {
                tracing::debug!("Rule {} extracted count {}", rule.name, count);
                return Ok(count);
            }
        }

        Err(ExtractionError::NoMatch {
            rules_tried: self.rules.len(),
        })
    }
}

impl Default for CountExtractor {
    fn default() -> Self {
        let mut rules: Vec<ExtractionRule> = DEFAULT_SELECTORS
            .iter()
            .filter_map(|css| ExtractionRule::selector(css).ok())
            .collect();
        rules.push(ExtractionRule::document());
        Self::new(rules)
    }
}

fn normalize_whitespace<'a>(pieces: impl Iterator<Item = &'a str>) -> String {
    pieces
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collects document text, skipping script and style contents
fn visible_text(document: &Html) -> String {
    let pieces = document.root_element().descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .map(|element| matches!(element.name(), "script" | "style"))
            .unwrap_or(false);
        (!hidden).then_some(&**text)
    });
    normalize_whitespace(pieces)
}
