//! Heading isolation for a single page.
//!
//! Document titles are short, visually emphasized and sit near the top of
//! the first page. Matching against that region first keeps body prose that
//! merely mentions another document ("secured by a Deed of Trust") from
//! deciding the page type.

use tracing::trace;

use super::patterns::{MINOR_WORD, PAGE_LABEL};
use crate::models::config::HeaderConfig;
use crate::models::page::{PageLayout, TextSpan};

/// Spans whose `y` differs by at most this much sit on the same line.
const LINE_TOLERANCE: f32 = 2.0;

/// Extracts a header candidate from page text and optional layout.
#[derive(Debug, Clone)]
pub struct HeaderExtractor {
    top_fraction: f32,
    max_lines: usize,
    max_line_length: usize,
}

impl HeaderExtractor {
    /// Create an extractor with default thresholds.
    pub fn new() -> Self {
        Self::from_config(&HeaderConfig::default())
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &HeaderConfig) -> Self {
        Self {
            top_fraction: config.top_fraction.clamp(0.0, 1.0),
            max_lines: config.max_lines,
            max_line_length: config.max_line_length,
        }
    }

    /// Set the fraction of the page height searched for bold spans.
    pub fn with_top_fraction(mut self, fraction: f32) -> Self {
        self.top_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Isolate the page heading.
    ///
    /// Bold spans in the top region win when layout is available; otherwise
    /// short upper- or title-cased lines among the first few lines are used.
    pub fn extract(&self, text: &str, layout: Option<&PageLayout>) -> Option<String> {
        if let Some(header) = layout.and_then(|l| self.from_layout(l)) {
            trace!("Header from bold spans: {:?}", header);
            return Some(header);
        }

        let header = self.from_leading_lines(text);
        if let Some(ref h) = header {
            trace!("Header from leading lines: {:?}", h);
        }
        header
    }

    fn from_layout(&self, layout: &PageLayout) -> Option<String> {
        if layout.height <= 0.0 {
            return None;
        }

        let cutoff = layout.height * self.top_fraction;
        let mut spans: Vec<_> = layout
            .spans
            .iter()
            .filter(|s| s.bold && s.y <= cutoff && !s.text.trim().is_empty())
            .collect();

        spans.sort_by(|a, b| a.y.total_cmp(&b.y));

        let header = reading_order(spans)
            .iter()
            .map(|s| s.text.trim())
            .collect::<Vec<_>>()
            .join(" ");

        (!header.is_empty()).then_some(header)
    }

    fn from_leading_lines(&self, text: &str) -> Option<String> {
        let header = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !PAGE_LABEL.is_match(line))
            .take(self.max_lines)
            .filter(|line| line.chars().count() < self.max_line_length)
            .filter(|line| is_uppercase(line) || is_title_case(line))
            .collect::<Vec<_>>()
            .join(" ");

        (!header.is_empty()).then_some(header)
    }
}

impl Default for HeaderExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Group `y`-sorted spans into lines and order each line left to right.
fn reading_order(spans: Vec<&TextSpan>) -> Vec<&TextSpan> {
    let mut lines: Vec<Vec<&TextSpan>> = Vec::new();

    for span in spans {
        match lines.last_mut() {
            Some(line) if span.y - line[0].y <= LINE_TOLERANCE => line.push(span),
            _ => lines.push(vec![span]),
        }
    }

    lines
        .into_iter()
        .flat_map(|mut line| {
            line.sort_by(|a, b| a.x.total_cmp(&b.x));
            line
        })
        .collect()
}

/// At least one letter, and every letter uppercase.
fn is_uppercase(line: &str) -> bool {
    let mut letters = line.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| c.is_uppercase())
}

/// Every word capitalized, except minor words after the first.
fn is_title_case(line: &str) -> bool {
    let words: Vec<&str> = line
        .split_whitespace()
        .filter(|w| w.chars().next().is_some_and(|c| c.is_alphabetic()))
        .collect();

    if words.is_empty() {
        return false;
    }

    words.iter().enumerate().all(|(i, word)| {
        let starts_upper = word.chars().next().is_some_and(|c| c.is_uppercase());
        if starts_upper {
            return true;
        }
        let bare: String = word.chars().filter(|c| c.is_alphanumeric()).collect();
        i > 0 && MINOR_WORD.is_match(&bare)
    })
}
