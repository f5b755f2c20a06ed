use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::seen::SeenSet;

/// Live polling state for one normalized search term.
///
/// A watch exists exactly as long as at least one connection subscribes to
/// its term. `in_flight` enforces at most one outstanding search per
/// keyword across scheduler ticks.
#[derive(Debug)]
pub struct Watch {
    pub watchers: HashSet<String>,
    pub in_flight: bool,
    pub last_polled: Option<DateTime<Utc>>,
    pub seen: SeenSet,
}

impl Watch {
    pub fn new(seen_capacity: usize) -> Self {
        Self {
            watchers: HashSet::new(),
            in_flight: false,
            last_polled: None,
            seen: SeenSet::new(seen_capacity),
        }
    }
}

/// Normalizes one raw search term: whitespace trimmed, case folded.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalizes a keyword list, dropping blank entries and duplicates while
/// preserving first-occurrence order.
pub fn normalize_keywords(raw: &[String]) -> Vec<String> {
    let mut keywords = Vec::new();
    for term in raw {
        let term = normalize(term);
        if !term.is_empty() && !keywords.contains(&term) {
            keywords.push(term);
        }
    }
    keywords
}
