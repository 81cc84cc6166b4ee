//! Draft element id → canonical player id mapping.
//!
//! The draft game and the main game number players independently. Each draft
//! element is matched in three passes, stopping at the first hit:
//!
//! 1. the same id in the main game, confirmed by second name
//! 2. an exact normalized full-name match
//! 3. the most similar normalized name among same-position players, accepted
//!    above [`FUZZY_THRESHOLD`]

use std::collections::HashMap;

use tracing::{debug, info};

use crate::domain::id::{DraftElementId, PlayerId};
use crate::domain::league::ElementName;
use crate::port::league::IdentifierMapper;

/// Minimum Levenshtein similarity for a fuzzy match.
pub const FUZZY_THRESHOLD: f64 = 0.85;

/// How each draft element was matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MappingReport {
    pub exact: usize,
    pub by_name: usize,
    pub fuzzy: usize,
    pub unmapped: usize,
}

impl MappingReport {
    #[must_use]
    pub const fn mapped(&self) -> usize {
        self.exact + self.by_name + self.fuzzy
    }
}

/// A built id mapping.
#[derive(Debug, Clone, Default)]
pub struct IdMapping {
    table: HashMap<DraftElementId, PlayerId>,
    report: MappingReport,
}

impl IdMapping {
    #[must_use]
    pub fn build(draft: &[ElementName], fantasy: &[ElementName]) -> Self {
        let by_id: HashMap<u32, &ElementName> = fantasy.iter().map(|e| (e.id, e)).collect();
        let normalized: Vec<String> = fantasy.iter().map(ElementName::normalized).collect();
        let mut by_name: HashMap<&str, &ElementName> = HashMap::new();
        for (element, name) in fantasy.iter().zip(&normalized) {
            by_name.insert(name.as_str(), element);
        }

        let mut table = HashMap::with_capacity(draft.len());
        let mut report = MappingReport::default();

        for element in draft {
            let name = element.normalized();

            let matched = if let Some(hit) = by_id
                .get(&element.id)
                .filter(|candidate| candidate.second_name_matches(element))
            {
                report.exact += 1;
                Some(hit.id)
            } else if let Some(hit) = by_name.get(name.as_str()) {
                report.by_name += 1;
                debug!(draft = element.id, player = hit.id, name = %element.web_name, "Matched by name");
                Some(hit.id)
            } else if let Some((hit, similarity)) = fuzzy_match(element, &name, fantasy, &normalized) {
                report.fuzzy += 1;
                debug!(draft = element.id, player = hit.id, similarity, name = %element.web_name, "Matched by similarity");
                Some(hit.id)
            } else {
                report.unmapped += 1;
                debug!(draft = element.id, name = %element.web_name, "No match");
                None
            };

            if let Some(id) = matched {
                table.insert(DraftElementId::new(element.id), PlayerId::new(id));
            }
        }

        info!(
            exact = report.exact,
            by_name = report.by_name,
            fuzzy = report.fuzzy,
            unmapped = report.unmapped,
            total = draft.len(),
            "Player id mapping built"
        );

        Self { table, report }
    }

    #[must_use]
    pub const fn report(&self) -> MappingReport {
        self.report
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl IdentifierMapper for IdMapping {
    fn canonical(&self, element: DraftElementId) -> Option<PlayerId> {
        self.table.get(&element).copied()
    }
}

fn fuzzy_match<'a>(
    element: &ElementName,
    name: &str,
    fantasy: &'a [ElementName],
    normalized: &[String],
) -> Option<(&'a ElementName, f64)> {
    let mut best: Option<(&ElementName, f64)> = None;
    for (candidate, candidate_name) in fantasy.iter().zip(normalized) {
        if candidate.element_type != element.element_type {
            continue;
        }
        let score = similarity(name, candidate_name);
        if score > FUZZY_THRESHOLD && best.map_or(true, |(_, s)| score > s) {
            best = Some((candidate, score));
        }
    }
    best
}

/// `1 - distance / longer length`, in `[0, 1]`.
#[allow(clippy::cast_precision_loss)]
fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j]
            } else {
                1 + prev[j].min(prev[j + 1]).min(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
