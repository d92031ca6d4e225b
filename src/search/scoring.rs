//! Additive keyword scoring and ranking

use std::cmp::Reverse;

use tracing::info;

use crate::crawler::PageRecord;

/// Default number of records returned by a search
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// A scored record, borrowed from the corpus for the duration of one search
#[derive(Debug)]
pub struct SearchHit<'a> {
    /// The matching record
    pub record: &'a PageRecord,

    /// Accumulated relevance score
    pub score: u32,
}

/// Search the corpus for `query`, returning up to `max_results` records,
/// best first. Ties preserve corpus order.
pub fn search<'a>(
    query: &str,
    corpus: &'a [PageRecord],
    max_results: usize,
) -> Vec<&'a PageRecord> {
    rank(query, corpus)
        .into_iter()
        .take(max_results)
        .map(|hit| hit.record)
        .collect()
}

/// Score every record against `query` and sort descending.
///
/// Records scoring zero are excluded. The sort is stable, so equal scores
/// keep their corpus order.
pub fn rank<'a>(query: &str, corpus: &'a [PageRecord]) -> Vec<SearchHit<'a>> {
    let query_lower = query.to_lowercase();
    let terms = query_terms(&query_lower);

    let mut hits: Vec<SearchHit<'a>> = corpus
        .iter()
        .filter_map(|record| {
            let score = score_record(record, &query_lower, &terms);
            (score > 0).then_some(SearchHit { record, score })
        })
        .collect();

    hits.sort_by_key(|hit| Reverse(hit.score));

    info!("Search for '{}' found {} results", query, hits.len());
    if let Some(top) = hits.first() {
        info!("Top result: {} (score: {})", top.record.title, top.score);
    }

    hits
}

/// Lowercased whitespace tokens of the query, deduplicated in order
fn query_terms(query_lower: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    for term in query_lower.split_whitespace() {
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

fn score_record(record: &PageRecord, query_lower: &str, terms: &[&str]) -> u32 {
    let title = record.title.to_lowercase();
    let content = record.content.to_lowercase();
    let mut score = 0u32;

    // Title matches carry the highest weight
    for term in terms {
        if title.contains(term) {
            score += 15;
        }
    }
    if title.contains(query_lower) {
        score += 20;
    }
    if content.contains(query_lower) {
        score += 10;
    }

    // Term frequency in the body, skipping very short terms
    for term in terms {
        if term.chars().count() > 2 {
            score += 2 * content.matches(term).count() as u32;
        }
    }

    for heading in &record.headings {
        let heading_text = heading.text.to_lowercase();
        if heading_text.contains(query_lower) {
            score += 8;
        }
        for term in terms {
            if heading_text.contains(term) {
                score += 3;
            }
        }
    }

    score
}
