//! Response composition from search results
//!
//! Answers are built from the single top-ranked record by extracting
//! sentences that mention the query terms, with two fallback tiers when
//! nothing matches. Sentence splitting is a period heuristic and will
//! mis-segment abbreviations and decimals; that is accepted behavior.

use crate::crawler::PageRecord;

const NO_RESULTS: &str = "I couldn't find specific information about that in the documentation. \
     Please try rephrasing your question or ask about a different topic.";

const NO_CONTENT: &str = "I found a relevant page but couldn't extract the content. \
     Please check the source link below.";

const SOURCE_NOTE: &str =
    "\n\nFor complete details, please refer to the documentation link below.";

/// Compose a natural-language answer for `query` from ranked results.
///
/// Selection order: up to 3 sentences containing a query term, else up to 4
/// sentences longer than 30 characters, else the first 500 characters of
/// the content with a truncation marker.
pub fn compose_response(query: &str, results: &[&PageRecord]) -> String {
    let Some(top) = results.first() else {
        return NO_RESULTS.to_string();
    };

    if top.content.is_empty() {
        return NO_CONTENT.to_string();
    }

    let mut response = format!("Based on '{}':\n\n", top.title);

    let query_lower = query.to_lowercase();
    let terms: Vec<&str> = query_lower.split_whitespace().collect();

    let normalized = top.content.replace('\n', ". ");
    let sentences: Vec<&str> = normalized
        .split('.')
        .map(str::trim)
        .filter(|s| s.chars().count() > 20)
        .collect();

    let mut relevant: Vec<&str> = Vec::new();
    for &sentence in &sentences {
        let sentence_lower = sentence.to_lowercase();
        if terms.iter().any(|term| sentence_lower.contains(term)) {
            relevant.push(sentence);
            if relevant.len() >= 3 {
                break;
            }
        }
    }

    if !relevant.is_empty() {
        response.push_str(&relevant.join(". "));
        response.push('.');
    } else {
        let meaningful: Vec<&str> = sentences
            .iter()
            .filter(|s| s.chars().count() > 30)
            .take(4)
            .copied()
            .collect();

        if !meaningful.is_empty() {
            response.push_str(&meaningful.join(". "));
            response.push('.');
        } else {
            response.extend(top.content.chars().take(500));
            response.push_str("...");
        }
    }

    response.push_str(SOURCE_NOTE);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, content: &str) -> PageRecord {
        PageRecord {
            url: "https://docs.x.com/page".to_string(),
            title: title.to_string(),
            content: content.to_string(),
            headings: Vec::new(),
            code_snippets: Vec::new(),
            links: Vec::new(),
        }
    }

    #[test]
    fn test_no_results_apologizes() {
        let response = compose_response("webhooks", &[]);
        assert!(response.contains("couldn't find specific information"));
    }

    #[test]
    fn test_empty_content_points_at_source() {
        let top = record("Empty Page", "");
        let response = compose_response("webhooks", &[&top]);
        assert!(response.contains("couldn't extract the content"));
    }

    #[test]
    fn test_term_matching_sentences_selected() {
        let top = record(
            "Webhook Guide",
            "Webhooks deliver events to your endpoint as they happen. \
             Unrelated sentence about something else entirely here. \
             Retries for webhook deliveries use exponential backoff.",
        );

        let response = compose_response("webhook", &[&top]);
        assert!(response.starts_with("Based on 'Webhook Guide':\n\n"));
        assert!(response.contains("Webhooks deliver events"));
        assert!(response.contains("Retries for webhook deliveries"));
        assert!(!response.contains("Unrelated sentence"));
        assert!(response.ends_with("documentation link below."));
    }

    #[test]
    fn test_at_most_three_matching_sentences() {
        let top = record(
            "Webhook Guide",
            "First webhook sentence is long enough. \
             Second webhook sentence is long enough. \
             Third webhook sentence is long enough. \
             Fourth webhook sentence is long enough.",
        );

        let response = compose_response("webhook", &[&top]);
        assert!(!response.contains("Fourth webhook sentence"));
    }

    #[test]
    fn test_fallback_to_long_sentences_without_term_match() {
        let top = record(
            "Billing Overview",
            "This page explains how invoices are generated monthly. \
             Short bit. \
             Payment methods can be updated from the account settings page.",
        );

        let response = compose_response("kubernetes", &[&top]);
        assert!(response.contains("invoices are generated monthly"));
        assert!(response.contains("Payment methods can be updated"));
        assert!(!response.contains("couldn't find"));
    }

    #[test]
    fn test_last_resort_truncates_content() {
        // No period-delimited sentence exceeds the length thresholds
        let top = record("Terse Page", "tiny words only here");
        let response = compose_response("kubernetes", &[&top]);
        assert!(response.contains("tiny words only here..."));
    }

    #[test]
    fn test_newlines_treated_as_sentence_breaks() {
        let top = record(
            "Config Reference",
            "The config file lives in the home directory\nEnvironment variables override file settings",
        );

        let response = compose_response("config", &[&top]);
        assert!(response.contains("The config file lives in the home directory"));
    }
}
