//! Amount and category extraction from free-form utterances
//!
//! Deliberately not a general number parser: a fixed cascade of keyword and
//! digit heuristics, first match wins. Callers treat a missing amount as a
//! conversational miss and ask the user to rephrase.

use std::sync::LazyLock;

use regex::Regex;

/// Closed vocabulary of spoken amounts. Exact token matches only.
const NUMBER_WORDS: &[(&str, f64)] = &[
    ("one", 1.0),
    ("two", 2.0),
    ("three", 3.0),
    ("four", 4.0),
    ("five", 5.0),
    ("six", 6.0),
    ("seven", 7.0),
    ("eight", 8.0),
    ("nine", 9.0),
    ("ten", 10.0),
    ("twenty", 20.0),
    ("thirty", 30.0),
    ("forty", 40.0),
    ("fifty", 50.0),
    ("sixty", 60.0),
    ("seventy", 70.0),
    ("eighty", 80.0),
    ("ninety", 90.0),
    ("hundred", 100.0),
    ("thousand", 1000.0),
];

/// Ordered category rules: first keyword hit wins, later rules never
/// override an earlier match.
const CATEGORY_RULES: &[(&[&str], &str)] = &[
    (&["grocery", "groceries", "food"], "groceries"),
    (&["entertainment", "movie"], "entertainment"),
    (&["transport", "gas"], "transport"),
    (&["rent"], "rent"),
    (&["coffee", "restaurant", "lunch", "dinner"], "dining"),
    (&["shopping", "clothes"], "shopping"),
    (&["utilit", "electric", "internet"], "utilities"),
];

static CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+(?:\.\d+)?)").expect("hardcoded pattern"));
static DIGIT_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("hardcoded pattern"));

/// Extract a monetary amount from an utterance
///
/// Precedence: a `$`-marked number wins outright. Otherwise the first token
/// (scanning left to right) that is a number word, a digit run, or contains
/// a digit run decides, and scanning stops there. Trailing numbers are
/// ignored on purpose: "split 50 with 3 friends" records 50.
pub fn extract_amount(text: &str) -> Option<f64> {
    if let Some(caps) = CURRENCY_RE.captures(text) {
        return caps[1].parse().ok();
    }

    for token in text.split_whitespace() {
        if let Some((_, value)) = NUMBER_WORDS.iter().find(|(word, _)| *word == token) {
            return Some(*value);
        }
        if token.chars().all(|c| c.is_ascii_digit()) {
            return token.parse().ok();
        }
        if token.chars().any(|c| c.is_ascii_digit()) {
            return DIGIT_RUN_RE
                .find(token)
                .and_then(|m| m.as_str().parse().ok());
        }
    }

    None
}

/// Resolve the expense category for an utterance
///
/// Substring membership against the lowercase text, evaluated in rule
/// order; runs independently of which amount path fired. Falls back to
/// "other".
pub fn extract_category(text: &str) -> &'static str {
    for (keywords, label) in CATEGORY_RULES {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            return label;
        }
    }
    "other"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_marker_wins_outright() {
        assert_eq!(extract_amount("i spent $50 on groceries"), Some(50.0));
        assert_eq!(extract_amount("i spent $42.75 at the store"), Some(42.75));
        // The $-marked run beats any other digits in the text
        assert_eq!(extract_amount("paid 20 then $35 then 99"), Some(35.0));
    }

    #[test]
    fn number_words_resolve_from_the_table() {
        assert_eq!(extract_amount("spent fifty on food"), Some(50.0));
        assert_eq!(extract_amount("i saved a hundred"), Some(100.0));
        // Phrases are not combined: the first matching word decides
        assert_eq!(extract_amount("put away one thousand"), Some(1.0));
    }

    #[test]
    fn digit_tokens_parse_directly() {
        assert_eq!(extract_amount("i saved 100"), Some(100.0));
        assert_eq!(extract_amount("paid 1200 for rent"), Some(1200.0));
    }

    #[test]
    fn mixed_tokens_use_the_first_digit_run() {
        assert_eq!(extract_amount("spent 50bucks today"), Some(50.0));
        assert_eq!(extract_amount("paid 30, for parking"), Some(30.0));
    }

    #[test]
    fn first_number_bearing_token_wins() {
        assert_eq!(extract_amount("spent 50 and then 100 more"), Some(50.0));
        assert_eq!(extract_amount("spent fifty then 100"), Some(50.0));
    }

    #[test]
    fn no_number_means_no_amount() {
        assert_eq!(extract_amount("i spent on coffee"), None);
        assert_eq!(extract_amount(""), None);
    }

    #[test]
    fn categories_follow_rule_order() {
        assert_eq!(extract_category("i spent 50 dollars on groceries"), "groceries");
        assert_eq!(extract_category("bought food at the market"), "groceries");
        assert_eq!(extract_category("movie tickets"), "entertainment");
        assert_eq!(extract_category("gas for the car"), "transport");
        assert_eq!(extract_category("paid rent"), "rent");
        assert_eq!(extract_category("coffee with friends"), "dining");
        assert_eq!(extract_category("new clothes"), "shopping");
        assert_eq!(extract_category("electric bill"), "utilities");
    }

    #[test]
    fn unknown_category_falls_back_to_other() {
        assert_eq!(extract_category("i spent 20 on stuff"), "other");
    }

    #[test]
    fn category_runs_even_when_amount_is_missing() {
        assert_eq!(extract_amount("i spent on groceries"), None);
        assert_eq!(extract_category("i spent on groceries"), "groceries");
    }
}
