use std::collections::BTreeSet;

use serde::Serialize;

use super::listing::JobListing;
use super::normalizer::requested_keywords;

/// A listing whose keyword overlap with the request met the threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub listing: JobListing,
    /// Fraction of requested keywords found in the listing, within `[0, 1]`.
    pub score: f64,
    /// Requested keywords present in the listing, sorted.
    pub matched_keywords: Vec<String>,
}

/// Normalized set of keywords a candidate is looking for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordQuery {
    keywords: BTreeSet<String>,
}

impl KeywordQuery {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: requested_keywords(keywords),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("threshold must be a number, got {0}")]
    InvalidThreshold(f64),
}

/// Scores listings by keyword coverage and keeps the ones at or above a threshold.
#[derive(Debug, Clone, Copy)]
pub struct KeywordMatcher {
    threshold: f64,
}

impl KeywordMatcher {
    /// Builds a matcher. A threshold above 1.0 keeps nothing; NaN is rejected
    /// because no score compares against it.
    pub fn new(threshold: f64) -> Result<Self, MatchError> {
        if threshold.is_nan() {
            return Err(MatchError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the coverage score and the matched keywords for one listing.
    pub fn score(&self, listing: &JobListing, query: &KeywordQuery) -> (f64, Vec<String>) {
        if query.is_empty() {
            return (0.0, Vec::new());
        }

        let matched: Vec<String> = query
            .iter()
            .filter(|keyword| listing.has_keyword(keyword))
            .map(str::to_string)
            .collect();
        let score = matched.len() as f64 / query.len() as f64;
        (score, matched)
    }

    /// Scores every listing and returns those meeting the threshold, best first.
    /// Ties keep the order the listings were supplied in.
    pub fn rank<I>(&self, listings: I, query: &KeywordQuery) -> Vec<MatchResult>
    where
        I: IntoIterator<Item = JobListing>,
    {
        let mut matches: Vec<MatchResult> = listings
            .into_iter()
            .filter_map(|listing| {
                let (score, matched_keywords) = self.score(&listing, query);
                (score >= self.threshold).then_some(MatchResult {
                    listing,
                    score,
                    matched_keywords,
                })
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(company: &str, title: &str, description: &str) -> JobListing {
        JobListing::new(company, title, description, format!("https://{company}.example"))
    }

    fn matcher(threshold: f64) -> KeywordMatcher {
        KeywordMatcher::new(threshold).expect("valid threshold")
    }

    #[test]
    fn score_is_fraction_of_requested_keywords() {
        let listing = listing("acme", "Backend Engineer", "Rust and Python");
        let query = KeywordQuery::new(["rust", "python", "java"]);

        let (score, matched) = matcher(0.4).score(&listing, &query);

        assert!((score - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(matched, vec!["python".to_string(), "rust".to_string()]);
    }

    #[test]
    fn two_letter_keywords_never_match() {
        let listing = listing("acme", "Backend Engineer", "Go and Python");
        let query = KeywordQuery::new(["go", "python", "java"]);

        let (score, matched) = matcher(0.4).score(&listing, &query);

        assert!((score - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(matched, vec!["python".to_string()]);
    }

    #[test]
    fn query_normalizes_case_and_duplicates() {
        let listing = listing("acme", "Rust Engineer", "");
        let query = KeywordQuery::new(["RUST", "rust", "Rust"]);
        assert_eq!(query.len(), 1);

        let (score, _) = matcher(1.0).score(&listing, &query);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn empty_query_scores_zero_and_matches_nothing() {
        let listings = vec![listing("acme", "Rust Engineer", "Everything")];
        let query = KeywordQuery::new(Vec::<String>::new());

        let (score, matched) = matcher(0.4).score(&listings[0], &query);
        assert_eq!(score, 0.0);
        assert!(matched.is_empty());

        assert!(matcher(0.01).rank(listings, &query).is_empty());
    }

    #[test]
    fn rank_filters_by_threshold_and_sorts_descending() {
        let listings = vec![
            listing("low", "Java Developer", "Spring"),
            listing("high", "Rust Python Engineer", "Tokio"),
            listing("mid", "Rust Developer", "Actix"),
        ];
        let query = KeywordQuery::new(["rust", "python"]);

        let ranked = matcher(0.5).rank(listings, &query);

        let companies: Vec<&str> = ranked.iter().map(|m| m.listing.company()).collect();
        assert_eq!(companies, vec!["high", "mid"]);
        assert_eq!(ranked[0].score, 1.0);
        assert_eq!(ranked[1].score, 0.5);
    }

    #[test]
    fn ties_keep_source_order() {
        let listings = vec![
            listing("first", "Rust", ""),
            listing("better", "Rust Python", ""),
            listing("second", "Rust", ""),
            listing("third", "Rust", ""),
        ];
        let query = KeywordQuery::new(["rust", "python"]);

        let ranked = matcher(0.5).rank(listings, &query);

        let companies: Vec<&str> = ranked.iter().map(|m| m.listing.company()).collect();
        assert_eq!(companies, vec!["better", "first", "second", "third"]);
    }

    #[test]
    fn scores_stay_within_unit_interval() {
        let listings = vec![
            listing("a", "Rust Rust Rust", "rust, rust."),
            listing("b", "", ""),
            listing("c", "Python", "Kotlin Swift"),
        ];
        let queries = [
            KeywordQuery::new(["rust"]),
            KeywordQuery::new(["python", "kotlin", "swift", "ruby"]),
            KeywordQuery::new(Vec::<&str>::new()),
        ];

        let matcher = matcher(0.0);
        for query in &queries {
            for listing in &listings {
                let (score, matched) = matcher.score(listing, query);
                assert!((0.0..=1.0).contains(&score));
                assert!(matched.len() <= query.len());
            }
        }
    }

    #[test]
    fn zero_threshold_keeps_every_listing() {
        let listings = vec![listing("a", "Rust", ""), listing("b", "Java", "")];
        let ranked = matcher(0.0).rank(listings, &KeywordQuery::new(["rust"]));
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn rejects_nan_threshold() {
        assert!(KeywordMatcher::new(f64::NAN).is_err());
    }

    #[test]
    fn threshold_above_one_matches_nothing() {
        let listings = vec![listing("a", "Rust Python", "")];
        let query = KeywordQuery::new(["rust", "python"]);

        assert!(matcher(1.5).rank(listings.clone(), &query).is_empty());
        assert_eq!(matcher(-0.5).rank(listings, &query).len(), 1);
    }

    #[test]
    fn whitespace_keyword_counts_toward_the_denominator() {
        let listing = listing("acme", "Rust Engineer", "");
        let query = KeywordQuery::new(["rust", " "]);

        let (score, matched) = matcher(0.0).score(&listing, &query);

        assert_eq!(query.len(), 2);
        assert_eq!(score, 0.5);
        assert_eq!(matched, vec!["rust".to_string()]);
    }
}
