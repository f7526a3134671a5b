use std::collections::BTreeSet;

const EDGE_PUNCTUATION: &[char] = &['.', ',', ':', ';', '!', '?'];
const MIN_KEYWORD_CHARS: usize = 3;

/// Lowercased, edge-stripped tokens of at least three characters.
pub(crate) fn keyword_set(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|token| token.trim_matches(EDGE_PUNCTUATION))
        .filter(|token| token.chars().count() >= MIN_KEYWORD_CHARS)
        .map(str::to_string)
        .collect()
}

/// Normalizes requested keywords: lowercased and deduplicated, empty strings dropped.
pub(crate) fn requested_keywords<I, S>(keywords: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|keyword| keyword.as_ref().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}
