use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Maximal ASCII alphanumeric runs; runs shorter than 2 are dropped.
    static ref TOKEN_RE: Regex = Regex::new(r"[[:alnum:]]{2,}").expect("valid regex");
}

/// Tokenize text into lowercase alphanumeric runs of length >= 2, in
/// document order and with duplicates kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Tokens of [`tokenize`], sorted and deduplicated. The builder uses this
/// so each document contributes each term exactly once to postings,
/// independent of term frequency.
pub fn tokenize_unique(text: &str) -> Vec<String> {
    let mut tokens = tokenize(text);
    tokens.sort_unstable();
    tokens.dedup();
    tokens
}
