use crate::index::{DocId, TermIndex};

/// Shape-based boolean evaluator over sorted, duplicate-free postings.
///
/// The shape table, applied to the normalized token list:
/// - 0 tokens: empty result
/// - 1 token: that term's postings
/// - 2 tokens starting with `not`: complement against `[0, doc_count)`
/// - exactly 3 tokens `a and b` / `a or b`: intersection / union
/// - anything else: implicit AND over the non-operator tokens, which
///   drops real OR semantics for longer queries. Kept as-is for
///   compatibility with existing query logs; do not change without a
///   product decision.
pub struct QueryEngine {
    terms: TermIndex,
    doc_count: u32,
}

impl QueryEngine {
    pub fn new(terms: TermIndex, doc_count: u32) -> Self {
        Self { terms, doc_count }
    }

    pub fn doc_count(&self) -> u32 {
        self.doc_count
    }

    pub fn terms(&self) -> &TermIndex {
        &self.terms
    }

    pub fn execute(&self, query: &str) -> Vec<DocId> {
        let tokens = tokenize_query(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        if tokens.len() == 1 {
            return self.terms.get(&tokens[0]).to_vec();
        }

        if tokens.len() == 2 && tokens[0] == "not" {
            return complement(self.terms.get(&tokens[1]), self.doc_count);
        }

        if tokens.len() == 3 {
            let a = self.terms.get(&tokens[0]);
            let b = self.terms.get(&tokens[2]);
            match tokens[1].as_str() {
                "and" => return intersect(a, b),
                "or" => return union(a, b),
                _ => {}
            }
        }

        // Fallback: implicit AND over the remaining terms, operators skipped.
        let mut result: Option<Vec<DocId>> = None;
        for token in &tokens {
            if matches!(token.as_str(), "and" | "or" | "not") {
                continue;
            }
            let cur = self.terms.get(token);
            result = Some(match result {
                None => cur.to_vec(),
                Some(acc) => intersect(&acc, cur),
            });
        }
        result.unwrap_or_default()
    }
}

/// Split on whitespace, lowercase, strip non-alphanumeric runs from both
/// ends of each token and drop tokens that become empty. Interior
/// punctuation is kept.
pub fn tokenize_query(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|t| {
            t.to_lowercase()
                .trim_matches(|c: char| !c.is_ascii_alphanumeric())
                .to_string()
        })
        .filter(|t| !t.is_empty())
        .collect()
}

/// Two-pointer intersection of two sorted, duplicate-free id lists.
pub fn intersect(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut r = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            r.push(a[i]);
            i += 1;
            j += 1;
        } else if a[i] < b[j] {
            i += 1;
        } else {
            j += 1;
        }
    }
    r
}

/// Two-pointer union of two sorted, duplicate-free id lists.
pub fn union(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut r = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] < b[j] {
            r.push(a[i]);
            i += 1;
        } else if a[i] > b[j] {
            r.push(b[j]);
            j += 1;
        } else {
            r.push(a[i]);
            i += 1;
            j += 1;
        }
    }
    r.extend_from_slice(&a[i..]);
    r.extend_from_slice(&b[j..]);
    r
}

/// Complement of a sorted postings list against the full id range
/// `[0, doc_count)`.
pub fn complement(list: &[DocId], doc_count: u32) -> Vec<DocId> {
    let mut r = Vec::with_capacity(doc_count as usize);
    let mut j = 0;
    for doc in 0..doc_count {
        while j < list.len() && list[j] < doc {
            j += 1;
        }
        if j < list.len() && list[j] == doc {
            continue;
        }
        r.push(doc);
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn engine() -> QueryEngine {
        // doc0: cats chase dogs every day; doc1: bark loudly;
        // doc2: cats bark
        let mut idx = TermIndex::with_buckets(16);
        for (doc, text) in [(0, "cats chase dogs every day"), (1, "bark loudly"), (2, "cats bark")] {
            for tok in crate::tokenizer::tokenize_unique(text) {
                idx.add(&tok, doc);
            }
        }
        QueryEngine::new(idx, 3)
    }

    #[test]
    fn set_ops_match_reference_sets() {
        let cases: &[(&[DocId], &[DocId])] = &[
            (&[], &[]),
            (&[1, 3, 5], &[]),
            (&[], &[2, 4]),
            (&[0, 2, 4, 6], &[1, 2, 3, 4]),
            (&[0, 1, 2], &[0, 1, 2]),
        ];
        for (a, b) in cases {
            let sa: BTreeSet<DocId> = a.iter().copied().collect();
            let sb: BTreeSet<DocId> = b.iter().copied().collect();
            let want_and: Vec<DocId> = sa.intersection(&sb).copied().collect();
            let want_or: Vec<DocId> = sa.union(&sb).copied().collect();
            assert_eq!(intersect(a, b), want_and);
            assert_eq!(union(a, b), want_or);
        }
    }

    #[test]
    fn complement_partitions_the_id_range() {
        let postings: &[DocId] = &[1, 3, 4];
        let not = complement(postings, 6);
        assert_eq!(not, vec![0, 2, 5]);
        assert!(intersect(&not, postings).is_empty());
        assert_eq!(union(&not, postings), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn complement_of_empty_is_full_range() {
        assert_eq!(complement(&[], 3), vec![0, 1, 2]);
        assert!(complement(&[0, 1, 2], 3).is_empty());
    }

    #[test]
    fn query_tokens_are_trimmed_and_lowercased() {
        assert_eq!(tokenize_query("  Cats AND (dogs)! "), vec!["cats", "and", "dogs"]);
        assert!(tokenize_query("... !!").is_empty());
    }

    #[test]
    fn single_term_query() {
        let e = engine();
        assert_eq!(e.execute("dogs"), vec![0]);
        assert!(e.execute("missingword").is_empty());
        assert!(e.execute("").is_empty());
    }

    #[test]
    fn binary_and_or_queries() {
        let e = engine();
        assert_eq!(e.execute("cats AND dogs"), vec![0]);
        assert_eq!(e.execute("cats OR bark"), vec![0, 1, 2]);
        assert_eq!(e.execute("dogs or loudly"), vec![0, 1]);
    }

    #[test]
    fn not_query_complements_full_range() {
        let e = engine();
        assert_eq!(e.execute("NOT dogs"), vec![1, 2]);
        assert_eq!(e.execute("not missingword"), vec![0, 1, 2]);
    }

    #[test]
    fn long_query_falls_back_to_implicit_and() {
        let e = engine();
        // 4 tokens: the embedded "or" is skipped and the terms are
        // intersected, so this intentionally returns nothing.
        assert!(e.execute("cats chase or bark").is_empty());
        assert_eq!(e.execute("cats chase dogs day"), vec![0]);
    }

    #[test]
    fn operator_only_query_is_empty() {
        let e = engine();
        assert!(e.execute("and or not and").is_empty());
    }
}
