use anyhow::Result;
use engine::persist::load_index;
use engine::{DocId, DocumentStore, QueryEngine};
use std::fmt::Write as _;
use std::path::Path;

/// Default number of results shown per query.
pub const RESULT_LIMIT: usize = 5;

/// A loaded, read-only index plus the boolean evaluator. After `open`
/// nothing is mutated, so one instance can back any number of queries.
pub struct Searcher {
    engine: QueryEngine,
    docs: DocumentStore,
}

impl Searcher {
    pub fn open(index_path: &Path) -> Result<Self> {
        let (terms, docs) = load_index(index_path)?;
        let doc_count = docs.doc_count() as u32;
        tracing::info!(docs = docs.doc_count(), terms = terms.len(), "index loaded");
        Ok(Self {
            engine: QueryEngine::new(terms, doc_count),
            docs,
        })
    }

    pub fn doc_count(&self) -> u32 {
        self.engine.doc_count()
    }

    pub fn execute(&self, query: &str) -> Vec<DocId> {
        self.engine.execute(query)
    }

    /// Human-readable result listing: total count, then up to `limit`
    /// entries with internal id, external id and preview.
    pub fn format_results(&self, results: &[DocId], limit: usize) -> String {
        if results.is_empty() {
            return "No documents found.\n".to_string();
        }

        let shown = limit.min(results.len());
        let mut out = String::new();
        let _ = writeln!(out, "==========================================");
        let _ = writeln!(out, "Documents found: {}", results.len());
        let _ = writeln!(out, "Showing first {shown}:");
        let _ = writeln!(out, "==========================================");
        for (rank, &doc_id) in results.iter().take(shown).enumerate() {
            let _ = writeln!(out, "[{}] internal_id: {doc_id}", rank + 1);
            if let Some(meta) = self.docs.get(doc_id) {
                let _ = writeln!(out, "    external_id: {}", meta.external_id);
                if !meta.preview.is_empty() {
                    let _ = writeln!(out, "    preview: {}", meta.preview);
                }
            }
            let _ = writeln!(out, "------------------------------------------");
        }
        if results.len() > limit {
            let _ = writeln!(out, "... and {} more documents", results.len() - limit);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::persist::save_index;
    use engine::IndexBuilder;

    fn open_sample() -> Searcher {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idx");
        let mut b = IndexBuilder::new();
        b.add_document("html", "Cats chase dogs every day");
        b.add_document("txt", "Bark loudly");
        let (terms, docs) = b.into_parts();
        save_index(&path, &terms, &docs).unwrap();
        Searcher::open(&path).unwrap()
    }

    #[test]
    fn formats_hits_with_metadata() {
        let s = open_sample();
        let results = s.execute("cats");
        let text = s.format_results(&results, RESULT_LIMIT);
        assert!(text.contains("Documents found: 1"));
        assert!(text.contains("internal_id: 0"));
        assert!(text.contains("external_id: html"));
        assert!(text.contains("preview: Cats chase dogs"));
    }

    #[test]
    fn formats_empty_result() {
        let s = open_sample();
        let text = s.format_results(&[], RESULT_LIMIT);
        assert_eq!(text, "No documents found.\n");
    }

    #[test]
    fn truncates_to_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idx");
        let mut b = IndexBuilder::new();
        for i in 0..8 {
            b.add_document("txt", &format!("common words number{i}"));
        }
        let (terms, docs) = b.into_parts();
        save_index(&path, &terms, &docs).unwrap();
        let s = Searcher::open(&path).unwrap();

        let results = s.execute("common");
        assert_eq!(results.len(), 8);
        let text = s.format_results(&results, RESULT_LIMIT);
        assert!(text.contains("Showing first 5:"));
        assert!(text.contains("... and 3 more documents"));
    }
}
