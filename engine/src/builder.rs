use crate::index::{DocId, DocumentStore, TermIndex};
use crate::tokenizer::tokenize_unique;
use anyhow::Result;
use std::io::BufRead;

pub const DOC_START: &str = "==DOC_START==";
pub const CONTENT_START: &str = "==CONTENT_START==";
pub const DOC_END: &str = "==DOC_END==";

/// Consumes a document dump, tokenizes each document's content and
/// populates the term index and document store.
///
/// Dump grammar, line-oriented:
/// `==DOC_START==`, an external-id line, `==CONTENT_START==`, content
/// lines, `==DOC_END==`. A document left open at end of stream is still
/// committed when both its external id and content are non-empty
/// (best-effort recovery for truncated input).
pub struct IndexBuilder {
    terms: TermIndex,
    docs: DocumentStore,
    next_id: DocId,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self {
            terms: TermIndex::new(),
            docs: DocumentStore::new(),
            next_id: 0,
        }
    }

    pub fn with_buckets(buckets: usize) -> Self {
        Self {
            terms: TermIndex::with_buckets(buckets),
            docs: DocumentStore::new(),
            next_id: 0,
        }
    }

    pub fn doc_count(&self) -> u32 {
        self.next_id
    }

    /// Commit one document: assign the next dense id, store its metadata
    /// and insert its deduplicated tokens into the term index.
    pub fn add_document(&mut self, external_id: &str, content: &str) -> DocId {
        let id = self.next_id;
        self.next_id += 1;
        self.docs.add_document(id, external_id, content);
        for token in tokenize_unique(content) {
            self.terms.add(&token, id);
        }
        id
    }

    /// Run the dump state machine over `reader`, committing every complete
    /// document. Returns the number of documents committed by this call.
    pub fn ingest_dump<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut in_doc = false;
        let mut in_content = false;
        let mut ext = String::new();
        let mut content = String::new();
        let mut committed = 0usize;

        for line in reader.lines() {
            let raw = line?;
            let line = clean_line(&raw);
            if line.is_empty() {
                continue;
            }
            // DOC_START resets unconditionally, even mid-content; a
            // half-accumulated document is discarded uncommitted.
            if line == DOC_START {
                in_doc = true;
                in_content = false;
                ext.clear();
                content.clear();
                continue;
            }
            if !in_doc {
                continue;
            }
            if ext.is_empty() {
                ext.push_str(line);
                continue;
            }
            if !in_content {
                if line == CONTENT_START {
                    in_content = true;
                }
                continue;
            }
            if line == DOC_END {
                if !ext.is_empty() && !content.is_empty() {
                    self.add_document(&ext, &content);
                    committed += 1;
                }
                in_doc = false;
                in_content = false;
                continue;
            }
            content.push_str(line);
            content.push(' ');
        }

        // Truncated trailing document: commit under the same condition.
        if in_doc && !ext.is_empty() && !content.is_empty() {
            self.add_document(&ext, &content);
            committed += 1;
        }

        tracing::debug!(committed, "dump ingested");
        Ok(committed)
    }

    pub fn into_parts(self) -> (TermIndex, DocumentStore) {
        (self.terms, self.docs)
    }
}

/// Strip a leading BOM, trailing blank characters (including CR/LF) and
/// leading spaces/tabs before state inspection.
fn clean_line(raw: &str) -> &str {
    let s = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    s.trim_end_matches([' ', '\t', '\r', '\n'])
        .trim_start_matches([' ', '\t'])
}
