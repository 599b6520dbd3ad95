pub type DocId = u32;

/// Default bucket count for [`TermIndex`]. The table rehashes once the
/// entry count exceeds `buckets * MAX_CHAIN_LOAD`, so this only sets the
/// starting size.
pub const DEFAULT_BUCKETS: usize = 1 << 16;

/// Preview length in characters stored per document.
pub const PREVIEW_CHARS: usize = 200;

const MAX_CHAIN_LOAD: usize = 4;

const EMPTY_POSTINGS: &[DocId] = &[];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocMeta {
    /// Original label of the document (the dump's type/extension field).
    pub external_id: String,
    /// First [`PREVIEW_CHARS`] characters of content, CR/LF collapsed to spaces.
    pub preview: String,
}

#[derive(Debug)]
struct TermEntry {
    term: String,
    postings: Vec<DocId>,
}

/// Hash-bucketed mapping from a normalized term to its sorted,
/// duplicate-free postings list.
///
/// Buckets are owned `Vec`s scanned linearly for key equality. Postings
/// stay sorted because the builder inserts doc ids in increasing order;
/// `add` only dedups against the current tail.
#[derive(Debug)]
pub struct TermIndex {
    buckets: Vec<Vec<TermEntry>>,
    entries: usize,
}

impl Default for TermIndex {
    fn default() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }
}

impl TermIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buckets(buckets: usize) -> Self {
        Self {
            buckets: (0..buckets.max(1)).map(|_| Vec::new()).collect(),
            entries: 0,
        }
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// 32-bit multiplicative rolling hash (djb2): seed 5381, `h = h*33 + byte`.
    fn hash(term: &str) -> u32 {
        let mut h: u32 = 5381;
        for &b in term.as_bytes() {
            h = h.wrapping_mul(33).wrapping_add(b as u32);
        }
        h
    }

    fn bucket_of(&self, term: &str) -> usize {
        Self::hash(term) as usize % self.buckets.len()
    }

    /// Append `doc_id` to the term's postings unless it already equals the
    /// current tail. Doc ids must be fed in non-decreasing order per term;
    /// the per-document dedup upstream guarantees each (term, doc) pair is
    /// inserted at most once.
    pub fn add(&mut self, term: &str, doc_id: DocId) {
        let b = self.bucket_of(term);
        for entry in &mut self.buckets[b] {
            if entry.term == term {
                if entry.postings.last() != Some(&doc_id) {
                    entry.postings.push(doc_id);
                }
                return;
            }
        }
        self.buckets[b].push(TermEntry {
            term: term.to_string(),
            postings: vec![doc_id],
        });
        self.entries += 1;
        if self.entries > self.buckets.len() * MAX_CHAIN_LOAD {
            self.grow();
        }
    }

    /// Postings for `term`; an absent term yields an empty slice, never an error.
    pub fn get(&self, term: &str) -> &[DocId] {
        let b = self.bucket_of(term);
        for entry in &self.buckets[b] {
            if entry.term == term {
                return &entry.postings;
            }
        }
        EMPTY_POSTINGS
    }

    /// All (term, postings) pairs in bucket-then-chain order (unspecified
    /// to callers; used for serialization).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DocId])> {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().map(|e| (e.term.as_str(), e.postings.as_slice())))
    }

    fn grow(&mut self) {
        let new_size = self.buckets.len() * 2;
        let old = std::mem::replace(
            &mut self.buckets,
            (0..new_size).map(|_| Vec::new()).collect(),
        );
        for chain in old {
            for entry in chain {
                let b = Self::hash(&entry.term) as usize % new_size;
                self.buckets[b].push(entry);
            }
        }
    }
}

/// Dense array of per-document metadata, indexed by internal doc id.
#[derive(Debug, Default)]
pub struct DocumentStore {
    docs: Vec<DocMeta>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sized store with `n` empty slots; the loader uses this so that
    /// `doc_count` is taken from the index header even when some records
    /// are discarded.
    pub fn with_doc_count(n: usize) -> Self {
        let mut docs = Vec::new();
        docs.resize_with(n, DocMeta::default);
        Self { docs }
    }

    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Store metadata for `id`, growing the backing vec to fit. Ids are
    /// expected to arrive gap-free and non-decreasing from the builder;
    /// this is not validated here.
    pub fn add_document(&mut self, id: DocId, external_id: &str, content: &str) {
        let idx = id as usize;
        if self.docs.len() <= idx {
            self.docs.resize_with(idx + 1, DocMeta::default);
        }
        self.docs[idx] = DocMeta {
            external_id: external_id.to_string(),
            preview: make_preview(content),
        };
    }

    pub fn get(&self, id: DocId) -> Option<&DocMeta> {
        self.docs.get(id as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, &DocMeta)> {
        self.docs.iter().enumerate().map(|(i, m)| (i as DocId, m))
    }
}

/// First [`PREVIEW_CHARS`] characters of `content` with newlines and
/// carriage returns collapsed to single spaces.
fn make_preview(content: &str) -> String {
    content
        .chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}
