use engine::persist::save_index;
use engine::IndexBuilder;
use searcher::Searcher;
use std::io::Cursor;
use tempfile::tempdir;

const DUMP: &str = "\
==DOC_START==
html
==CONTENT_START==
Cats chase dogs every day
==DOC_END==
==DOC_START==
txt
==CONTENT_START==
Bark loudly
==DOC_END==
";

fn build_tiny_index(path: &std::path::Path) {
    let mut builder = IndexBuilder::new();
    builder.ingest_dump(Cursor::new(DUMP)).unwrap();
    let (terms, docs) = builder.into_parts();
    save_index(path, &terms, &docs).unwrap();
}

#[test]
fn boolean_queries_over_loaded_index() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("boolean_index.idx");
    build_tiny_index(&path);

    let searcher = Searcher::open(&path).unwrap();
    assert_eq!(searcher.doc_count(), 2);
    assert_eq!(searcher.execute("cats AND dogs"), vec![0]);
    assert_eq!(searcher.execute("cats OR bark"), vec![0, 1]);
    assert_eq!(searcher.execute("NOT dogs"), vec![1]);
    assert!(searcher.execute("missingword").is_empty());
    // Longer queries fall back to implicit AND; the embedded OR is ignored.
    assert!(searcher.execute("cats chase or bark").is_empty());
}

#[test]
fn open_fails_on_missing_index() {
    let dir = tempdir().unwrap();
    assert!(Searcher::open(&dir.path().join("absent.idx")).is_err());
}

#[test]
fn open_fails_on_malformed_index() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.idx");
    std::fs::write(&path, "DOCS\nnot-a-number\n").unwrap();
    assert!(Searcher::open(&path).is_err());
}
