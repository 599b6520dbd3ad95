use engine::persist::{load_index, save_index};
use engine::{IndexBuilder, QueryEngine};
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

#[test]
fn build_save_load_query() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("boolean_index.idx");

    let mut builder = IndexBuilder::new();
    let n = builder.ingest_dump(Cursor::new(DUMP)).unwrap();
    assert_eq!(n, 2);
    let (terms, docs) = builder.into_parts();
    save_index(&path, &terms, &docs).unwrap();

    let (loaded_terms, loaded_docs) = load_index(&path).unwrap();
    assert_eq!(loaded_docs.doc_count(), 2);
    assert_eq!(loaded_docs.get(0).unwrap().external_id, "html");
    assert_eq!(loaded_docs.get(1).unwrap().external_id, "txt");
    for (term, postings) in terms.iter() {
        assert_eq!(loaded_terms.get(term), postings, "postings differ for {term}");
    }
    assert_eq!(loaded_terms.get("dogs"), &[0]);
    assert_eq!(loaded_terms.get("cats"), &[0]);

    let engine = QueryEngine::new(loaded_terms, loaded_docs.doc_count() as u32);
    assert_eq!(engine.execute("cats AND dogs"), vec![0]);
    assert_eq!(engine.execute("NOT dogs"), vec![1]);
    assert_eq!(engine.execute("cats or bark"), vec![0, 1]);
    assert!(engine.execute("missingword").is_empty());
    // 4+ tokens: the embedded OR is ignored by the implicit-AND fallback.
    assert!(engine.execute("cats chase or bark").is_empty());
}

#[test]
fn previews_roundtrip_clean() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("idx");

    let mut builder = IndexBuilder::new();
    let long_body = "word ".repeat(100);
    builder.add_document("html", &long_body);
    builder.add_document("txt", "pipes | and\nnewlines\r\nhere");
    let (terms, docs) = builder.into_parts();
    save_index(&path, &terms, &docs).unwrap();

    let (_, loaded) = load_index(&path).unwrap();
    for (_, meta) in loaded.iter() {
        assert!(meta.preview.chars().count() <= 200);
        for banned in ['|', '\r', '\n'] {
            assert!(!meta.preview.contains(banned));
            assert!(!meta.external_id.contains(banned));
        }
    }
}

#[test]
fn load_rejects_garbage_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.idx");
    std::fs::write(&path, "not an index at all\n").unwrap();
    assert!(load_index(&path).is_err());
}

#[test]
fn load_rejects_missing_file() {
    let dir = tempdir().unwrap();
    assert!(load_index(&dir.path().join("absent.idx")).is_err());
}
