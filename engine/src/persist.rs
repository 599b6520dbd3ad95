use crate::index::{DocId, DocumentStore, TermIndex};
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const DOCS_HEADER: &str = "DOCS";
const TERMS_HEADER: &str = "TERMS";

/// Replace pipe/CR/LF with spaces so text fields never break the
/// pipe-delimited, line-oriented record format.
fn sanitize_field(s: &str) -> String {
    s.chars()
        .map(|c| if c == '|' || c == '\r' || c == '\n' { ' ' } else { c })
        .collect()
}

/// Serialize the index to `path`: a `DOCS` section (header, count, one
/// `id|external_id|preview` record per document) followed by a `TERMS`
/// section (header, count, one `term|id,id,...` record per term).
pub fn save_index(path: &Path, terms: &TermIndex, docs: &DocumentStore) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create index file {}", path.display()))?;
    let mut w = BufWriter::new(file);
    write_index(&mut w, terms, docs)?;
    w.flush()?;
    tracing::debug!(
        docs = docs.doc_count(),
        terms = terms.len(),
        path = %path.display(),
        "index saved"
    );
    Ok(())
}

pub fn write_index<W: Write>(w: &mut W, terms: &TermIndex, docs: &DocumentStore) -> Result<()> {
    writeln!(w, "{DOCS_HEADER}")?;
    writeln!(w, "{}", docs.doc_count())?;
    for (id, meta) in docs.iter() {
        writeln!(
            w,
            "{id}|{}|{}",
            sanitize_field(&meta.external_id),
            sanitize_field(&meta.preview)
        )?;
    }

    writeln!(w, "{TERMS_HEADER}")?;
    writeln!(w, "{}", terms.len())?;
    for (term, postings) in terms.iter() {
        write!(w, "{term}|")?;
        for (i, doc) in postings.iter().enumerate() {
            if i > 0 {
                write!(w, ",")?;
            }
            write!(w, "{doc}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Deserialize an index file back into a term index and document store.
/// Missing section headers or a truncated record stream are fatal; no
/// partial index is returned.
pub fn load_index(path: &Path) -> Result<(TermIndex, DocumentStore)> {
    let file = File::open(path)
        .with_context(|| format!("failed to open index file {}", path.display()))?;
    read_index(BufReader::new(file))
}

pub fn read_index<R: BufRead>(reader: R) -> Result<(TermIndex, DocumentStore)> {
    let mut lines = reader.lines();
    let mut next_line = move || -> Result<String> {
        match lines.next() {
            Some(line) => Ok(line?),
            None => bail!("bad index format: unexpected end of file"),
        }
    };

    if next_line()? != DOCS_HEADER {
        bail!("bad index format: missing {DOCS_HEADER} header");
    }
    let doc_count: usize = next_line()?
        .trim()
        .parse()
        .context("bad index format: invalid document count")?;

    let mut docs = DocumentStore::with_doc_count(doc_count);
    for _ in 0..doc_count {
        let line = next_line()?;
        let mut fields = line.splitn(3, '|');
        let (id_field, ext, preview) = match (fields.next(), fields.next(), fields.next()) {
            (Some(a), Some(b), Some(c)) => (a, b, c),
            _ => bail!("bad index format: malformed document record"),
        };
        // Records with an unparsable or out-of-range id are dropped, not
        // treated as corruption.
        match id_field.parse::<DocId>() {
            Ok(id) if (id as usize) < doc_count => docs.add_document(id, ext, preview),
            _ => continue,
        }
    }

    if next_line()? != TERMS_HEADER {
        bail!("bad index format: missing {TERMS_HEADER} header");
    }
    let term_count: usize = next_line()?
        .trim()
        .parse()
        .context("bad index format: invalid term count")?;

    let mut terms = TermIndex::new();
    for _ in 0..term_count {
        let line = next_line()?;
        let Some((term, id_list)) = line.split_once('|') else {
            continue;
        };
        for tok in id_list.split(',') {
            if tok.is_empty() {
                continue;
            }
            if let Ok(id) = tok.parse::<DocId>() {
                terms.add(term, id);
            }
        }
    }

    tracing::debug!(docs = docs.doc_count(), terms = terms.len(), "index loaded");
    Ok((terms, docs))
}
