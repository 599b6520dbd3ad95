pub mod builder;
pub mod index;
pub mod persist;
pub mod query;
pub mod tokenizer;

pub use builder::IndexBuilder;
pub use index::{DocId, DocMeta, DocumentStore, TermIndex};
pub use query::QueryEngine;
