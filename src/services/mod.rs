//! Core services for loading and searching documents.

pub mod search;
pub mod store;

pub use search::{search_content, search_index, DocumentHits, Match, MAX_MATCHES_PER_DOC};
pub use store::{is_doc_file, DocIndex, Document, DocumentStore, DOC_SUFFIX};
