//! # docmatch-chunking
//!
//! Splits structured document content into bounded, semantically coherent
//! chunks for embedding and indexing. One chunk per screen / backend
//! operation / endpoint / data entity / test case / section, with
//! oversized chunks split on paragraph boundaries into "Part N" pieces.

mod chunker;
mod splitter;

pub use chunker::chunk_document;
