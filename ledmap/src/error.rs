use std::path::PathBuf;

use thiserror::Error;

use crate::ledmap::parser::RecordError;

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("led color table not found (already rewritten?)")]
    MissingColorTable,
    #[error("{block} opened at line {line} is never closed")]
    UnterminatedBlock { block: &'static str, line: usize },
    #[error("malformed color table record at line {line}: {text:?}")]
    MalformedRecord {
        line: usize,
        text: String,
        #[source]
        source: RecordError,
    },
    #[error("expected a blank line after the color table at line {line}, found {found:?}")]
    ExpectedBlankLine { line: usize, found: String },
    #[error("expected `{expected}` at line {line}, found {found:?}")]
    UnexpectedSignature {
        line: usize,
        expected: &'static str,
        found: String,
    },
    #[error("body of `{signature}` starting at line {line} has no closing brace")]
    UnterminatedFunction { signature: &'static str, line: usize },
    #[error(transparent)]
    Capacity(#[from] CapacityError),
}

/// Every index in the compact table is stored in one byte and 255 is the
/// end-of-list sentinel, so all of them must stay below 255.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapacityError {
    #[error("layer id {id} does not fit in a byte index")]
    LayerId { id: usize },
    #[error("{count} layers do not fit in a byte index")]
    LayerCount { count: usize },
    #[error("layer {layer} has led index {index} which does not fit in a byte index")]
    LedIndex { layer: usize, index: usize },
    #[error("{count} distinct colors do not fit in a byte index")]
    DistinctColors { count: usize },
}
