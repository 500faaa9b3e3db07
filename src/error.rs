use thiserror::Error;

use crate::VertexId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeapError {
    #[error("popped an empty heap")]
    EmptyContainer,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("source vertex {0} is not in the graph")]
    InvalidVertex(VertexId),
}

/// Failures while reading an edge list.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("line {line}: missing column `{column}`")]
    MissingField { line: u64, column: &'static str },

    #[error("line {line}: column `{column}` has invalid value {value:?}")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}
