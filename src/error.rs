use thiserror::Error;

/// Reasons a map could not be loaded. The engine state is untouched when any
/// of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("invalid map symbol {symbol:?} at line {line}, column {column}")]
    InvalidSymbol {
        symbol: char,
        line: usize,
        column: usize,
    },

    #[error("map has no head marker 'E'")]
    MissingHead,

    #[error("map has no tail marker (one of H, J, K, L)")]
    MissingTail,
}
