//! Error types for field generation.
//!
//! Both palette errors are fatal: a caller that hits one has a misconfigured
//! generator, and retrying the same draw cannot succeed.

use thiserror::Error;

use crate::types::{Position, TileColor};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("generator palette is empty")]
    EmptyPalette,

    #[error("no color left to draw at {position}: restricted {restricted:?}")]
    PaletteExhausted {
        position: Position,
        restricted: Vec<TileColor>,
    },

    #[error("generator produced {actual} tokens for a field of {expected} cells")]
    SizeMismatch { expected: usize, actual: usize },
}
