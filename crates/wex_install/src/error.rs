//! Error types that can be emitted from this library
//!

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`wex_chunk::error::Error`]
    #[error(transparent)]
    ChunkError(#[from] wex_chunk::error::Error),

    /// File does not start with the install manifest magic
    #[error("invalid install manifest signature {0:#06x}")]
    InvalidSignature(u16),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
