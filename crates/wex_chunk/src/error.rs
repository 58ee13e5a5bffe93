//! Error types that can be emitted from this library
//!

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// A read would run past the end of the buffer
    #[error("read past end of buffer at offset {offset} ({remaining} bytes remaining)")]
    TruncatedBuffer { offset: usize, remaining: usize },

    /// A seek target lies outside of the buffer
    #[error("offset {offset} is outside of the buffer (length {length})")]
    InvalidOffset { offset: usize, length: usize },

    /// A run-length alpha stream ended before the map was filled
    #[error("alpha stream exhausted after {produced} of 4096 entries")]
    RleUnderrun { produced: usize },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
