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

    /// The version chunk carries a value this library does not understand
    #[error("unsupported version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// An alpha layer's declared offset disagrees with the bytes consumed before it
    #[error("alpha layer {layer} declares offset {declared} but {actual} bytes precede it")]
    OffsetMismatch {
        layer: usize,
        declared: u32,
        actual: u32,
    },

    /// Liquid vertex data whose inferred size matches no known layout
    ///
    /// This is never returned from a parse. The affected instance keeps empty
    /// vertex data and the parse carries on.
    #[error("vertex data at {offset} spans {length} bytes, no known layout for {vertices} vertices")]
    UnrecognizedLayout {
        offset: u32,
        length: u32,
        vertices: u32,
    },

    /// A texture file was parsed without the flags of its companion map definition
    #[error("texture files require companion map flags")]
    MissingCompanion,
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
