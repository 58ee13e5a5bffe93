//! Building blocks for decoding chunked game asset containers.
//!
//! Nothing in this crate performs I/O. Every reader works over a buffer that
//! has already been fetched and decompressed by the caller.
//!
//! ## Chunk Framing
//!
//! A chunked container is a flat run of chunks until the buffer is exhausted.
//! Chunks may nest, in which case the children use the same framing and are
//! limited to the parent's declared size.
//!
//! | Offset (bytes) | Field   | Description                                         |
//! |----------------|---------|-----------------------------------------------------|
//! | 0x0000         | Tag     | 4 bytes: identifier, compared exactly as read (LE)  |
//! | 0x0004         | Size    | 4 bytes: little-endian payload length               |
//! | 0x0008         | Payload | (Size) bytes                                        |
//!
//! ## Components
//!
//! - [`ByteCursor`]: bounds-checked reader with explicit byte order and seeking.
//! - [`HandlerTable`] / [`ChunkWalker`]: dispatch of chunk payloads to handlers by
//!   tag, with the cursor realigned to the chunk boundary after every handler.
//! - [`bitstream`]: alpha map codecs and membership bitmasks.
//!

pub mod bitstream;
pub mod cursor;
pub mod error;
pub mod types;
pub mod walker;

pub use cursor::ByteCursor;
pub use types::{ChunkRecord, Tag};
pub use walker::{ChunkWalker, Handler, HandlerTable};
