//! # Install Manifest Format Documentation
//!
//! This crate reads the **install manifest** of a content-addressed game
//! installation. The manifest lists every file that must be present on disk for
//! an installation along with the tags (platform, architecture, locale, ...)
//! that select it. The buffer must already be fetched and decoded.
//!
//! ## File Structure
//!
//! Unlike the chunked terrain files, multi-byte header fields are big-endian.
//!
//! | Offset (bytes) | Field       | Description                                |
//! |----------------|-------------|--------------------------------------------|
//! | 0x0000         | Magic       | 2 bytes: `IN`                              |
//! | 0x0002         | Version     | 1 byte: stored, not validated              |
//! | 0x0003         | Hash Size   | 1 byte: length of every content hash       |
//! | 0x0004         | Tag Count   | 2 bytes: big-endian                        |
//! | 0x0006         | File Count  | 4 bytes: big-endian                        |
//!
//! ### Tag Table
//!
//! Directly after the header, one entry per tag:
//!
//! | Field | Description                                                    |
//! |-------|----------------------------------------------------------------|
//! | Name  | Null terminated string                                         |
//! | Type  | 2 bytes: big-endian                                            |
//! | Mask  | `ceil(file count / 8)` bytes, bit 7 of byte 0 is file 0        |
//!
//! ### File Table
//!
//! After the tag table, one entry per file:
//!
//! | Field | Description                                                    |
//! |-------|----------------------------------------------------------------|
//! | Name  | Null terminated string                                         |
//! | Hash  | (Hash Size) bytes                                              |
//! | Size  | 4 bytes: big-endian                                            |
//!
//! Every file lists the tags whose mask selects it, in the order the tags are
//! declared. Mask bits past the last file are ignored.
//!

pub mod error;
pub mod read;
pub mod types;

pub use read::InstallManifest;
pub use types::{InstallFile, InstallTag};
