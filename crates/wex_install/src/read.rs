//! Types for reading install manifests
//!

use byteorder::{BigEndian, LittleEndian};
use tracing::{debug, instrument, trace};
use wex_chunk::bitstream::{mask_indices, mask_len};
use wex_chunk::ByteCursor;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{InstallFile, InstallTag};

/// `IN` read as a little-endian u16
pub const INSTALL_MAGIC: u16 = 0x4E49;

/// Parsed install manifest
///
/// ```
/// use wex_install::InstallManifest;
///
/// let data = [
///     b'I', b'N', 1, 1, 0, 1, 0, 0, 0, 1,
///     b'e', b'n', b'U', b'S', 0, 0, 3, 0x80,
///     b'a', 0, 0xAB, 0, 0, 0, 4,
/// ];
///
/// let manifest = InstallManifest::parse(&data)?;
/// let file = manifest.file_by_name("a").unwrap();
///
/// assert_eq!(file.hash, "ab");
/// assert_eq!(file.tags, vec!["enUS"]);
/// # Ok::<(), wex_install::error::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InstallManifest {
    /// Stored as found, never validated
    pub version: u8,
    /// Length of every content hash in bytes
    pub hash_size: u8,
    pub tags: Vec<InstallTag>,
    pub files: Vec<InstallFile>,
}

impl InstallManifest {
    /// Parse a complete, already decoded install manifest
    #[instrument(skip(data), fields(len = data.len()), err)]
    pub fn parse(data: &[u8]) -> Result<InstallManifest> {
        let mut cursor = ByteCursor::new(data);

        let magic = cursor.read_u16::<LittleEndian>()?;
        if magic != INSTALL_MAGIC {
            return Err(Error::InvalidSignature(magic));
        }

        let version = cursor.read_u8()?;
        let hash_size = cursor.read_u8()?;
        let tag_count = cursor.read_u16::<BigEndian>()? as usize;
        let file_count = cursor.read_u32::<BigEndian>()? as usize;
        let mask_size = mask_len(file_count);
        debug!(version, hash_size, tag_count, file_count, "read install header");

        let mut tags = Vec::with_capacity(tag_count);
        for _ in 0..tag_count {
            let name = cursor.read_cstring()?;
            let tag_type = cursor.read_u16::<BigEndian>()?;
            let mask = cursor.read_bytes(mask_size)?.to_vec();
            trace!(%name, tag_type, "read install tag");

            tags.push(InstallTag {
                name,
                tag_type,
                mask,
            });
        }

        // every entry holds at least a terminator, the hash and the size
        let min_table = file_count.checked_mul(hash_size as usize + 5);
        if min_table.map_or(true, |len| len > cursor.remaining_bytes()) {
            return Err(wex_chunk::error::Error::TruncatedBuffer {
                offset: cursor.offset(),
                remaining: cursor.remaining_bytes(),
            }
            .into());
        }

        let mut files = Vec::with_capacity(file_count);
        for _ in 0..file_count {
            files.push(InstallFile {
                name: cursor.read_cstring()?,
                hash: cursor.read_hex(hash_size as usize)?,
                size: cursor.read_u32::<BigEndian>()?,
                tags: Vec::new(),
            });
        }

        for tag in &tags {
            for index in mask_indices(&tag.mask, file_count) {
                files[index].tags.push(tag.name.clone());
            }
        }

        Ok(InstallManifest {
            version,
            hash_size,
            tags,
            files,
        })
    }

    /// Number of files in this manifest
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether this manifest lists no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Find a file by its exact name
    pub fn file_by_name(&self, name: impl AsRef<str>) -> Option<&InstallFile> {
        let name = name.as_ref();
        self.files.iter().find(|file| file.name == name)
    }

    /// Find a tag by its exact name
    pub fn tag_by_name(&self, name: impl AsRef<str>) -> Option<&InstallTag> {
        let name = name.as_ref();
        self.tags.iter().find(|tag| tag.name == name)
    }

    /// Iterate the files selected by a tag, empty if the tag does not exist
    pub fn files_with_tag<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a InstallFile> {
        self.files.iter().filter(move |file| file.has_tag(name))
    }
}
