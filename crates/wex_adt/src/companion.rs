//! Flags read from a tile's map definition file.
//!
//! Texture files cannot be decoded on their own: how uncompressed alpha maps are
//! stored depends on flags kept in the map definition (`MPHD`).

use byteorder::LittleEndian;
use tracing::instrument;
use wex_chunk::{ByteCursor, ChunkWalker, HandlerTable};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::handlers::MPHD;

/// Map definition flags relevant to texture decoding
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompanionFlags(pub u32);

impl CompanionFlags {
    /// Uncompressed alpha maps are stored as 4096 full bytes
    pub const WIDE_ALPHA: u32 = 0x4;
    /// Height based texturing, which implies wide alpha maps
    pub const HEIGHT_TEXTURING: u32 = 0x80;

    pub fn has_wide_alpha(self) -> bool {
        self.0 & (Self::WIDE_ALPHA | Self::HEIGHT_TEXTURING) != 0
    }

    /// Read the flags from a complete map definition buffer
    ///
    /// A buffer without a header chunk yields empty flags.
    #[instrument(skip(data), err)]
    pub fn from_map_buffer(data: &[u8]) -> Result<Self> {
        let mut flags = CompanionFlags::default();
        ChunkWalker::new(&MAP_HANDLERS).walk(&mut ByteCursor::new(data), &mut flags)?;
        Ok(flags)
    }
}

impl From<u32> for CompanionFlags {
    fn from(value: u32) -> Self {
        CompanionFlags(value)
    }
}

static MAP_HANDLERS: HandlerTable<CompanionFlags, Error> =
    HandlerTable::new("map", &[(MPHD, handle_map_header)]);

fn handle_map_header(
    cursor: &mut ByteCursor<'_>,
    _: u32,
    flags: &mut CompanionFlags,
) -> Result<()> {
    *flags = CompanionFlags(cursor.read_u32::<LittleEndian>()?);
    Ok(())
}

#[cfg(test)]
mod test {
    use byteorder::{LittleEndian, WriteBytesExt};
    use pretty_assertions::assert_eq;

    use crate::companion::CompanionFlags;

    fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut buf = tag.iter().rev().copied().collect::<Vec<_>>();
        buf.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
        buf.extend_from_slice(payload);
        buf
    }

    #[test]
    fn wide_alpha() {
        assert!(!CompanionFlags(0).has_wide_alpha());
        assert!(!CompanionFlags(0x1).has_wide_alpha());
        assert!(CompanionFlags(0x4).has_wide_alpha());
        assert!(CompanionFlags(0x80).has_wide_alpha());
        assert!(CompanionFlags(0x84).has_wide_alpha());
    }

    #[test]
    fn read_from_map() {
        let mut data = chunk(b"MVER", &18u32.to_le_bytes());
        data.extend(chunk(b"MPHD", &[0x84, 0, 0, 0, 0, 0, 0, 0]));
        data.extend(chunk(b"MAIN", &[0; 16]));

        let flags = CompanionFlags::from_map_buffer(&data).unwrap();
        assert_eq!(flags, CompanionFlags(0x84));
    }

    #[test]
    fn map_without_header() {
        let data = chunk(b"MVER", &18u32.to_le_bytes());
        let flags = CompanionFlags::from_map_buffer(&data).unwrap();
        assert_eq!(flags, CompanionFlags::default());
    }
}
