//! Handler tables for each terrain file kind.
//!
//! Tags are declared by their four character code. On disk they are stored
//! reversed (`REVM`), which is exactly what a little-endian read produces.

use byteorder::LittleEndian;
use wex_chunk::{ByteCursor, Tag};

use crate::error::{Error, Result};

pub(crate) mod obj;
pub(crate) mod root;
pub(crate) mod tex;

/// The only version the terrain files have ever declared
pub const ADT_VERSION: u32 = 18;

pub const MVER: Tag = Tag::from_fourcc(b"MVER");
pub const MHDR: Tag = Tag::from_fourcc(b"MHDR");
pub const MCNK: Tag = Tag::from_fourcc(b"MCNK");
pub const MH2O: Tag = Tag::from_fourcc(b"MH2O");

pub const MCVT: Tag = Tag::from_fourcc(b"MCVT");
pub const MCCV: Tag = Tag::from_fourcc(b"MCCV");
pub const MCNR: Tag = Tag::from_fourcc(b"MCNR");
pub const MCBB: Tag = Tag::from_fourcc(b"MCBB");

pub const MMDX: Tag = Tag::from_fourcc(b"MMDX");
pub const MMID: Tag = Tag::from_fourcc(b"MMID");
pub const MWMO: Tag = Tag::from_fourcc(b"MWMO");
pub const MWID: Tag = Tag::from_fourcc(b"MWID");
pub const MDDF: Tag = Tag::from_fourcc(b"MDDF");
pub const MODF: Tag = Tag::from_fourcc(b"MODF");
pub const MWDS: Tag = Tag::from_fourcc(b"MWDS");

pub const MTEX: Tag = Tag::from_fourcc(b"MTEX");
pub const MTXP: Tag = Tag::from_fourcc(b"MTXP");
pub const MHID: Tag = Tag::from_fourcc(b"MHID");
pub const MDID: Tag = Tag::from_fourcc(b"MDID");
pub const MCLY: Tag = Tag::from_fourcc(b"MCLY");
pub const MCAL: Tag = Tag::from_fourcc(b"MCAL");

pub const MPHD: Tag = Tag::from_fourcc(b"MPHD");

/// Outputs that record the version chunk
pub(crate) trait Versioned {
    fn set_version(&mut self, version: u32);
}

/// `MVER`, shared by every file kind
pub(crate) fn handle_version<C: Versioned>(
    cursor: &mut ByteCursor<'_>,
    _: u32,
    context: &mut C,
) -> Result<()> {
    let version = cursor.read_u32::<LittleEndian>()?;
    if version != ADT_VERSION {
        return Err(Error::UnsupportedVersion {
            found: version,
            expected: ADT_VERSION,
        });
    }
    context.set_version(version);
    Ok(())
}
