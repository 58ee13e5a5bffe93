//! This library reads the chunked terrain files that make up a single map tile.
//!
//! # ADT Format Documentation
//!
//! A map is split into a grid of tiles and every tile is stored in several
//! files sharing one chunk framing (see [`wex_chunk`]):
//!
//! | File                  | Kind                | Contents                                    |
//! |-----------------------|---------------------|---------------------------------------------|
//! | `<map>_<x>_<y>.adt`   | [`AdtKind::Root`]   | Header, terrain cells, liquids              |
//! | `<map>_<x>_<y>_obj0`  | [`AdtKind::Object`] | Model names and placements                  |
//! | `<map>_<x>_<y>_tex0`  | [`AdtKind::Texture`]| Texture names, layers and alpha maps        |
//!
//! Every file starts with a version chunk (`MVER`) holding `18`. Any other value
//! stops the parse before a further chunk is read.
//!
//! ### Terrain Cells
//!
//! A tile holds 16×16 cells (`MCNK`). In root files each cell starts with a 128
//! byte header followed by nested chunks:
//!
//! - **MCVT**: 145 little-endian `f32` heights.
//! - **MCCV**: 145 RGBA vertex colours.
//! - **MCNR**: 145 normals stored as signed `x, z, y` bytes.
//! - **MCBB**: blend batches, 20 bytes each.
//!
//! In texture files the cell has no header and holds the texture layers
//! (`MCLY`, 16 bytes each) and their alpha maps (`MCAL`).
//!
//! ### Alpha Maps
//!
//! Every layer after the first has a 64×64 alpha map. The first layer is fully
//! opaque. Maps are stored back to back and each layer declares where its map
//! starts, which must match where the previous one ended.
//!
//! | Condition                                   | Encoding                       |
//! |---------------------------------------------|--------------------------------|
//! | Layer flag `0x200`                          | Run-length, see [`wex_chunk::bitstream`] |
//! | Map flags `0x4` or `0x80` ([`CompanionFlags`]) | 4096 literal bytes          |
//! | Otherwise                                   | 2048 bytes, two 4 bit values each |
//!
//! ### Liquids
//!
//! The liquid chunk (`MH2O`) addresses its data by offsets and leaves the size
//! of vertex payloads implicit, see [`liquid`].
//!
//! ## Additional Information
//!
//! - **Endianness**: Little-endian for all multi-byte values
//! - **Unknown chunks**: skipped
//!

pub mod companion;
pub mod error;
pub mod handlers;
pub mod liquid;
pub mod read;
pub mod types;

pub use companion::CompanionFlags;
pub use read::{Adt, AdtKind, OffsetMismatchPolicy, ParseOptions};
pub use types::{ObjAdt, RootAdt, TexAdt};
