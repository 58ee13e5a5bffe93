//! Records produced by parsing terrain files.
//!
//! Fixed layout records are decoded with [`binrw`], all of them little-endian.

use binrw::BinRead;
use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Number of terrain cells in a tile (16×16)
pub const CELL_COUNT: usize = 16 * 16;

/// Number of height/normal/shading samples per terrain cell (9×9 outer + 8×8 inner)
pub const CELL_VERTEX_COUNT: usize = 145;

/// Tile header (`MHDR`)
///
/// Offsets are relative to the start of the header payload and are kept for
/// reference only, chunks are located by walking.
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[br(little)]
pub struct AdtHeader {
    pub flags: u32,
    pub ofs_mcin: u32,
    pub ofs_mtex: u32,
    pub ofs_mmdx: u32,
    pub ofs_mmid: u32,
    pub ofs_mwmo: u32,
    pub ofs_mwid: u32,
    pub ofs_mddf: u32,
    pub ofs_modf: u32,
    pub ofs_mfbo: u32,
    pub ofs_mh2o: u32,
    pub ofs_mtxf: u32,
    pub unknown: [u32; 4],
}

/// Fixed 128 byte header at the start of every root terrain cell (`MCNK`)
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[br(little)]
pub struct CellHeader {
    pub flags: u32,
    pub index_x: u32,
    pub index_y: u32,
    pub layer_count: u32,
    pub doodad_refs: u32,
    pub holes_high_res: [u8; 8],
    pub ofs_mcly: u32,
    pub ofs_mcrf: u32,
    pub ofs_mcal: u32,
    pub size_alpha: u32,
    pub ofs_mcsh: u32,
    pub size_shadows: u32,
    pub area_id: u32,
    pub map_obj_refs: u32,
    pub holes_low_res: u16,
    pub unknown1: u16,
    pub low_quality_texture_map: [i16; 8],
    pub no_effect_doodad: i64,
    pub ofs_mcse: u32,
    pub sound_emitters: u32,
    pub ofs_mclq: u32,
    pub size_mclq: u32,
    pub position: [f32; 3],
    pub ofs_mccv: u32,
    pub ofs_mclw: u32,
    pub unknown2: u32,
}

/// Per-vertex colour (`MCCV`)
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Blend mesh batch (`MCBB`)
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[br(little)]
pub struct BlendBatch {
    pub mbmh_index: u32,
    pub index_count: u32,
    pub index_first: u32,
    pub vertex_count: u32,
    pub vertex_first: u32,
}

/// A root terrain cell
///
/// Optional fields are only present when the matching sub-chunk was found.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TerrainCell {
    pub header: CellHeader,
    pub vertices: Option<Vec<f32>>,
    pub vertex_shading: Option<Vec<Rgba>>,
    /// Normals as `[x, y, z]`, the file stores them as `x, z, y`
    pub normals: Option<Vec<[i8; 3]>>,
    pub blend_batches: Option<Vec<BlendBatch>>,
}

impl TerrainCell {
    pub fn new(header: CellHeader) -> Self {
        TerrainCell {
            header,
            ..Default::default()
        }
    }
}

/// Fishable and deep masks of a liquid chunk, one bit per 8×8 sub-square
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[br(little)]
pub struct LiquidAttributes {
    pub fishable: u64,
    pub deep: u64,
}

/// Texture coordinate of a liquid vertex
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[br(little)]
pub struct UvCoord {
    pub x: u16,
    pub y: u16,
}

/// Which fields a liquid vertex payload carries
///
/// The discriminant is the number of bytes each vertex occupies, which is the
/// only way to tell the layouts apart.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum VertexLayout {
    DepthOnly = 1,
    HeightDepth = 5,
    HeightUv = 8,
    HeightUvDepth = 9,
}

impl VertexLayout {
    /// Map a bytes-per-vertex code onto a layout
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(VertexLayout::DepthOnly),
            5 => Some(VertexLayout::HeightDepth),
            8 => Some(VertexLayout::HeightUv),
            9 => Some(VertexLayout::HeightUvDepth),
            _ => None,
        }
    }

    /// Infer the layout of a region of `length` bytes holding `vertices` entries
    ///
    /// Regions that do not divide evenly have no layout.
    pub fn infer(length: u32, vertices: u32) -> Option<Self> {
        if vertices == 0 || length % vertices != 0 {
            return None;
        }
        Self::from_code(length / vertices)
    }

    pub fn bytes_per_vertex(self) -> u32 {
        self as u32
    }

    pub fn has_height(self) -> bool {
        matches!(
            self,
            VertexLayout::HeightDepth | VertexLayout::HeightUv | VertexLayout::HeightUvDepth
        )
    }

    pub fn has_uv(self) -> bool {
        matches!(self, VertexLayout::HeightUv | VertexLayout::HeightUvDepth)
    }

    pub fn has_depth(self) -> bool {
        matches!(
            self,
            VertexLayout::DepthOnly | VertexLayout::HeightDepth | VertexLayout::HeightUvDepth
        )
    }
}

/// Reconstructed liquid vertex payload, each field indexed by vertex
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct VertexData {
    pub height: Vec<f32>,
    pub uv: Vec<UvCoord>,
    pub depth: Vec<u8>,
}

impl VertexData {
    pub fn is_empty(&self) -> bool {
        self.height.is_empty() && self.uv.is_empty() && self.depth.is_empty()
    }
}

/// A single liquid layer within a liquid chunk
///
/// The first 24 bytes are stored as-is, the existence bitmap and vertex payload
/// are resolved afterwards from the offsets they carry.
#[derive(BinRead, Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[br(little)]
pub struct LiquidInstance {
    pub liquid_type: u16,
    pub liquid_object: u16,
    pub min_height_level: f32,
    pub max_height_level: f32,
    pub x_offset: u8,
    pub y_offset: u8,
    pub width: u8,
    pub height: u8,
    pub offset_exists_bitmap: u32,
    pub offset_vertex_data: u32,

    /// One bit per covered square, empty when every square exists
    #[br(ignore)]
    pub bitmap: Vec<u8>,

    #[br(ignore)]
    pub layout: Option<VertexLayout>,

    #[br(ignore)]
    pub vertex_data: VertexData,
}

impl LiquidInstance {
    /// Number of vertices covering this instance, `(width + 1) * (height + 1)`
    pub fn vertex_count(&self) -> u32 {
        (self.width as u32 + 1) * (self.height as u32 + 1)
    }
}

/// All liquid layers covering one terrain cell
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LiquidChunk {
    pub attributes: LiquidAttributes,
    pub instances: Vec<LiquidInstance>,
}

/// A parsed root (geometry) file
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RootAdt {
    pub version: Option<u32>,
    pub header: Option<AdtHeader>,
    /// Cells in the order they were encountered
    pub cells: Vec<TerrainCell>,
    pub liquids: Option<Vec<LiquidChunk>>,
}

/// Doodad placement (`MDDF`)
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[br(little)]
pub struct ModelPlacement {
    pub mmid_entry: u32,
    pub unique_id: u32,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: u16,
    pub flags: u16,
}

/// World model placement (`MODF`)
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[br(little)]
pub struct WorldModelPlacement {
    pub mwid_entry: u32,
    pub unique_id: u32,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub lower_bounds: [f32; 3],
    pub upper_bounds: [f32; 3],
    pub flags: u16,
    pub doodad_set: u16,
    pub name_set: u16,
    pub scale: u16,
}

/// A parsed object (reference) file
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ObjAdt {
    pub version: Option<u32>,
    /// Doodad file names keyed by their offset in the name block
    pub m2_names: IndexMap<u32, String>,
    pub m2_offsets: Vec<u32>,
    /// World model file names keyed by their offset in the name block
    pub wmo_names: IndexMap<u32, String>,
    pub wmo_offsets: Vec<u32>,
    pub models: Vec<ModelPlacement>,
    pub world_models: Vec<WorldModelPlacement>,
    pub doodad_sets: Vec<u16>,
}

impl ObjAdt {
    /// Resolve the file name of a doodad placement through the offset table
    pub fn model_name(&self, placement: &ModelPlacement) -> Option<&str> {
        let offset = self.m2_offsets.get(placement.mmid_entry as usize)?;
        self.m2_names.get(offset).map(String::as_str)
    }

    /// Resolve the file name of a world model placement through the offset table
    pub fn world_model_name(&self, placement: &WorldModelPlacement) -> Option<&str> {
        let offset = self.wmo_offsets.get(placement.mwid_entry as usize)?;
        self.wmo_names.get(offset).map(String::as_str)
    }
}

/// Texture parameters (`MTXP`)
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[br(little)]
pub struct TextureParams {
    pub flags: u32,
    pub height: f32,
    pub offset: f32,
    pub unknown: u32,
}

/// Texture layer definition (`MCLY`)
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[br(little)]
pub struct TextureLayer {
    pub texture_id: u32,
    pub flags: u32,
    /// Offset of this layer's alpha map from the start of the alpha chunk
    pub offset_mcal: u32,
    pub effect_id: i32,
}

impl TextureLayer {
    /// Alpha map of this layer is run-length compressed
    pub const ALPHA_COMPRESSED: u32 = 0x200;

    pub fn is_alpha_compressed(&self) -> bool {
        self.flags & Self::ALPHA_COMPRESSED != 0
    }
}

/// Texture layers and decoded alpha maps of one terrain cell
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TextureCell {
    pub layers: Vec<TextureLayer>,
    /// One 64×64 map per layer, layer 0 is always fully opaque
    pub alpha_layers: Vec<Vec<u8>>,
}

/// A parsed texture file
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TexAdt {
    pub version: Option<u32>,
    /// Texture file names keyed by their offset in the name block
    pub textures: IndexMap<u32, String>,
    pub params: Vec<TextureParams>,
    pub height_texture_ids: Vec<u32>,
    pub diffuse_texture_ids: Vec<u32>,
    /// Cells in the order they were encountered
    pub cells: Vec<TextureCell>,
}

#[cfg(test)]
mod test {
    use crate::types::VertexLayout;

    #[test]
    fn layout_inference() {
        assert_eq!(VertexLayout::infer(100, 20), Some(VertexLayout::HeightDepth));
        assert_eq!(VertexLayout::infer(160, 20), Some(VertexLayout::HeightUv));
        assert_eq!(VertexLayout::infer(20, 20), Some(VertexLayout::DepthOnly));
        assert_eq!(VertexLayout::infer(180, 20), Some(VertexLayout::HeightUvDepth));

        assert_eq!(VertexLayout::infer(80, 20), None);
        assert_eq!(VertexLayout::infer(90, 20), None);
        assert_eq!(VertexLayout::infer(0, 20), None);
    }

    #[test]
    fn layout_fields() {
        let layout = VertexLayout::HeightUvDepth;
        assert!(layout.has_height() && layout.has_uv() && layout.has_depth());
        assert_eq!(layout.bytes_per_vertex(), 9);

        let layout = VertexLayout::DepthOnly;
        assert!(!layout.has_height() && !layout.has_uv() && layout.has_depth());
    }
}
