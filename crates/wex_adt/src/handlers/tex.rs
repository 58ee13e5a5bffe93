use byteorder::LittleEndian;
use tracing::warn;
use wex_chunk::bitstream::{
    decode_alpha_rle, read_alpha_literal, read_alpha_packed, ALPHA_MAP_LEN,
};
use wex_chunk::{ByteCursor, ChunkWalker, HandlerTable};

use super::{handle_version, Versioned, MCAL, MCLY, MCNK, MDID, MHID, MTEX, MTXP, MVER};
use crate::error::{Error, Result};
use crate::read::OffsetMismatchPolicy;
use crate::types::{TexAdt, TextureCell, TextureLayer, TextureParams};

/// Output of a texture walk plus the settings its handlers need
pub(crate) struct TexContext {
    pub adt: TexAdt,
    pub wide_alpha: bool,
    pub policy: OffsetMismatchPolicy,
}

struct TexCellContext {
    cell: TextureCell,
    wide_alpha: bool,
    policy: OffsetMismatchPolicy,
}

pub(crate) static TEX_HANDLERS: HandlerTable<TexContext, Error> = HandlerTable::new(
    "texture",
    &[
        (MVER, handle_version::<TexContext>),
        (MTEX, handle_textures),
        (MCNK, handle_cell),
        (MTXP, handle_params),
        (MHID, handle_height_ids),
        (MDID, handle_diffuse_ids),
    ],
);

static CELL_HANDLERS: HandlerTable<TexCellContext, Error> = HandlerTable::new(
    "texture cell",
    &[(MCLY, handle_layers), (MCAL, handle_alpha)],
);

impl Versioned for TexContext {
    fn set_version(&mut self, version: u32) {
        self.adt.version = Some(version);
    }
}

fn handle_textures(cursor: &mut ByteCursor<'_>, size: u32, context: &mut TexContext) -> Result<()> {
    context.adt.textures = cursor.read_string_block(size as usize)?;
    Ok(())
}

fn handle_cell(cursor: &mut ByteCursor<'_>, size: u32, context: &mut TexContext) -> Result<()> {
    let mut payload = ByteCursor::new(cursor.read_bytes(size as usize)?);
    let mut cell = TexCellContext {
        cell: TextureCell::default(),
        wide_alpha: context.wide_alpha,
        policy: context.policy,
    };

    ChunkWalker::new(&CELL_HANDLERS).walk(&mut payload, &mut cell)?;

    context.adt.cells.push(cell.cell);
    Ok(())
}

fn handle_params(cursor: &mut ByteCursor<'_>, size: u32, context: &mut TexContext) -> Result<()> {
    context.adt.params = cursor.read_records::<TextureParams>(size as usize / 16)?;
    Ok(())
}

fn handle_height_ids(
    cursor: &mut ByteCursor<'_>,
    size: u32,
    context: &mut TexContext,
) -> Result<()> {
    context.adt.height_texture_ids = cursor.read_u32_vec::<LittleEndian>(size as usize / 4)?;
    Ok(())
}

fn handle_diffuse_ids(
    cursor: &mut ByteCursor<'_>,
    size: u32,
    context: &mut TexContext,
) -> Result<()> {
    context.adt.diffuse_texture_ids = cursor.read_u32_vec::<LittleEndian>(size as usize / 4)?;
    Ok(())
}

fn handle_layers(
    cursor: &mut ByteCursor<'_>,
    size: u32,
    context: &mut TexCellContext,
) -> Result<()> {
    context.cell.layers = cursor.read_records::<TextureLayer>(size as usize / 16)?;
    Ok(())
}

/// `MCAL`, decoded against the layers read from the preceding `MCLY`
///
/// Layer 0 has no stored map and is fully opaque. Every further layer must start
/// exactly where the previous one ended.
fn handle_alpha(
    cursor: &mut ByteCursor<'_>,
    size: u32,
    context: &mut TexCellContext,
) -> Result<()> {
    let layers = &context.cell.layers;
    if layers.is_empty() {
        return Ok(());
    }

    let mut alpha = ByteCursor::new(cursor.read_bytes(size as usize)?);
    let mut alpha_layers = Vec::with_capacity(layers.len());
    alpha_layers.push(vec![u8::MAX; ALPHA_MAP_LEN]);

    for (index, layer) in layers.iter().enumerate().skip(1) {
        let consumed = alpha.offset() as u32;
        if layer.offset_mcal != consumed {
            let err = Error::OffsetMismatch {
                layer: index,
                declared: layer.offset_mcal,
                actual: consumed,
            };
            match context.policy {
                OffsetMismatchPolicy::Abort => return Err(err),
                OffsetMismatchPolicy::SkipChunk => {
                    warn!(%err, "dropping remaining alpha layers of cell");
                    break;
                }
            }
        }

        let map = if layer.is_alpha_compressed() {
            decode_alpha_rle(&mut alpha)?
        } else if context.wide_alpha {
            read_alpha_literal(&mut alpha)?
        } else {
            read_alpha_packed(&mut alpha)?
        };
        alpha_layers.push(map);
    }

    context.cell.alpha_layers = alpha_layers;
    Ok(())
}
