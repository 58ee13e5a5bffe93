use byteorder::LittleEndian;
use wex_chunk::{ByteCursor, ChunkWalker, HandlerTable};

use super::{handle_version, Versioned, MCBB, MCCV, MCNK, MCNR, MCVT, MH2O, MHDR, MVER};
use crate::error::{Error, Result};
use crate::liquid::read_liquids;
use crate::types::{BlendBatch, CellHeader, Rgba, RootAdt, TerrainCell, CELL_VERTEX_COUNT};

pub(crate) static ROOT_HANDLERS: HandlerTable<RootAdt, Error> = HandlerTable::new(
    "root",
    &[
        (MVER, handle_version::<RootAdt>),
        (MHDR, handle_header),
        (MCNK, handle_cell),
        (MH2O, handle_liquids),
    ],
);

static CELL_HANDLERS: HandlerTable<TerrainCell, Error> = HandlerTable::new(
    "root cell",
    &[
        (MCVT, handle_heights),
        (MCCV, handle_shading),
        (MCNR, handle_normals),
        (MCBB, handle_blend_batches),
    ],
);

impl Versioned for RootAdt {
    fn set_version(&mut self, version: u32) {
        self.version = Some(version);
    }
}

fn handle_header(cursor: &mut ByteCursor<'_>, _: u32, adt: &mut RootAdt) -> Result<()> {
    adt.header = Some(cursor.read_record()?);
    Ok(())
}

fn handle_cell(cursor: &mut ByteCursor<'_>, size: u32, adt: &mut RootAdt) -> Result<()> {
    let mut payload = ByteCursor::new(cursor.read_bytes(size as usize)?);
    let mut cell = TerrainCell::new(payload.read_record::<CellHeader>()?);

    ChunkWalker::new(&CELL_HANDLERS).walk(&mut payload, &mut cell)?;

    adt.cells.push(cell);
    Ok(())
}

fn handle_liquids(cursor: &mut ByteCursor<'_>, size: u32, adt: &mut RootAdt) -> Result<()> {
    adt.liquids = Some(read_liquids(cursor.read_bytes(size as usize)?)?);
    Ok(())
}

fn handle_heights(cursor: &mut ByteCursor<'_>, _: u32, cell: &mut TerrainCell) -> Result<()> {
    cell.vertices = Some(cursor.read_f32_vec::<LittleEndian>(CELL_VERTEX_COUNT)?);
    Ok(())
}

fn handle_shading(cursor: &mut ByteCursor<'_>, _: u32, cell: &mut TerrainCell) -> Result<()> {
    cell.vertex_shading = Some(cursor.read_records::<Rgba>(CELL_VERTEX_COUNT)?);
    Ok(())
}

fn handle_normals(cursor: &mut ByteCursor<'_>, _: u32, cell: &mut TerrainCell) -> Result<()> {
    let normals = cursor
        .read_bytes(CELL_VERTEX_COUNT * 3)?
        .chunks_exact(3)
        .map(|n| [n[0] as i8, n[2] as i8, n[1] as i8])
        .collect();
    cell.normals = Some(normals);
    Ok(())
}

fn handle_blend_batches(
    cursor: &mut ByteCursor<'_>,
    size: u32,
    cell: &mut TerrainCell,
) -> Result<()> {
    cell.blend_batches = Some(cursor.read_records::<BlendBatch>(size as usize / 20)?);
    Ok(())
}
