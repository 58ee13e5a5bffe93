use byteorder::LittleEndian;
use wex_chunk::{ByteCursor, HandlerTable};

use super::{handle_version, Versioned, MDDF, MMDX, MMID, MODF, MVER, MWDS, MWID, MWMO};
use crate::error::{Error, Result};
use crate::types::{ModelPlacement, ObjAdt, WorldModelPlacement};

pub(crate) static OBJ_HANDLERS: HandlerTable<ObjAdt, Error> = HandlerTable::new(
    "object",
    &[
        (MVER, handle_version::<ObjAdt>),
        (MMDX, handle_model_names),
        (MMID, handle_model_offsets),
        (MWMO, handle_world_model_names),
        (MWID, handle_world_model_offsets),
        (MDDF, handle_models),
        (MODF, handle_world_models),
        (MWDS, handle_doodad_sets),
    ],
);

impl Versioned for ObjAdt {
    fn set_version(&mut self, version: u32) {
        self.version = Some(version);
    }
}

fn handle_model_names(cursor: &mut ByteCursor<'_>, size: u32, adt: &mut ObjAdt) -> Result<()> {
    adt.m2_names = cursor.read_string_block(size as usize)?;
    Ok(())
}

fn handle_model_offsets(cursor: &mut ByteCursor<'_>, size: u32, adt: &mut ObjAdt) -> Result<()> {
    adt.m2_offsets = cursor.read_u32_vec::<LittleEndian>(size as usize / 4)?;
    Ok(())
}

fn handle_world_model_names(
    cursor: &mut ByteCursor<'_>,
    size: u32,
    adt: &mut ObjAdt,
) -> Result<()> {
    adt.wmo_names = cursor.read_string_block(size as usize)?;
    Ok(())
}

fn handle_world_model_offsets(
    cursor: &mut ByteCursor<'_>,
    size: u32,
    adt: &mut ObjAdt,
) -> Result<()> {
    adt.wmo_offsets = cursor.read_u32_vec::<LittleEndian>(size as usize / 4)?;
    Ok(())
}

fn handle_models(cursor: &mut ByteCursor<'_>, size: u32, adt: &mut ObjAdt) -> Result<()> {
    adt.models = cursor.read_records::<ModelPlacement>(size as usize / 36)?;
    Ok(())
}

fn handle_world_models(cursor: &mut ByteCursor<'_>, size: u32, adt: &mut ObjAdt) -> Result<()> {
    adt.world_models = cursor.read_records::<WorldModelPlacement>(size as usize / 64)?;
    Ok(())
}

fn handle_doodad_sets(cursor: &mut ByteCursor<'_>, size: u32, adt: &mut ObjAdt) -> Result<()> {
    adt.doodad_sets = cursor.read_u16_vec::<LittleEndian>(size as usize / 2)?;
    Ok(())
}
