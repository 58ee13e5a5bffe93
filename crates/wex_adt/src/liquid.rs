//! Liquid chunk (`MH2O`) decoding and offset-based payload reconstruction.
//!
//! The liquid chunk starts with one 12 byte header per terrain cell, followed by
//! a pool of instance arrays, attribute masks, existence bitmaps and vertex
//! payloads. Everything in the pool is addressed by an offset from the start of
//! the chunk payload and only the vertex payloads carry no length at all.
//!
//! Their size is recovered in two passes. The first pass reads every header and
//! instance and records each non-zero pool offset in an [`OffsetLedger`]. The
//! second pass takes the distance from a payload's offset to the next recorded
//! offset (or to the end of the chunk for the last one) and divides it by the
//! instance's vertex count, which yields the [`VertexLayout`].
//!
//! | Bytes per vertex | Fields                 |
//! |------------------|------------------------|
//! | 1                | depth                  |
//! | 5                | height, depth          |
//! | 8                | height, uv             |
//! | 9                | height, uv, depth      |

use binrw::BinRead;
use byteorder::LittleEndian;
use tracing::{debug, instrument, warn};
use wex_chunk::bitstream::mask_len;
use wex_chunk::ByteCursor;

use crate::error::{Error, Result};
use crate::types::{LiquidChunk, LiquidInstance, VertexData, VertexLayout, CELL_COUNT};

#[derive(BinRead, Debug, Copy, Clone)]
#[br(little)]
struct LiquidChunkHeader {
    offset_instances: u32,
    layer_count: u32,
    offset_attributes: u32,
}

/// Sorted, de-duplicated list of region start offsets within a data pool
///
/// Regions in the pool are assumed to be contiguous, so a region ends where the
/// next recorded one begins.
///
/// ```
/// use wex_adt::liquid::OffsetLedger;
///
/// let ledger: OffsetLedger = [260, 100, 180, 180, 0].into_iter().collect();
/// assert_eq!(ledger.offsets(), &[100, 180, 260]);
/// assert_eq!(ledger.region_len(180, 300), Some(80));
/// assert_eq!(ledger.region_len(260, 300), Some(40));
/// assert_eq!(ledger.region_len(120, 300), None);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OffsetLedger {
    offsets: Vec<u32>,
}

impl OffsetLedger {
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Length of the region starting at `offset`
    ///
    /// The last region extends to `container_len`. Returns `None` if `offset` was
    /// never recorded or lies beyond the container.
    pub fn region_len(&self, offset: u32, container_len: u32) -> Option<u32> {
        let index = self.offsets.binary_search(&offset).ok()?;
        let end = self
            .offsets
            .get(index + 1)
            .copied()
            .unwrap_or(container_len);
        end.checked_sub(offset)
    }
}

/// Zero offsets mean "absent" and are never recorded
impl FromIterator<u32> for OffsetLedger {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        let mut offsets = iter
            .into_iter()
            .filter(|offset| *offset > 0)
            .collect::<Vec<_>>();
        offsets.sort_unstable();
        offsets.dedup();
        OffsetLedger { offsets }
    }
}

/// Decode a complete liquid chunk payload
#[instrument(skip(data), fields(len = data.len()))]
pub fn read_liquids(data: &[u8]) -> Result<Vec<LiquidChunk>> {
    let mut cursor = ByteCursor::new(data);
    let mut pool = Vec::new();
    let mut chunks = Vec::with_capacity(CELL_COUNT);

    for _ in 0..CELL_COUNT {
        let header = cursor.read_record::<LiquidChunkHeader>()?;
        let next = cursor.offset();
        pool.push(header.offset_attributes);

        let mut chunk = LiquidChunk::default();
        if header.layer_count > 0 {
            if header.offset_attributes > 0 {
                cursor.seek(header.offset_attributes as usize)?;
                chunk.attributes = cursor.read_record()?;
            }

            cursor.seek(header.offset_instances as usize)?;
            chunk.instances = cursor.read_records(header.layer_count as usize)?;

            for instance in &mut chunk.instances {
                pool.push(instance.offset_exists_bitmap);
                pool.push(instance.offset_vertex_data);
                read_exists_bitmap(&mut cursor, instance)?;
            }
        }

        cursor.seek(next)?;
        chunks.push(chunk);
    }

    let ledger = pool.into_iter().collect::<OffsetLedger>();
    debug!(regions = ledger.len(), "collected liquid data offsets");

    resolve_vertex_data(&mut cursor, &ledger, &mut chunks)?;
    Ok(chunks)
}

fn read_exists_bitmap(cursor: &mut ByteCursor<'_>, instance: &mut LiquidInstance) -> Result<()> {
    if instance.offset_exists_bitmap == 0 {
        return Ok(());
    }

    let squares = instance.width as usize * instance.height as usize;
    cursor.seek(instance.offset_exists_bitmap as usize)?;
    instance.bitmap = cursor.read_bytes(mask_len(squares))?.to_vec();
    Ok(())
}

/// Second pass: rebuild every instance's vertex payload from the ledger
///
/// The cursor must cover exactly the liquid chunk payload, its length bounds the
/// final region. An instance whose region size matches no layout keeps empty
/// vertex data, every other failure aborts.
pub fn resolve_vertex_data(
    cursor: &mut ByteCursor<'_>,
    ledger: &OffsetLedger,
    chunks: &mut [LiquidChunk],
) -> Result<()> {
    let container_len = cursor.len() as u32;

    for instance in chunks.iter_mut().flat_map(|c| c.instances.iter_mut()) {
        let offset = instance.offset_vertex_data;
        if offset == 0 {
            continue;
        }

        let length = ledger.region_len(offset, container_len).ok_or(
            wex_chunk::error::Error::InvalidOffset {
                offset: offset as usize,
                length: container_len as usize,
            },
        )?;

        let vertices = instance.vertex_count();
        let Some(layout) = VertexLayout::infer(length, vertices) else {
            let err = Error::UnrecognizedLayout {
                offset,
                length,
                vertices,
            };
            warn!(%err, "leaving liquid vertex data empty");
            continue;
        };

        cursor.seek(offset as usize)?;
        instance.vertex_data = read_vertex_data(cursor, layout, vertices as usize)?;
        instance.layout = Some(layout);
    }

    Ok(())
}

/// Fields are stored one after another, height then uv then depth
fn read_vertex_data(
    cursor: &mut ByteCursor<'_>,
    layout: VertexLayout,
    vertices: usize,
) -> Result<VertexData> {
    let mut data = VertexData::default();

    if layout.has_height() {
        data.height = cursor.read_f32_vec::<LittleEndian>(vertices)?;
    }
    if layout.has_uv() {
        data.uv = cursor.read_records(vertices)?;
    }
    if layout.has_depth() {
        data.depth = cursor.read_bytes(vertices)?.to_vec();
    }

    Ok(data)
}

#[cfg(test)]
mod test {
    use crate::liquid::OffsetLedger;
    use crate::types::VertexLayout;

    #[test]
    fn ledger_is_sorted_and_distinct() {
        let ledger = [300u32, 0, 100, 300, 200]
            .into_iter()
            .collect::<OffsetLedger>();
        assert_eq!(ledger.offsets(), &[100, 200, 300]);
    }

    #[test]
    fn ledger_region_lengths() {
        let ledger = [100u32, 180, 260].into_iter().collect::<OffsetLedger>();

        assert_eq!(ledger.region_len(100, 400), Some(80));
        assert_eq!(ledger.region_len(180, 400), Some(80));
        assert_eq!(ledger.region_len(260, 400), Some(140));

        assert_eq!(ledger.region_len(150, 400), None);
        assert_eq!(ledger.region_len(260, 200), None);
    }

    #[test]
    fn unrecognized_region() {
        let ledger = [100u32, 180, 260].into_iter().collect::<OffsetLedger>();
        let length = ledger.region_len(180, 400).unwrap();

        assert_eq!(length, 80);
        assert_eq!(VertexLayout::infer(length, 20), None);
    }
}
