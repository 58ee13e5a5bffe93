//! Stateless decoders for packed alpha maps and membership bitmasks.
//!
//! Alpha maps are always produced as a flat 64×64 grid of `0..=255` values,
//! whichever of the three on-disk encodings they were stored in:
//!
//! | Encoding | Input size  | Selected by                                   |
//! |----------|-------------|-----------------------------------------------|
//! | RLE      | variable    | per-layer compression flag                    |
//! | Literal  | 4096 bytes  | owning container advertises wide alpha        |
//! | Nibble   | 2048 bytes  | neither of the above                          |

use tracing::trace;

use crate::cursor::ByteCursor;
use crate::error::{Error, Result};

/// Number of entries in a decoded alpha map (64×64)
pub const ALPHA_MAP_LEN: usize = 64 * 64;

/// Size of a nibble packed alpha map on disk
pub const PACKED_ALPHA_LEN: usize = ALPHA_MAP_LEN / 2;

const RLE_FILL: u8 = 0x80;
const RLE_COUNT: u8 = 0x7F;

/// Decode a run-length compressed alpha map
///
/// Every control byte carries a mode in its high bit and a count in the low seven
/// bits. A fill run repeats the following byte `count` times, a copy run takes the
/// next `count` bytes verbatim. Decoding stops as soon as the map is full, runs that
/// overshoot are cut short and any bytes they would have copied are left unread.
///
/// Returns [`Error::RleUnderrun`] if the input is exhausted first.
pub fn decode_alpha_rle(cursor: &mut ByteCursor<'_>) -> Result<Vec<u8>> {
    let start = cursor.offset();
    let mut output = Vec::with_capacity(ALPHA_MAP_LEN);

    while output.len() < ALPHA_MAP_LEN {
        let control = next_rle_byte(cursor, output.len())?;
        let count = ((control & RLE_COUNT) as usize).min(ALPHA_MAP_LEN - output.len());

        if control & RLE_FILL != 0 {
            let value = next_rle_byte(cursor, output.len())?;
            output.resize(output.len() + count, value);
        } else {
            for _ in 0..count {
                let value = next_rle_byte(cursor, output.len())?;
                output.push(value);
            }
        }
    }

    trace!(consumed = cursor.offset() - start, "decoded rle alpha map");
    Ok(output)
}

fn next_rle_byte(cursor: &mut ByteCursor<'_>, produced: usize) -> Result<u8> {
    cursor
        .read_u8()
        .map_err(|_| Error::RleUnderrun { produced })
}

/// Expand packed 4-bit values into full bytes
///
/// The low nibble of each input byte lands at the even output index and the high
/// nibble at the odd index. Both are scaled by 17 so `0xF` maps onto `0xFF`.
pub fn unpack_nibbles(packed: &[u8]) -> Vec<u8> {
    packed
        .iter()
        .flat_map(|byte| [(byte & 0x0F) * 17, (byte >> 4) * 17])
        .collect()
}

/// Read a nibble packed alpha map
pub fn read_alpha_packed(cursor: &mut ByteCursor<'_>) -> Result<Vec<u8>> {
    cursor.read_bytes(PACKED_ALPHA_LEN).map(unpack_nibbles)
}

/// Read an uncompressed alpha map
pub fn read_alpha_literal(cursor: &mut ByteCursor<'_>) -> Result<Vec<u8>> {
    cursor.read_bytes(ALPHA_MAP_LEN).map(<[u8]>::to_vec)
}

/// Number of bytes needed to hold one bit for each of `count` members
pub fn mask_len(count: usize) -> usize {
    count.div_ceil(8)
}

/// Iterate the member indices selected by a bitmask
///
/// Bit 7 of byte `i` selects member `i * 8`, bit 0 selects member `i * 8 + 7`.
/// Set bits at or beyond `count` are padding and are skipped.
///
/// ```
/// use wex_chunk::bitstream::mask_indices;
///
/// let selected = mask_indices(&[0b1010_0000], 8).collect::<Vec<_>>();
/// assert_eq!(selected, vec![0, 2]);
/// ```
pub fn mask_indices(mask: &[u8], count: usize) -> impl Iterator<Item = usize> + '_ {
    mask.iter()
        .enumerate()
        .flat_map(|(i, byte)| {
            (0..8usize)
                .filter(move |bit| *byte & (0x80u8 >> *bit) != 0)
                .map(move |bit| i * 8 + bit)
        })
        .take_while(move |index| *index < count)
}
