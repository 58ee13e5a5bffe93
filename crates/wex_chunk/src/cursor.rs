//! Bounds-checked sequential reading over an in-memory buffer
//!

use std::io;

use binrw::{BinRead, Endian};
use byteorder::ByteOrder;
use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Sequential reader over a borrowed byte buffer
///
/// The offset always stays within `[0, len]`. Reads that would run past the end
/// fail with [`Error::TruncatedBuffer`] and leave the offset untouched, seeks
/// outside of the buffer fail with [`Error::InvalidOffset`]. Nothing is clamped.
///
/// Multi-byte reads take the byte order as a type parameter so a single cursor
/// can serve both little-endian chunk containers and big-endian manifests.
///
/// ```
/// use byteorder::{BigEndian, LittleEndian};
/// use wex_chunk::ByteCursor;
///
/// # fn doit() -> wex_chunk::error::Result<()> {
/// let mut cursor = ByteCursor::new(&[0x01, 0x00, 0x00, 0x02]);
/// assert_eq!(cursor.read_u16::<LittleEndian>()?, 1);
/// assert_eq!(cursor.read_u16::<BigEndian>()?, 2);
/// assert_eq!(cursor.remaining_bytes(), 0);
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, offset: 0 }
    }

    /// Total length of the underlying buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current absolute offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes between the offset and the end of the buffer
    pub fn remaining_bytes(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Move to an absolute offset
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(Error::InvalidOffset {
                offset,
                length: self.data.len(),
            });
        }
        self.offset = offset;
        Ok(())
    }

    /// Advance the offset by `count` bytes
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Borrow the next `count` bytes and advance past them
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining_bytes() {
            return Err(self.truncated());
        }
        let bytes = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16<E: ByteOrder>(&mut self) -> Result<u16> {
        self.read_bytes(2).map(E::read_u16)
    }

    pub fn read_i16<E: ByteOrder>(&mut self) -> Result<i16> {
        self.read_bytes(2).map(E::read_i16)
    }

    pub fn read_u32<E: ByteOrder>(&mut self) -> Result<u32> {
        self.read_bytes(4).map(E::read_u32)
    }

    pub fn read_i32<E: ByteOrder>(&mut self) -> Result<i32> {
        self.read_bytes(4).map(E::read_i32)
    }

    pub fn read_u64<E: ByteOrder>(&mut self) -> Result<u64> {
        self.read_bytes(8).map(E::read_u64)
    }

    pub fn read_i64<E: ByteOrder>(&mut self) -> Result<i64> {
        self.read_bytes(8).map(E::read_i64)
    }

    pub fn read_f32<E: ByteOrder>(&mut self) -> Result<f32> {
        self.read_bytes(4).map(E::read_f32)
    }

    /// Read `count` consecutive `u16` values
    pub fn read_u16_vec<E: ByteOrder>(&mut self, count: usize) -> Result<Vec<u16>> {
        self.read_vec(count, 2, E::read_u16)
    }

    /// Read `count` consecutive `i16` values
    pub fn read_i16_vec<E: ByteOrder>(&mut self, count: usize) -> Result<Vec<i16>> {
        self.read_vec(count, 2, E::read_i16)
    }

    /// Read `count` consecutive `u32` values
    pub fn read_u32_vec<E: ByteOrder>(&mut self, count: usize) -> Result<Vec<u32>> {
        self.read_vec(count, 4, E::read_u32)
    }

    /// Read `count` consecutive `f32` values
    pub fn read_f32_vec<E: ByteOrder>(&mut self, count: usize) -> Result<Vec<f32>> {
        self.read_vec(count, 4, E::read_f32)
    }

    fn read_vec<T>(&mut self, count: usize, width: usize, f: fn(&[u8]) -> T) -> Result<Vec<T>> {
        let total = count.checked_mul(width).ok_or_else(|| self.truncated())?;
        Ok(self.read_bytes(total)?.chunks_exact(width).map(f).collect())
    }

    /// Read a string up to (and consuming) the next null byte
    ///
    /// A string without a terminator before the end of the buffer is treated as
    /// a truncated read.
    pub fn read_cstring(&mut self) -> Result<String> {
        let rest = &self.data[self.offset..];
        let Some(end) = rest.iter().position(|b| *b == b'\0') else {
            return Err(self.truncated());
        };
        let value = String::from_utf8_lossy(&rest[..end]).into_owned();
        self.offset += end + 1;
        Ok(value)
    }

    /// Read `size` bytes of packed null-terminated strings
    ///
    /// Each string is keyed by its offset relative to the start of the block, which
    /// is how offset tables elsewhere in a container refer to them. Empty strings
    /// (consecutive terminators) produce no entry.
    pub fn read_string_block(&mut self, size: usize) -> Result<IndexMap<u32, String>> {
        let block = self.read_bytes(size)?;

        let mut entries = IndexMap::new();
        let mut start = 0;
        for (i, byte) in block.iter().enumerate() {
            if *byte != b'\0' {
                continue;
            }
            if i > start {
                entries.insert(
                    start as u32,
                    String::from_utf8_lossy(&block[start..i]).into_owned(),
                );
            }
            start = i + 1;
        }

        Ok(entries)
    }

    /// Read `count` bytes and render them as a lowercase hex string
    pub fn read_hex(&mut self, count: usize) -> Result<String> {
        self.read_bytes(count).map(hex::encode)
    }

    /// Decode a fixed layout record with [`binrw`]
    ///
    /// Records that declare their own byte order (`#[br(little)]`) keep it,
    /// anything else is read little-endian.
    pub fn read_record<T>(&mut self) -> Result<T>
    where
        T: for<'b> BinRead<Args<'b> = ()>,
    {
        let mut reader = io::Cursor::new(&self.data[self.offset..]);
        match T::read_options(&mut reader, Endian::Little, ()) {
            Ok(value) => {
                self.offset += reader.position() as usize;
                Ok(value)
            }
            Err(err) if err.is_eof() => Err(self.truncated()),
            Err(err) => Err(Error::from(err)),
        }
    }

    /// Read `count` fixed layout records back to back
    pub fn read_records<T>(&mut self, count: usize) -> Result<Vec<T>>
    where
        T: for<'b> BinRead<Args<'b> = ()>,
    {
        (0..count).map(|_| self.read_record()).collect()
    }

    fn truncated(&self) -> Error {
        Error::TruncatedBuffer {
            offset: self.offset,
            remaining: self.remaining_bytes(),
        }
    }
}

#[cfg(test)]
mod test {
    use binrw::BinRead;
    use byteorder::{BigEndian, LittleEndian};
    use pretty_assertions::assert_eq;

    use crate::cursor::ByteCursor;
    use crate::error::{Error, Result};

    #[derive(BinRead, Debug, PartialEq)]
    #[br(little)]
    struct Pair {
        first: u16,
        second: u32,
    }

    #[test]
    fn read_mixed_endianness() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x12, 0x00,             // u16 le
            0x00, 0x12,             // u16 be
            0x78, 0x56, 0x34, 0x12, // u32 le
            0x00, 0x00, 0x80, 0x3F, // f32 le
        ];

        let mut cursor = ByteCursor::new(&input);
        assert_eq!(cursor.read_u16::<LittleEndian>()?, 0x12);
        assert_eq!(cursor.read_u16::<BigEndian>()?, 0x12);
        assert_eq!(cursor.read_u32::<LittleEndian>()?, 0x12345678);
        assert_eq!(cursor.read_f32::<LittleEndian>()?, 1.0);
        assert_eq!(cursor.remaining_bytes(), 0);

        Ok(())
    }

    #[test]
    fn read_past_end_fails_without_moving() {
        let input = [0x01, 0x02, 0x03];
        let mut cursor = ByteCursor::new(&input);
        cursor.read_u8().unwrap();

        let err = cursor.read_u32::<LittleEndian>().unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedBuffer {
                offset: 1,
                remaining: 2
            }
        ));
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn seek_bounds() {
        let input = [0u8; 4];
        let mut cursor = ByteCursor::new(&input);

        assert!(cursor.seek(4).is_ok());
        assert_eq!(cursor.remaining_bytes(), 0);

        let err = cursor.seek(5).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidOffset {
                offset: 5,
                length: 4
            }
        ));
        assert_eq!(cursor.offset(), 4);
    }

    #[test]
    fn read_cstring() -> Result<()> {
        let input = b"hello\0world\0tail";
        let mut cursor = ByteCursor::new(input);

        assert_eq!(cursor.read_cstring()?, "hello");
        assert_eq!(cursor.read_cstring()?, "world");
        assert!(matches!(
            cursor.read_cstring(),
            Err(Error::TruncatedBuffer { offset: 12, .. })
        ));

        Ok(())
    }

    #[test]
    fn read_string_block_keys_by_relative_offset() -> Result<()> {
        let input = b"XXa.m2\0\0b.m2\0c";
        let mut cursor = ByteCursor::new(input);
        cursor.skip(2)?;

        let block = cursor.read_string_block(input.len() - 2)?;
        let entries = block.into_iter().collect::<Vec<_>>();
        assert_eq!(
            entries,
            vec![(0, "a.m2".to_string()), (6, "b.m2".to_string())]
        );

        Ok(())
    }

    #[test]
    fn read_hex() -> Result<()> {
        let input = [0xDE, 0xAD, 0xBE, 0xEF];
        let mut cursor = ByteCursor::new(&input);
        assert_eq!(cursor.read_hex(4)?, "deadbeef");
        Ok(())
    }

    #[test]
    fn read_arrays() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x01, 0x00, 0x02, 0x00,
            0xFF, 0xFF,
        ];
        let mut cursor = ByteCursor::new(&input);

        assert_eq!(cursor.read_u16_vec::<LittleEndian>(2)?, vec![1, 2]);
        assert_eq!(cursor.read_i16_vec::<LittleEndian>(1)?, vec![-1]);
        assert!(cursor.read_u32_vec::<LittleEndian>(1).is_err());

        Ok(())
    }

    #[test]
    fn read_record() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            0x02, 0x00,
            0x03, 0x00, 0x00, 0x00,
            0x04, 0x00,
        ];
        let mut cursor = ByteCursor::new(&input);

        assert_eq!(
            cursor.read_record::<Pair>()?,
            Pair {
                first: 2,
                second: 3
            }
        );
        assert_eq!(cursor.offset(), 6);

        let err = cursor.read_record::<Pair>().unwrap_err();
        assert!(matches!(err, Error::TruncatedBuffer { offset: 6, .. }));

        Ok(())
    }
}
