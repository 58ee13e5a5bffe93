//! Base types shared by every chunked container.

use std::fmt;

/// A 32-bit chunk identifier
///
/// Tags are compared exactly as they are decoded from disk, no byte swapping is
/// performed. Containers that store their identifiers reversed (`REVM` on disk
/// for `MVER`) are matched by reading the tag as a little-endian integer and
/// declaring constants with [`Tag::from_fourcc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub u32);

impl Tag {
    /// Builds a tag from its human readable four character code
    pub const fn from_fourcc(code: &[u8; 4]) -> Tag {
        Tag(u32::from_be_bytes(*code))
    }

    /// The four character code of this tag, most significant byte first
    pub const fn fourcc(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl From<u32> for Tag {
    fn from(value: u32) -> Self {
        Tag(value)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.fourcc();
        if code.iter().all(|c| c.is_ascii_graphic() || *c == b' ') {
            code.iter().try_for_each(|c| write!(f, "{}", *c as char))
        } else {
            write!(f, "{:#010x}", self.0)
        }
    }
}

/// Location of a single chunk inside a buffer
///
/// `offset` points at the tag, the payload starts eight bytes later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRecord {
    pub tag: Tag,
    pub offset: usize,
    pub size: u32,
}

impl ChunkRecord {
    /// The offset at which the next sibling chunk begins
    pub fn boundary(&self) -> usize {
        self.offset + 8 + self.size as usize
    }
}
