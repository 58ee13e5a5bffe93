//! Table driven walking of tag-length-value chunk streams
//!

use byteorder::LittleEndian;
use tracing::{debug, trace};

use crate::cursor::ByteCursor;
use crate::error::Error;
use crate::types::{ChunkRecord, Tag};

/// Signature shared by every chunk handler
///
/// A handler receives the cursor positioned at the start of the payload, the
/// declared payload size, and the output it should populate. It may consume any
/// amount of the payload, the walker restores the cursor afterwards.
pub type Handler<C, E> = fn(&mut ByteCursor<'_>, u32, &mut C) -> Result<(), E>;

/// Immutable mapping from chunk tag to handler
///
/// Tables are built once as `static`s and shared read-only by every parse.
///
/// ```
/// use wex_chunk::{ByteCursor, ChunkWalker, HandlerTable, Tag};
///
/// const NAME: Tag = Tag::from_fourcc(b"NAME");
///
/// fn name(
///     cursor: &mut ByteCursor<'_>,
///     size: u32,
///     out: &mut Vec<String>,
/// ) -> wex_chunk::error::Result<()> {
///     out.extend(cursor.read_string_block(size as usize)?.into_values());
///     Ok(())
/// }
///
/// static TABLE: HandlerTable<Vec<String>, wex_chunk::error::Error> =
///     HandlerTable::new("names", &[(NAME, name)]);
///
/// # fn doit() -> wex_chunk::error::Result<()> {
/// let input = [b'E', b'M', b'A', b'N', 3, 0, 0, 0, b'a', b'b', 0];
/// let mut names = Vec::new();
/// ChunkWalker::new(&TABLE).walk(&mut ByteCursor::new(&input), &mut names)?;
/// assert_eq!(names, vec!["ab".to_string()]);
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
pub struct HandlerTable<C: 'static, E: 'static> {
    name: &'static str,
    handlers: &'static [(Tag, Handler<C, E>)],
}

impl<C: 'static, E: 'static> HandlerTable<C, E> {
    pub const fn new(name: &'static str, handlers: &'static [(Tag, Handler<C, E>)]) -> Self {
        HandlerTable { name, handlers }
    }

    /// Name used when logging which table is active
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Find the handler registered for `tag`
    pub fn get(&self, tag: Tag) -> Option<Handler<C, E>> {
        self.handlers
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, handler)| *handler)
    }

    /// Whether a handler is registered for `tag`
    pub fn contains(&self, tag: Tag) -> bool {
        self.get(tag).is_some()
    }

    /// Every tag this table understands, in registration order
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.handlers.iter().map(|(tag, _)| *tag)
    }
}

/// Drives a [`HandlerTable`] over a sequence of chunks
///
/// Each chunk is framed as `[tag: u32 le][size: u32 le][size bytes]`. Tags without
/// a handler are skipped, chunks with a zero size are skipped without calling
/// their handler. After every chunk the cursor is moved to exactly
/// `chunk_start + 8 + size` no matter how much the handler consumed. The first
/// handler error aborts the walk.
pub struct ChunkWalker<'t, C: 'static, E: 'static> {
    table: &'t HandlerTable<C, E>,
}

impl<'t, C, E> ChunkWalker<'t, C, E>
where
    C: 'static,
    E: From<Error> + 'static,
{
    pub fn new(table: &'t HandlerTable<C, E>) -> Self {
        ChunkWalker { table }
    }

    /// Walk chunks until the end of the buffer
    pub fn walk(&self, cursor: &mut ByteCursor<'_>, context: &mut C) -> Result<(), E> {
        let end = cursor.len();
        self.walk_until(cursor, end, context)
    }

    /// Walk chunks until the cursor reaches `end`
    ///
    /// Used for nested chunks, where `end` is the boundary of the parent. A child
    /// that declares a size reaching past `end` fails with [`Error::InvalidOffset`].
    pub fn walk_until(
        &self,
        cursor: &mut ByteCursor<'_>,
        end: usize,
        context: &mut C,
    ) -> Result<(), E> {
        while cursor.offset() < end {
            let chunk = read_header(cursor, end)?;

            match self.table.get(chunk.tag) {
                Some(_) if chunk.size == 0 => {
                    trace!(tag = %chunk.tag, table = self.table.name(), "empty chunk");
                }
                Some(handler) => {
                    trace!(
                        tag = %chunk.tag,
                        size = chunk.size,
                        offset = chunk.offset,
                        table = self.table.name(),
                        "handling chunk"
                    );
                    handler(cursor, chunk.size, context)?;
                }
                None => {
                    debug!(
                        tag = %chunk.tag,
                        size = chunk.size,
                        table = self.table.name(),
                        "skipping unknown chunk"
                    );
                }
            }

            cursor.seek(chunk.boundary())?;
        }

        Ok(())
    }
}

/// List the chunks between the cursor and the end of the buffer without decoding them
pub fn scan(cursor: &mut ByteCursor<'_>) -> Result<Vec<ChunkRecord>, Error> {
    let end = cursor.len();
    let mut chunks = Vec::new();
    while cursor.offset() < end {
        let chunk = read_header(cursor, end)?;
        cursor.seek(chunk.boundary())?;
        chunks.push(chunk);
    }
    Ok(chunks)
}

fn read_header(cursor: &mut ByteCursor<'_>, end: usize) -> Result<ChunkRecord, Error> {
    let offset = cursor.offset();
    let tag = Tag(cursor.read_u32::<LittleEndian>()?);
    let size = cursor.read_u32::<LittleEndian>()?;

    let chunk = ChunkRecord { tag, offset, size };
    let boundary = chunk.boundary();
    if boundary > end {
        return Err(Error::InvalidOffset {
            offset: boundary,
            length: end,
        });
    }

    Ok(chunk)
}
