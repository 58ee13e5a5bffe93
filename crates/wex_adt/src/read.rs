//! Entry points for parsing terrain files
//!

use bon::Builder;
use std::path::Path;
use tracing::{debug, instrument};
use wex_chunk::{ByteCursor, ChunkWalker};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::companion::CompanionFlags;
use crate::error::{Error, Result};
use crate::handlers::obj::OBJ_HANDLERS;
use crate::handlers::root::ROOT_HANDLERS;
use crate::handlers::tex::{TexContext, TEX_HANDLERS};
use crate::types::{ObjAdt, RootAdt, TexAdt, CELL_COUNT};

/// What to do when an alpha layer does not start where the previous one ended
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OffsetMismatchPolicy {
    /// Fail the whole parse with [`Error::OffsetMismatch`]
    #[default]
    Abort,
    /// Keep the layers decoded so far and move on to the next cell
    SkipChunk,
}

/// Options for how terrain files are parsed
///
/// ```
/// use wex_adt::read::{OffsetMismatchPolicy, ParseOptions};
/// use wex_adt::CompanionFlags;
///
/// let options = ParseOptions::builder()
///     .offset_mismatch(OffsetMismatchPolicy::SkipChunk)
///     .companion(CompanionFlags(0x4))
///     .build();
///
/// assert_eq!(options.offset_mismatch, OffsetMismatchPolicy::SkipChunk);
/// ```
#[derive(Debug, Default, Clone, Copy, Builder)]
pub struct ParseOptions {
    #[builder(default)]
    pub offset_mismatch: OffsetMismatchPolicy,

    /// Flags of the map definition, required for texture files
    pub companion: Option<CompanionFlags>,
}

/// The three kinds of file making up a map tile
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AdtKind {
    /// `<map>_<x>_<y>.adt`
    Root,
    /// `<map>_<x>_<y>_obj0.adt` and `_obj1.adt`
    Object,
    /// `<map>_<x>_<y>_tex0.adt`
    Texture,
}

impl AdtKind {
    /// Guess the kind from a file name
    ///
    /// Level of detail files and anything not ending in `.adt` are not supported.
    ///
    /// ```
    /// use wex_adt::AdtKind;
    ///
    /// assert_eq!(AdtKind::from_file_name("azeroth_32_48.adt"), Some(AdtKind::Root));
    /// assert_eq!(AdtKind::from_file_name("Azeroth_32_48_OBJ0.ADT"), Some(AdtKind::Object));
    /// assert_eq!(AdtKind::from_file_name("azeroth_32_48_tex0.adt"), Some(AdtKind::Texture));
    /// assert_eq!(AdtKind::from_file_name("azeroth_32_48_lod.adt"), None);
    /// assert_eq!(AdtKind::from_file_name("azeroth.wdt"), None);
    /// ```
    pub fn from_file_name(name: impl AsRef<Path>) -> Option<Self> {
        let path = name.as_ref();
        let extension = path.extension()?.to_str()?;
        if !extension.eq_ignore_ascii_case("adt") {
            return None;
        }

        let stem = path.file_stem()?.to_str()?.to_ascii_lowercase();
        if stem.ends_with("_obj0") || stem.ends_with("_obj1") {
            Some(AdtKind::Object)
        } else if stem.ends_with("_tex0") {
            Some(AdtKind::Texture)
        } else if stem.ends_with("_lod") || stem.ends_with("_tex1") {
            None
        } else {
            Some(AdtKind::Root)
        }
    }
}

/// Any parsed terrain file
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Adt {
    Root(RootAdt),
    Object(ObjAdt),
    Texture(TexAdt),
}

impl Adt {
    /// Parse a complete file buffer of the given kind
    ///
    /// ```
    /// use wex_adt::{Adt, AdtKind, ParseOptions};
    ///
    /// let data = [b'R', b'E', b'V', b'M', 4, 0, 0, 0, 18, 0, 0, 0];
    /// let adt = Adt::parse(&data, AdtKind::Object, &ParseOptions::default()).unwrap();
    ///
    /// let Adt::Object(obj) = adt else { panic!() };
    /// assert_eq!(obj.version, Some(18));
    /// ```
    #[instrument(skip(data, options), fields(len = data.len()), err)]
    pub fn parse(data: &[u8], kind: AdtKind, options: &ParseOptions) -> Result<Adt> {
        let adt = match kind {
            AdtKind::Root => Adt::Root(RootAdt::parse(data)?),
            AdtKind::Object => Adt::Object(ObjAdt::parse(data)?),
            AdtKind::Texture => {
                let companion = options.companion.ok_or(Error::MissingCompanion)?;
                Adt::Texture(TexAdt::parse(data, companion, options)?)
            }
        };
        Ok(adt)
    }

    pub fn kind(&self) -> AdtKind {
        match self {
            Adt::Root(_) => AdtKind::Root,
            Adt::Object(_) => AdtKind::Object,
            Adt::Texture(_) => AdtKind::Texture,
        }
    }

    pub fn version(&self) -> Option<u32> {
        match self {
            Adt::Root(adt) => adt.version,
            Adt::Object(adt) => adt.version,
            Adt::Texture(adt) => adt.version,
        }
    }
}

impl RootAdt {
    /// Parse a root file: header, terrain cells and liquids
    #[instrument(skip(data), fields(len = data.len()), err)]
    pub fn parse(data: &[u8]) -> Result<RootAdt> {
        let mut adt = RootAdt {
            cells: Vec::with_capacity(CELL_COUNT),
            ..Default::default()
        };
        ChunkWalker::new(&ROOT_HANDLERS).walk(&mut ByteCursor::new(data), &mut adt)?;

        debug!(cells = adt.cells.len(), liquids = adt.liquids.is_some(), "parsed root file");
        Ok(adt)
    }
}

impl ObjAdt {
    /// Parse an object file: model names and placements
    #[instrument(skip(data), fields(len = data.len()), err)]
    pub fn parse(data: &[u8]) -> Result<ObjAdt> {
        let mut adt = ObjAdt::default();
        ChunkWalker::new(&OBJ_HANDLERS).walk(&mut ByteCursor::new(data), &mut adt)?;

        debug!(
            models = adt.models.len(),
            world_models = adt.world_models.len(),
            "parsed object file"
        );
        Ok(adt)
    }
}

impl TexAdt {
    /// Parse a texture file, decoding alpha maps according to `companion`
    #[instrument(skip(data, options), fields(len = data.len()), err)]
    pub fn parse(data: &[u8], companion: CompanionFlags, options: &ParseOptions) -> Result<TexAdt> {
        let mut context = TexContext {
            adt: TexAdt {
                cells: Vec::with_capacity(CELL_COUNT),
                ..Default::default()
            },
            wide_alpha: companion.has_wide_alpha(),
            policy: options.offset_mismatch,
        };
        ChunkWalker::new(&TEX_HANDLERS).walk(&mut ByteCursor::new(data), &mut context)?;

        debug!(
            textures = context.adt.textures.len(),
            cells = context.adt.cells.len(),
            "parsed texture file"
        );
        Ok(context.adt)
    }
}
