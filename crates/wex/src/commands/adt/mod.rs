use miette::{Context, IntoDiagnostic, Result};
use std::path::Path;
use tracing::debug;
use wex_adt::{CompanionFlags, OffsetMismatchPolicy};

pub mod chunks;
pub mod info;
pub mod scan;

#[derive(clap::Subcommand)]
pub enum AdtCommands {
    /// Summarise a single terrain file
    Info(info::InfoArgs),
    /// Parse every terrain file below a directory
    Scan(scan::ScanArgs),
    /// List the top level chunks of any chunked file
    Chunks(chunks::ChunksArgs),
}

impl AdtCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            AdtCommands::Info(info) => info.handle(),
            AdtCommands::Scan(scan) => scan.handle(),
            AdtCommands::Chunks(chunks) => chunks.handle(),
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .into_diagnostic()
        .context(format!("path: {}", path.display()))
}

/// Flags of the map definition file, if one was given
fn read_companion(map: Option<&Path>) -> Result<Option<CompanionFlags>> {
    let Some(path) = map else {
        return Ok(None);
    };

    let flags = CompanionFlags::from_map_buffer(&read_file(path)?)?;
    debug!(flags = flags.0, "read map flags from {}", path.display());
    Ok(Some(flags))
}

fn policy(lenient: bool) -> OffsetMismatchPolicy {
    if lenient {
        OffsetMismatchPolicy::SkipChunk
    } else {
        OffsetMismatchPolicy::Abort
    }
}
