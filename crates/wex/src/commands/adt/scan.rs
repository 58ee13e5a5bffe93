use clap::Args;
use miette::{miette, Result};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;
use wex_adt::{Adt, AdtKind, ParseOptions};

use super::{policy, read_companion, read_file};

#[derive(Args)]
pub struct ScanArgs {
    /// A directory holding terrain files
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Map definition file, texture files are skipped without it
    #[arg(short, long, value_name = "WDT")]
    map: Option<PathBuf>,

    /// Drop the remaining alpha layers of a cell on an offset mismatch instead of failing
    #[arg(long, default_value_t = false)]
    lenient: bool,

    /// Exit with an error if any file failed to parse
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Debug, Default)]
struct ScanStats {
    parsed: usize,
    failed: usize,
    skipped: usize,
}

impl ScanArgs {
    pub fn handle(&self) -> Result<()> {
        let options = ParseOptions::builder()
            .offset_mismatch(policy(self.lenient))
            .maybe_companion(read_companion(self.map.as_deref())?)
            .build();

        let files = WalkDir::new(&self.directory)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| !e.file_type().is_dir())
            .filter_map(|e| AdtKind::from_file_name(e.file_name()).map(|kind| (e, kind)))
            .collect::<Vec<_>>();

        if files.is_empty() {
            return Err(miette!("no terrain files in {}", self.directory.display()));
        }
        info!("scanning {} files", files.len());

        let mut stats = ScanStats::default();
        for (entry, kind) in &files {
            if *kind == AdtKind::Texture && options.companion.is_none() {
                warn!("skipping {}, no map definition given", entry.path().display());
                stats.skipped += 1;
                continue;
            }

            match parse_file(entry.path(), *kind, &options) {
                Ok(adt) => {
                    debug!(version = ?adt.version(), "parsed {}", entry.path().display());
                    stats.parsed += 1;
                }
                Err(err) => {
                    error!("{}: {err}", entry.path().display());
                    stats.failed += 1;
                }
            }
        }

        println!(
            "{} parsed, {} failed, {} skipped",
            stats.parsed.green(),
            stats.failed.red(),
            stats.skipped.yellow()
        );

        if self.strict && stats.failed > 0 {
            return Err(miette!("{} files failed to parse", stats.failed));
        }
        Ok(())
    }
}

fn parse_file(path: &Path, kind: AdtKind, options: &ParseOptions) -> Result<Adt> {
    let data = read_file(path)?;
    Ok(Adt::parse(&data, kind, options)?)
}
