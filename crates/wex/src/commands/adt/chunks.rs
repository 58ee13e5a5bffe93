use clap::Args;
use miette::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use wex_chunk::{walker::scan, ByteCursor};

use super::read_file;

#[derive(Args)]
pub struct ChunksArgs {
    /// An input file using chunk framing
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl ChunksArgs {
    pub fn handle(&self) -> Result<()> {
        let data = read_file(&self.file)?;
        let chunks = scan(&mut ByteCursor::new(&data))?;

        for chunk in &chunks {
            println!(
                "{:#010x} {} {:>8}",
                chunk.offset.dimmed(),
                chunk.tag.green(),
                chunk.size
            );
        }
        println!("{} chunks", chunks.len().bold());
        Ok(())
    }
}
