use clap::Args;
use itertools::Itertools;
use miette::{miette, Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::info;
use wex_install::{InstallFile, InstallManifest};

#[derive(Args)]
pub struct ListArgs {
    /// A decoded install manifest
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Only list files selected by this tag
    #[arg(short, long, value_name = "NAME")]
    tag: Option<String>,

    /// Print the selected files as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let data = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let manifest = InstallManifest::parse(&data)?;
        info!(
            tags = manifest.tags.len(),
            files = manifest.len(),
            "read {}",
            self.file.display()
        );

        let files = match &self.tag {
            Some(tag) => {
                if manifest.tag_by_name(tag).is_none() {
                    let known = manifest.tags.iter().map(|t| t.name.as_str()).join(", ");
                    return Err(miette!("unknown tag {tag}, expected one of: {known}"));
                }
                manifest.files_with_tag(tag).collect::<Vec<_>>()
            }
            None => manifest.files.iter().collect(),
        };

        if self.json {
            let json = serde_json::to_string_pretty(&files).into_diagnostic()?;
            println!("{json}");
            return Ok(());
        }

        for file in &files {
            print_file(file);
        }
        println!(
            "{} of {} files, {} bytes",
            files.len().bold(),
            manifest.len(),
            files.iter().map(|f| u64::from(f.size)).sum::<u64>()
        );
        Ok(())
    }
}

fn print_file(file: &InstallFile) {
    println!(
        "{} {} {:>10} {}",
        file.hash.dimmed(),
        file.name.green(),
        file.size,
        file.tags.iter().join(",").cyan()
    );
}
