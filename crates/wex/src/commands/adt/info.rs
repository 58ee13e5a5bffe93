use clap::{Args, ValueEnum};
use itertools::Itertools;
use miette::{miette, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use wex_adt::{Adt, AdtKind, ObjAdt, ParseOptions, RootAdt, TexAdt};

use super::{policy, read_companion, read_file};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Root,
    Obj,
    Tex,
}

impl From<Kind> for AdtKind {
    fn from(value: Kind) -> Self {
        match value {
            Kind::Root => AdtKind::Root,
            Kind::Obj => AdtKind::Object,
            Kind::Tex => AdtKind::Texture,
        }
    }
}

#[derive(Args)]
pub struct InfoArgs {
    /// An input terrain file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Kind of terrain file, guessed from the file name if omitted
    #[arg(short, long, value_enum)]
    kind: Option<Kind>,

    /// Map definition file, required for texture files
    #[arg(short, long, value_name = "WDT")]
    map: Option<PathBuf>,

    /// Drop the remaining alpha layers of a cell on an offset mismatch instead of failing
    #[arg(long, default_value_t = false)]
    lenient: bool,

    /// Print the parsed file as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let kind = self
            .kind
            .map(AdtKind::from)
            .or_else(|| AdtKind::from_file_name(&self.file))
            .ok_or_else(|| miette!("unable to tell the kind of {}", self.file.display()))?;

        let options = ParseOptions::builder()
            .offset_mismatch(policy(self.lenient))
            .maybe_companion(read_companion(self.map.as_deref())?)
            .build();

        let data = read_file(&self.file)?;
        let adt = Adt::parse(&data, kind, &options)?;

        if self.json {
            let json = serde_json::to_string_pretty(&adt).into_diagnostic()?;
            println!("{json}");
            return Ok(());
        }

        println!(
            "{} ({:?}, version {})",
            self.file.display().bold(),
            adt.kind(),
            adt.version().map_or("none".into(), |v| v.to_string())
        );
        match &adt {
            Adt::Root(root) => print_root(root),
            Adt::Object(obj) => print_object(obj),
            Adt::Texture(tex) => print_texture(tex),
        }
        Ok(())
    }
}

fn print_root(adt: &RootAdt) {
    let heights = adt.cells.iter().filter(|c| c.vertices.is_some()).count();
    println!("  cells: {} ({} with heights)", adt.cells.len(), heights);

    let Some(liquids) = &adt.liquids else {
        println!("  liquids: {}", "none".dimmed());
        return;
    };

    let instances = liquids.iter().flat_map(|c| &c.instances).collect::<Vec<_>>();
    let layouts = instances
        .iter()
        .map(|i| i.layout.map_or("unresolved".to_string(), |l| format!("{l:?}")))
        .counts()
        .into_iter()
        .sorted()
        .map(|(layout, count)| format!("{layout}: {count}"))
        .join(", ");
    println!("  liquid instances: {} ({})", instances.len(), layouts);
}

fn print_object(adt: &ObjAdt) {
    println!("  models: {} names, {} placements", adt.m2_names.len(), adt.models.len());
    for name in adt.models.iter().filter_map(|m| adt.model_name(m)).unique() {
        println!("    {}", name.green());
    }

    println!(
        "  world models: {} names, {} placements",
        adt.wmo_names.len(),
        adt.world_models.len()
    );
    for name in adt.world_models.iter().filter_map(|m| adt.world_model_name(m)).unique() {
        println!("    {}", name.green());
    }
}

fn print_texture(adt: &TexAdt) {
    println!("  textures: {}", adt.textures.len());
    for name in adt.textures.values() {
        println!("    {}", name.green());
    }

    let layers = adt.cells.iter().map(|c| c.layers.len()).sum::<usize>();
    let maps = adt.cells.iter().map(|c| c.alpha_layers.len()).sum::<usize>();
    println!("  cells: {} ({} layers, {} alpha maps)", adt.cells.len(), layers, maps);
}
