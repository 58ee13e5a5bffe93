pub mod list;

#[derive(clap::Subcommand)]
pub enum InstallCommands {
    /// List the files of an install manifest
    List(list::ListArgs),
}

impl InstallCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            InstallCommands::List(list) => list.handle(),
        }
    }
}
