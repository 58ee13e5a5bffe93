pub mod adt;
pub mod install;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Inspect terrain files
    Adt {
        #[command(subcommand)]
        command: adt::AdtCommands,
    },
    /// Inspect install manifests
    Install {
        #[command(subcommand)]
        command: install::InstallCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Adt { command } => command.handle(),
            Commands::Install { command } => command.handle(),
        }
    }
}
