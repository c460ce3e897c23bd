use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "genspeech-backend", about = "Batch speech synthesis service")]
pub struct Cli {
    /// Branch this deployment is built from; overrides `BRANCH`
    #[arg(long, global = true)]
    pub branch: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Bootstrap shared resources and serve the HTTP front door (default)
    Serve,
    /// Run migrations and bootstrap shared resources, then exit
    Bootstrap,
    /// Apply the environment's removal policy to its stateful resources
    Teardown,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}
