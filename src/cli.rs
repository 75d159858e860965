use clap::{ArgAction, Parser, Subcommand};

use crate::{
    commands::{CompletionsCommand, login},
    error::Result,
};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "awsconsole",
    version,
    about = "Open the AWS Management Console with a federated session from your local credentials",
    long_about = None
)]
pub struct Cli {
    #[arg(
        short = 'p',
        long,
        help = "use an aws profile name in ~/.aws/credentials"
    )]
    pub profile: Option<String>,

    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Generate shell completion scripts for awsconsole")]
    Completions(CompletionsCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Some(Commands::Completions(cmd)) => {
                cmd.execute();
                Ok(())
            }
            None => login::execute(self.profile.as_deref()).await,
        }
    }
}
