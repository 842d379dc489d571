use clap::Parser;
use jwt_identity::cli::{self, Cli, Command};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Issue(args) => cli::issue::run(args),
        Command::Inspect(args) => cli::inspect::run(args),
    }
}
