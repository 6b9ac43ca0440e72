use crate::demo::{run_demo, run_identify, run_rank, DemoArgs, IdentifyArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use padel_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Padel Match",
    about = "Serve and explore padel racket recommendations from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank the catalog against a player profile stored as JSON
    Rank(RankArgs),
    /// Identify a racket from a photo and look it up in the catalog
    Identify(IdentifyArgs),
    /// Walk a sample player through profiling and ranking
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_rank(args),
        Command::Identify(args) => run_identify(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
