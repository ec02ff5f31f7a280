use crate::demo::{run_demo, run_matches, run_roi, DemoArgs, MatchesArgs, RoiArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use reciloop::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "ReciLoop",
    about = "Match industrial waste generators with consumers and estimate diversion ROI",
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
    /// Print ranked waste-to-consumer matches for the configured catalog
    Matches(MatchesArgs),
    /// Estimate profit, payback, and ROI for diverting a waste stream
    Roi(RoiArgs),
    /// Walk through catalog, matches, inventory, and an ROI sample
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
        Command::Matches(args) => run_matches(args),
        Command::Roi(args) => run_roi(args),
        Command::Demo(args) => run_demo(args),
    }
}
