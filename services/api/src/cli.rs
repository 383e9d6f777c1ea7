use crate::outlook::{run_events_outlook, OutlookArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use events_core::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Community Events Service",
    about = "Run the community events registration service from the command line",
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
    /// Inspect registration eligibility across events
    Events {
        #[command(subcommand)]
        command: EventsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum EventsCommand {
    /// Evaluate an events CSV export and print the registration outlook
    Outlook(OutlookArgs),
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
        Command::Events {
            command: EventsCommand::Outlook(args),
        } => run_events_outlook(args),
    }
}
