use crate::report::{run_closure_report, ClosureReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use closure_stats::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "closure-stats",
    about = "Summarise healthcare facility closure exports for dashboards",
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
    /// Work with facility closure exports
    Closures {
        #[command(subcommand)]
        command: ClosuresCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ClosuresCommand {
    /// Aggregate a closure export by year, facility type and region
    Report(ClosureReportArgs),
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
        Command::Closures {
            command: ClosuresCommand::Report(args),
        } => run_closure_report(args),
    }
}
