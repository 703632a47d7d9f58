use crate::demo::{run_allocate, run_demo, AllocateArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use seat_allocation::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Seat Allocation Engine",
    about = "Run priority-ordered seat allocation from the command line or over HTTP",
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
    /// Allocate seats for a roster snapshot and print the outcome
    Allocate(AllocateArgs),
    /// Run the bundled sample roster twice and show the result is unchanged
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
        Command::Allocate(args) => run_allocate(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use seat_allocation::allocation::TieBreak;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn allocate_accepts_csv_pair_and_tie_break() {
        let cli = Cli::try_parse_from([
            "seat-allocation-api",
            "allocate",
            "--facilities",
            "facilities.csv",
            "--applicants",
            "applicants.csv",
            "--tie-break",
            "applicant-id",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Allocate(args)) => {
                assert_eq!(args.tie_break, Some(TieBreak::ApplicantId));
                assert!(args.roster.is_none());
            }
            other => panic!("expected allocate command, got {other:?}"),
        }
    }

    #[test]
    fn allocate_requires_a_roster_source() {
        assert!(Cli::try_parse_from(["seat-allocation-api", "allocate"]).is_err());
        assert!(Cli::try_parse_from([
            "seat-allocation-api",
            "allocate",
            "--roster",
            "roster.json",
            "--facilities",
            "facilities.csv",
            "--applicants",
            "applicants.csv",
        ])
        .is_err());
    }
}
