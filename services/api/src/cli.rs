use crate::score::{run_score, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use strength_meter::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Strength Meter",
    about = "Serve or run the password strength meter from the command line",
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
    /// Score a single password and print the heuristic and fused results
    Score(ScoreArgs),
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
        Command::Score(args) => run_score(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["strength-meter-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_accepts_identity_lists() {
        let cli = Cli::try_parse_from([
            "strength-meter-api",
            "score",
            "Tr0ub4dor&3",
            "--username",
            "alice",
            "--core-info",
            "Alice",
            "Smith",
            "--wait-ms",
            "50",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.password, "Tr0ub4dor&3");
                assert_eq!(args.username, "alice");
                assert_eq!(args.core_info, vec!["Alice", "Smith"]);
                assert!(args.all_info.is_empty());
                assert_eq!(args.wait_ms, 50);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
