use crate::demo::{run_batch, run_demo, run_valuate, BatchArgs, DemoArgs, ValuateArgs};
use crate::server;
use autovalue::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "autovalue",
    about = "Value used vehicles and serve the valuation API from the command line",
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
    /// Value a single vehicle and print the breakdown
    Valuate(ValuateArgs),
    /// Value every listing in a CSV export
    Batch(BatchArgs),
    /// Walk through reference vehicles end to end
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
        Command::Valuate(args) => run_valuate(args),
        Command::Batch(args) => run_batch(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["autovalue"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn valuate_collects_repeated_features() {
        let cli = Cli::try_parse_from([
            "autovalue",
            "valuate",
            "--base-price",
            "15000",
            "--make",
            "Chevrolet",
            "--model",
            "Malibu",
            "--trim",
            "LTZ",
            "--mileage",
            "160000",
            "--feature",
            "leather seats",
            "--feature",
            "sunroof",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Valuate(args)) => {
                assert_eq!(args.features, vec!["leather seats", "sunroof"]);
                assert_eq!(args.mileage, Some(160_000));
                assert!(!args.json);
            }
            other => panic!("expected valuate command, got {other:?}"),
        }
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from(["autovalue", "serve", "--port", "8080"]).expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
            }
            other => panic!("expected serve command, got {other:?}"),
        }
    }
}
