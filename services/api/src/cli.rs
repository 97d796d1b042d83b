use crate::estimate::{run_estimate, run_regions, EstimateArgs, RegionsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use pacific_estimator::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Pacific Construction Estimator",
    about = "Price Pacific island construction projects and serve the estimator over HTTP",
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
    /// Estimate construction cost and professional fees for one project
    Estimate(EstimateArgs),
    /// Show the regional rate tables in effect
    Regions(RegionsArgs),
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
        Command::Estimate(args) => run_estimate(args),
        Command::Regions(args) => run_regions(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_serve_when_no_subcommand() {
        let cli = Cli::try_parse_from(["pacific-estimator"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_estimate_flags() {
        let cli = Cli::try_parse_from([
            "pacific-estimator",
            "estimate",
            "--country",
            "Solomon Islands",
            "--category",
            "multi-unit",
            "--standard",
            "high end",
            "--double-storey",
            "--solar-system",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Estimate(args)) => {
                assert_eq!(
                    args.country,
                    pacific_estimator::estimation::CountryKey::SolomonIslands
                );
                assert!(args.double_storey);
                assert!(args.solar_system);
            }
            other => panic!("expected estimate command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_country() {
        let err = Cli::try_parse_from(["pacific-estimator", "estimate", "--country", "Hawaii"])
            .expect_err("hawaii is not served");
        assert!(err.to_string().contains("unknown country 'Hawaii'"));
    }
}
