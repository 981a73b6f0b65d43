use clap::{Args, Parser, Subcommand};
use pre_analise::error::AppError;

use crate::demo::{run_demo, run_validar, DemoArgs, ValidarArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Pre-Analise de Credito",
    about = "Run the credit pre-analysis workflow service from the command line",
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
    /// Run an end-to-end demo: eligibility, batch validation, final decision
    Demo(DemoArgs),
    /// Validate local XML/REM files and print the batch summary
    Validar(ValidarArgs),
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
        Command::Demo(args) => run_demo(args),
        Command::Validar(args) => run_validar(args),
    }
}
