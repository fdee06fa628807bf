use crate::server;
use clap::{Args, Parser, Subcommand};
use onboarding::config::AppConfig;
use onboarding::error::AppError;
use onboarding::OnboardingGateway;

#[derive(Parser, Debug)]
#[command(
    name = "Onboarding Gateway",
    about = "Broker Incode identity-verification sessions for a frontend",
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
    /// Open a single verification session and print it as JSON
    Session(SessionArgs),
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

#[derive(Args, Debug, Default)]
pub(crate) struct SessionArgs {
    /// Also request the hosted onboarding URL for the new session
    #[arg(long)]
    pub(crate) with_url: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Session(args) => run_session(args).await,
    }
}

async fn run_session(args: SessionArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let gateway = OnboardingGateway::from_config(&config.provider)?;

    let rendered = if args.with_url {
        serde_json::to_string_pretty(&gateway.create_session_with_onboarding_url().await)?
    } else {
        serde_json::to_string_pretty(&gateway.start_session().await)?
    };
    println!("{rendered}");
    Ok(())
}
