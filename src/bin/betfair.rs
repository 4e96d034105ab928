use anyhow::{anyhow, Context, Result};
use betfair_ng::{BetfairClient, Config, Credentials, Operation};
use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "betfair")]
#[command(about = "Betfair Exchange API CLI", long_about = None)]
struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and print the session token
    Login {
        /// Use the username/password endpoint instead of the certificate one
        #[arg(long)]
        interactive: bool,
    },
    /// Extend the configured session
    KeepAlive,
    /// End the configured session
    Logout,
    /// Invoke an API operation with JSON parameters and print the response
    Call {
        /// Operation name, e.g. listEventTypes
        operation: String,
        /// Parameters as a JSON object
        #[arg(default_value = "{}")]
        params: String,
    },
}

fn credentials(config: &Config) -> Result<Credentials> {
    if let Some(credentials) = &config.credentials {
        return Ok(credentials.clone());
    }
    Ok(Credentials {
        username: env::var("BETFAIR_USERNAME").context("BETFAIR_USERNAME not set")?,
        password: env::var("BETFAIR_PASSWORD").context("BETFAIR_PASSWORD not set")?,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::new()?,
    };
    let credentials = credentials(&config);
    let mut client = BetfairClient::new(config)?;

    match cli.command {
        Commands::Login { interactive } => {
            let credentials = credentials?;
            if interactive {
                client
                    .interactive_login(&credentials.username, &credentials.password)
                    .await?;
            } else {
                client
                    .login(&credentials.username, &credentials.password)
                    .await?;
            }
            println!("{}", client.session_token());
        }
        Commands::KeepAlive => {
            client.keep_alive().await?;
            info!("Session extended");
            println!("{}", client.session_token());
        }
        Commands::Logout => {
            client.logout().await?;
            info!("Session closed");
        }
        Commands::Call { operation, params } => {
            let operation: Operation = operation.parse()?;
            let params = serde_json::from_str(&params)
                .map_err(|err| anyhow!("Invalid JSON parameters: {err}"))?;
            let response = client.call(operation, params).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
