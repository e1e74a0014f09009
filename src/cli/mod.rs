use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod auth;
pub mod generate;
pub mod serve;

use crate::core::{AppConfig, init_tracing};
use crate::mailer::SenderKind;

#[derive(Subcommand)]
enum Command {
    /// Run the API server and web UI
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, env = "PORT", default_value = "3001")]
        port: String,

        /// Override the mail sender picked by MAIL_SENDER
        #[arg(long, value_enum)]
        sender: Option<SenderKind>,
    },
    /// Perform the Gmail OAuth consent flow and print the tokens
    Auth {},
    /// Draft a single email from the command line
    Generate(generate::GenerateArgs),
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    init_tracing();
    let mut config = AppConfig::from_env()?;

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port, sender }) => {
            if let Some(sender) = sender {
                config.mail_sender = sender;
            }
            serve::run(host, port, config).await?;
        }
        Some(Command::Auth {}) => {
            auth::run(&config).await?;
        }
        Some(Command::Generate(generate_args)) => {
            generate::run(generate_args, &config).await?;
        }
        None => {}
    }

    Ok(())
}
