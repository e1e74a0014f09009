use anyhow::Result;
use mailsmith::cli;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine, the environment may already be set
    dotenvy::dotenv().ok();
    cli::run().await
}
