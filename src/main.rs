use chrono::Utc;
use clap::Parser;
use market_brief::cli::{Cli, Command};
use market_brief::config::Config;
use market_brief::dates::TradingDayResult;
use market_brief::error::ErrorResponse;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    market_brief::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            eprintln!("{}", serde_json::to_string(&ErrorResponse::from(e))?);
            std::process::exit(2);
        }
    };

    match cli.action() {
        Command::Serve => market_brief::serve(config).await?,
        Command::Once => {
            let response = market_brief::run_once(&config).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            if !response.is_success() {
                std::process::exit(1);
            }
        }
        Command::Dates { date } => {
            let day = date.unwrap_or_else(|| Utc::now().with_timezone(&config.timezone).date_naive());
            println!(
                "{}",
                serde_json::to_string_pretty(&TradingDayResult::for_date(day))?
            );
        }
    }

    Ok(())
}
