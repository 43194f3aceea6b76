use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};
use twitter_lookup::{config::API_BASE_URL_VAR, Credentials, TwitterClient};

#[derive(Debug, Parser)]
#[command(version, about = "Look up Twitter users and tweets in batches of 100")]
struct Cli {
    /// API host to talk to.
    #[arg(long, env = API_BASE_URL_VAR, default_value = twitter_lookup::twitter::TWITTER_API_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the users behind the given screen names.
    Users {
        #[arg(required = true)]
        screen_names: Vec<String>,
    },
    /// Print the tweets with the given ids.
    Tweets {
        #[arg(required = true)]
        ids: Vec<u64>,
    },
    /// Print the expanded URLs of each of the given tweets.
    Urls {
        #[arg(required = true)]
        ids: Vec<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let credentials = Credentials::from_env().context("loading Twitter credentials")?;
    let twitter = TwitterClient::new(&credentials)?.with_base_url(cli.base_url);

    let output = match cli.command {
        Command::Users { screen_names } => {
            let users = twitter.fetch_users(&screen_names).await?;
            tracing::info!(requested = screen_names.len(), found = users.len(), "fetched users");

            serde_json::to_value(users)?
        }
        Command::Tweets { ids } => {
            let tweets = twitter.fetch_tweets(&ids).await?;
            tracing::info!(requested = ids.len(), found = tweets.len(), "fetched tweets");

            serde_json::to_value(tweets)?
        }
        Command::Urls { ids } => {
            let tweets = twitter.fetch_tweets(&ids).await?;
            tracing::info!(requested = ids.len(), found = tweets.len(), "fetched tweets");

            tweets
                .iter()
                .map(|tweet| json!({ "id": tweet.id(), "urls": tweet.urls() }))
                .collect()
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
