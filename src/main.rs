use anyhow::Result;
use tracing::{error, info};

use vk_rss::{Config, WallFeed};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = Config::from_env()?;
    info!("Starting VK wall to RSS for {}", config.domain);

    let feed = WallFeed::new(config)?;

    match feed.render().await {
        Ok(document) => {
            println!("{document}");
            Ok(())
        }
        Err(e) => {
            error!("Failed to build feed: {}", e);
            Err(e.into())
        }
    }
}
