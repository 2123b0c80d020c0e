use bookstore::config::Config;
use bookstore::database::{DefaultAuthorRepository, establish_pool};
use bookstore::services::AuthorService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    let pool = establish_pool(config.database_url(), config.max_connections()).await?;
    let author_service = AuthorService::new(DefaultAuthorRepository::new(pool));

    let authors = author_service.get_authors().await?;
    tracing::info!(
        database = config.database_url(),
        authors = authors.len(),
        "bookstore database ready"
    );

    Ok(())
}
