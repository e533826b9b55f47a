use games_catalog::lambda::run_lambda;
use games_catalog::{CatalogConfig, CatalogHandler, PgGameRepository, S3ImageStore};
use lambda_http::{Error, tracing};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = CatalogConfig::load()?;
    tracing::info!("Loaded configuration: {:?}", config);

    let repository = PgGameRepository::new(config.database_url.clone());
    let images = S3ImageStore::from_config(&config).await;
    let handler = CatalogHandler::new(repository, images);

    run_lambda(handler).await
}
