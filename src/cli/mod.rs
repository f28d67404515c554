pub mod backup;
pub mod server;
pub mod submit;

use inscription::config::Config;

pub async fn migrate(config: Config) -> anyhow::Result<()> {
    let pool = inscription::db::create_pool(&config.database.url, 1).await?;
    inscription_db::migrate(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations applied to {}", config.database.url);

    Ok(())
}
