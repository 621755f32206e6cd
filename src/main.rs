use quickquotes::{app, db, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quickquotes=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load();
    let db_pool = db::connect(&config.database_url).await?;
    let app = app(db_pool, &config);

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    tracing::info!("listening on {}", config.addr);
    axum::serve(listener, app).await?;

    Ok(())
}
