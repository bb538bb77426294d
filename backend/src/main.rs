use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;

const MIGRATIONS: diesel_async_migrations::EmbeddedMigrations =
    diesel_async_migrations::embed_migrations!("../migrations/");

#[derive(Debug, Parser)]
struct Args {
    /// Address the HTTP server binds to.
    #[clap(long, default_value = "0.0.0.0:3000")]
    listen: String,
}

async fn run_migrations(connection: &mut diesel_async::AsyncPgConnection) {
    MIGRATIONS.run_pending_migrations(connection).await.unwrap();
}

fn logged_target(target: &str) -> bool {
    target.contains("backend") || target.contains("aggregation")
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::filter_fn(|meta| {
            logged_target(meta.target())
        }));
    tracing::subscriber::set_global_default(registry).unwrap();

    tracing::info!("Starting...");

    let store: Arc<dyn backend::storage::MatchStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            tracing::info!("Applying Migrations");
            run_migrations(&mut backend::db_connection(&database_url).await).await;
            tracing::info!("Completed Migrations");

            Arc::new(backend::storage::PgStore::new(database_url))
        }
        Err(_) => {
            tracing::warn!("'DATABASE_URL' is not set, storing matches in memory only");
            Arc::new(backend::storage::MemoryStore::new())
        }
    };

    let default_api_key = std::env::var("PUBG_API_KEY").ok();
    if default_api_key.is_none() {
        tracing::warn!("'PUBG_API_KEY' is not set, requests need to carry their own credential");
    }

    let state = backend::api::AppState {
        store,
        aggregator: Arc::new(aggregation::Aggregator::new()),
        default_api_key,
    };

    let router = axum::Router::new().nest("/api/", backend::api::router(state));

    let listener = tokio::net::TcpListener::bind(&args.listen).await.unwrap();
    tracing::info!("Listening on {}", args.listen);
    axum::serve(listener, router).await.unwrap();
}
