use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coursebook::api::router;
use coursebook::config::{AppConfig, StoreBackend};
use coursebook::state::AppState;
use coursebook::store::{CourseStore, FirestoreHttpClient, InMemoryCourseStore, SqliteCourseStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "coursebook=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;

    let store: Arc<dyn CourseStore> = match config.backend {
        StoreBackend::Memory => {
            info!("using in-memory course store");
            Arc::new(InMemoryCourseStore::new())
        }
        StoreBackend::Sqlite { database_url } => {
            info!("using sqlite course store at {}", database_url);
            Arc::new(SqliteCourseStore::connect(&database_url).await?)
        }
        StoreBackend::Firestore(firestore) => {
            info!(
                "using firestore collection {} in project {}",
                firestore.collection, firestore.project_id
            );
            Arc::new(FirestoreHttpClient::new(firestore)?)
        }
    };

    let app = router(AppState::new(store));

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
