use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tour_server::catalog::Catalog;
use tour_server::config::AppConfig;
use tour_server::preferences::{MemoryPreferenceStore, Neo4jPreferenceStore, PreferenceStore};
use tour_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tour_server=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path),
        None => Catalog::builtin(),
    };
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to load catalog: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(cities = ?catalog.city_names(), "Loaded catalog");

    let store: Arc<dyn PreferenceStore> = match config.neo4j.clone() {
        Some(neo4j) => {
            info!(uri = %neo4j.uri, database = %neo4j.database, "Using Neo4j preference store");
            match Neo4jPreferenceStore::new(neo4j) {
                Ok(store) => Arc::new(store),
                Err(e) => {
                    error!("Failed to create Neo4j client: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        None => {
            warn!("NEO4J_URI not set; preferences are kept in memory only");
            Arc::new(MemoryPreferenceStore::new(&config.memory_store))
        }
    };

    let state = AppState::with_store(catalog, store);
    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, "Failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("One-Day Tour Planner listening on http://{}", config.bind_addr);
    info!("API endpoints:");
    info!("  GET  /health                - Health check");
    info!("  GET  /api/cities            - Supported cities and interests");
    info!("  POST /collect_preferences   - Save preferences");
    info!("  GET  /preferences/:user_id  - Stored preferences");
    info!("  POST /generate_itinerary    - Filter by interests and budget");
    info!("  POST /optimize_itinerary    - Closest-first within budget");
    info!("  POST /api/optimize          - Optimize raw stops");

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
