use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lume::{create_router, AppState, AssetStore, Config};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Optional: PORT (default: 3000)");
            eprintln!("Optional: LUME_ICONS_DIR (default: public/icons)");
            eprintln!("Optional: LUME_PUBLIC_DIR (default: public)");
            std::process::exit(1);
        }
    };

    tracing::info!("Starting Lume icon explorer");
    tracing::info!("Listen address: {}", config.listen_addr);
    tracing::info!("Icons directory: {}", config.icons_dir.display());
    tracing::info!("Public directory: {}", config.public_dir.display());

    let state = AppState::new(AssetStore::new(&config.icons_dir), &config.public_dir);
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running at http://{}", config.listen_addr);

    axum::serve(listener, app).await.expect("Server error");
}
