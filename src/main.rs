use clipforge::config::settings::AppConfig;
use clipforge::infrastructure::scratch::ScratchArea;
use clipforge::state::AppState;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting server...");

    let config = AppConfig::from_env();
    let scratch = ScratchArea::init(config.scratch_dir.clone()).await?;
    let state = AppState::new(config.clone(), scratch);

    let app = clipforge::app::create_app(state).await;

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
