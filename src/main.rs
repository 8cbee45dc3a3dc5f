use std::net::SocketAddr;
use std::sync::Arc;
use survey_studio::{AppConfig, AppState, MongoSurveyStore, OpenAiGenerator, api_routes, build_cors_layer};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let args: Vec<String> = std::env::args().collect();
    let port: u16 = args
        .iter()
        .position(|a| a == "--port" || a == "-p")
        .and_then(|i| args.get(i + 1))
        .and_then(|p| p.parse().ok())
        .unwrap_or(config.port);

    let store = MongoSurveyStore::connect(&config.mongodb_uri, &config.db_name).await?;
    let generator = OpenAiGenerator::new(config.generator.clone())?;
    let state = AppState::new(Arc::new(store), Arc::new(generator));

    let app = Router::new().nest("/api", api_routes()).layer(build_cors_layer()).with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("survey-studio listening on http://{}", addr);
    tracing::info!(db = %config.db_name, model = %config.generator.model, "backends configured");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
