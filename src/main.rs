use tokio::net::TcpListener;
use gemini_summarizer::{
    config::Config,
    api::routes::create_router,
    setup_logging,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env may carry RUST_LOG, so load it before the subscriber
    dotenv::dotenv().ok();
    setup_logging();

    let config = Config::load()?;
    let server_addr = config.server_addr;
    if config.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; summarize requests will fail until it is");
    }
    tracing::info!(
        model = %config.model_id,
        strict_method_check = config.strict_method_check,
        max_input_chars = config.max_input_chars,
        "configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let listener = TcpListener::bind(server_addr).await?;
    tracing::info!("Listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
