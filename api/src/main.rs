//! VPCBlocks API server

use vpcblocks_api::{build_router, ApiState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vpcblocks_api=debug,tower_http=info".into()),
        )
        .init();

    let addr = std::env::var("VPCBLOCKS_ADDR").unwrap_or_else(|_| "0.0.0.0:8087".to_string());
    let app = build_router(ApiState::default());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
