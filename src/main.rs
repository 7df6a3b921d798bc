//! Sento API server.

use std::sync::Arc;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sento::adapters::ai::{AnthropicConfig, AnthropicProvider};
use sento::adapters::http::{api_router, AppState};
use sento::adapters::postgres::{
    PostgresAnalyticsRepository, PostgresProfileRepository, PostgresWebsiteRepository,
};
use sento::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use sento::config::AppConfig;
use sento::ports::AIProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let ai_provider: Option<Arc<dyn AIProvider>> = match config.ai.api_key() {
        Some(key) => {
            let mut anthropic = AnthropicConfig::new(key)
                .with_model(config.ai.model.clone())
                .with_timeout(config.ai.timeout())
                .with_default_max_tokens(config.ai.max_tokens);
            if let Some(url) = &config.ai.base_url {
                anthropic = anthropic.with_base_url(url.clone());
            }
            Some(Arc::new(AnthropicProvider::new(anthropic)?))
        }
        None => {
            tracing::warn!("No Anthropic API key configured; generation requests will fail");
            None
        }
    };

    let mut stripe = StripeConfig::new(
        config.payment.stripe_secret_key.clone(),
        config.payment.stripe_webhook_secret.clone(),
    );
    if let Some(url) = &config.payment.stripe_base_url {
        stripe = stripe.with_base_url(url.clone());
    }
    if !stripe.has_api_key() {
        tracing::warn!("No Stripe secret key configured; checkout requests will fail");
    }

    let state = AppState {
        profiles: Arc::new(PostgresProfileRepository::new(pool.clone())),
        websites: Arc::new(PostgresWebsiteRepository::new(pool.clone())),
        analytics: Arc::new(PostgresAnalyticsRepository::new(pool)),
        ai_provider,
        payment_provider: Arc::new(StripePaymentAdapter::new(stripe)?),
        generation: config.ai.generation_settings(),
        prices: config.payment.price_table(),
        checkout_urls: config.payment.checkout_urls(),
    };

    let app = api_router(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        test_mode = config.payment.is_test_mode(),
        "Sento listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().pretty()).init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
