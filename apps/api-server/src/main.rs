//! # WasteSmart API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod background;
mod config;
mod handlers;
mod middleware;
mod state;

use background::Scheduler;
use config::AppConfig;
use middleware::rate_limit::RateLimitMiddleware;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!(
        "Starting WasteSmart API Server on {}:{} ({})",
        config.host,
        config.port,
        config.environment
    );

    // Build application state
    let state = AppState::new(&config.environment);

    // Expired rate limit windows are swept once per window length.
    let scheduler = start_sweeper(&state).await;
    if scheduler.is_none() {
        tracing::warn!("Scheduler unavailable; rate limit windows will not be garbage collected");
    }

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RateLimitMiddleware::new(state.rate_limiter()))
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

/// Register and start the limiter sweep job. Housekeeping only: the
/// limiter stays correct without it, so scheduler failures are logged
/// rather than fatal.
async fn start_sweeper(state: &AppState) -> Option<Scheduler> {
    let scheduler = match Scheduler::new().await {
        Ok(scheduler) => scheduler,
        Err(err) => {
            tracing::error!("Failed to create scheduler: {}", err);
            return None;
        }
    };

    let limiter = state.limiter.clone();
    let interval = limiter.window_duration();
    let register = scheduler
        .add_repeated(interval, move || {
            let limiter = limiter.clone();
            async move {
                limiter.sweep_expired().await;
            }
        })
        .await;

    if let Err(err) = register {
        tracing::error!("Failed to register sweep job: {}", err);
        return None;
    }

    if let Err(err) = scheduler.start().await {
        tracing::error!("Failed to start scheduler: {}", err);
        return None;
    }

    Some(scheduler)
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,wastesmart_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
