//! Dayboard HTTP Server
//!
//! Main entry point: loads configuration, starts the background refresh
//! scheduler and serves the HTTP API until Ctrl+C or SIGTERM.

use std::{sync::Arc, time::Duration};

use application::{
    EventNormalizer, EventQueryService, FeedFetcher, RefreshService,
    ports::{Clock, EventCachePort, SystemClock},
};
use infrastructure::{
    AppConfig, EventCache, IcalFeedAdapter, LogConfig, LogFormat, RefreshScheduler, init_tracing,
};
use integration_ical::FeedClientConfig;
use presentation_http::{create_app, state::AppState};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration; an unusable config is fatal at boot only
    let config = AppConfig::load()?;

    init_tracing(&LogConfig {
        format: LogFormat::from_name(&config.server.log_format),
        filter: None,
    });

    info!("Dayboard v{} starting...", env!("CARGO_PKG_VERSION"));

    config.validate()?;
    let timezone = config.timezone()?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        timezone = %timezone,
        feeds = config.calendar.feeds.len(),
        interval_secs = config.refresh.interval_secs,
        "Configuration loaded"
    );
    if config.calendar.feeds.is_empty() {
        warn!("No calendar feeds configured, every refresh will publish an empty view");
    }

    // Adapters
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cache: Arc<dyn EventCachePort> = Arc::new(EventCache::with_clock(Arc::clone(&clock)));
    let feed_adapter = IcalFeedAdapter::new(FeedClientConfig {
        timeout_secs: config.refresh.fetch_timeout_secs,
        floating_timezone: timezone,
        ..Default::default()
    })?;

    // Services
    let refresh_service = Arc::new(RefreshService::new(
        FeedFetcher::new(Arc::new(feed_adapter), config.refresh.fetch_timeout()),
        EventNormalizer::new(timezone),
        Arc::clone(&cache),
        clock,
        config.calendar.feeds.clone(),
    ));
    let query_service = Arc::new(EventQueryService::new(cache));

    let scheduler =
        RefreshScheduler::new(Arc::clone(&refresh_service), config.refresh.interval()).spawn();

    let state = AppState {
        events: query_service,
        refresh: refresh_service,
        config: Arc::new(config.clone()),
    };
    let app = create_app(state, &config.server);

    // Start server
    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("HTTP server drained, stopping refresh scheduler");
    if tokio::time::timeout(shutdown_timeout, scheduler.stop())
        .await
        .is_err()
    {
        warn!("Refresh scheduler did not stop within {:?}", shutdown_timeout);
    }

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
