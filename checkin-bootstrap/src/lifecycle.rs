use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use checkin_application::commands::check_in_commands;
use checkin_application::ops::{run_scan_session, ScanLoop, ScanSessionEnd};
use checkin_application::AppState;
use checkin_infrastructure::LineFrameSource;
use checkin_interfaces_http::build_router;

use crate::context::AppContext;

fn build_router_with_layers(state: AppState) -> Router {
    build_router(state.clone())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(
            usize::try_from(state.config.max_body_bytes).unwrap_or(usize::MAX),
        ))
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(
            state.config.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http())
}

pub async fn run_standalone() -> Result<()> {
    let context = AppContext::new().await?;
    let state = context.state;

    let app = build_router_with_layers(state.clone());
    let addr: std::net::SocketAddr = state.config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Scans badges read from stdin until it closes, the decode timeout expires
/// or the process is asked to stop. One JSON result per line on stdout.
pub async fn run_scan_stdin() -> Result<()> {
    let context = AppContext::new().await?;
    let state = context.state;

    let scan_context = check_in_commands::resolve_scan_context(&state).await?;
    info!(
        event_id = %scan_context.event.id,
        event = %scan_context.event.name,
        scanner = %scan_context.scanner.name,
        "scanning from stdin"
    );

    let scan_loop = ScanLoop::from_config(Arc::new(LineFrameSource::stdin()), &state.config);
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = stop_tx.send(true);
    });

    let end = run_scan_session(&state, &scan_loop, stop_rx, |result| match result {
        Ok(result) => match serde_json::to_string(&result) {
            Ok(line) => println!("{}", line),
            Err(err) => warn!("scan result encoding failed: {}", err),
        },
        Err(err) => warn!("scan failed: {}", err),
    })
    .await;

    if end == ScanSessionEnd::TimedOut {
        warn!("no badge decoded before the scan timeout, stopping");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("sigterm handler unavailable: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
