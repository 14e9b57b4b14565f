use axum::routing::{get, post, put};
use axum::Router;

use checkin_application::AppState;

use crate::handlers::{
    event_handlers, history_handlers, ops_handlers, participant_handlers, scan_handlers,
    session_handlers,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/events",
            get(event_handlers::list_events).post(event_handlers::create_event),
        )
        .route(
            "/v1/events/:event_id",
            get(event_handlers::get_event).put(event_handlers::update_event),
        )
        .route(
            "/v1/events/:event_id/participants",
            get(participant_handlers::list_participants)
                .delete(participant_handlers::purge_participants),
        )
        .route(
            "/v1/events/:event_id/participants/import",
            post(participant_handlers::import_participants),
        )
        .route(
            "/v1/events/:event_id/check-ins",
            get(history_handlers::list_check_ins),
        )
        .route(
            "/v1/session",
            get(session_handlers::get_session).put(session_handlers::select_event),
        )
        .route(
            "/v1/session/scanner",
            put(session_handlers::set_scanner).delete(session_handlers::clear_scanner),
        )
        .route("/v1/scan", post(scan_handlers::scan))
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route("/v1/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
