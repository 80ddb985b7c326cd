//! Webhook receiver

use std::{
    sync::Arc,
    time::Duration,
};

use axum::{
    extract::{
        DefaultBodyLimit,
        FromRequest,
        Multipart,
        Request,
        State,
    },
    http::{
        header,
        StatusCode,
    },
    routing::{
        get,
        post,
    },
    Router,
};
use plex_scrobbler_services::{
    classify,
    forward,
    Ack,
    Classification,
    RawTrack,
    Scrobbler,
};
use tower_http::trace::TraceLayer;
use tracing::{
    debug,
    error,
    warn,
};

pub(crate) const WEBHOOK_PATH: &str = "/plex_scrobble";

/// Webhook deliveries can carry a thumbnail alongside the payload
const MAX_BODY: usize = 16 * 1024 * 1024;

type Reply = (StatusCode, &'static str);


#[derive(Clone)]
pub(crate) struct AppState {
    pub scrobbler: Arc<dyn Scrobbler>,
    pub submit_timeout: Duration,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(webhook))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Reply { (StatusCode::OK, "OK") }

async fn webhook(State(state): State<AppState>, request: Request) -> Reply {
    let payload = match read_payload(request).await {
        Ok(payload) => payload,
        Err(reply) => return reply,
    };

    let classification = classify(&payload);
    let ack = classification.ack();
    match classification {
        Classification::Proceed(raw) => submit(&state, raw).await,
        Classification::IgnoredEventType(event) => debug!("Ignoring {event} event"),
        Classification::IgnoredMediaType(kind) => debug!("Ignoring {} media", kind.as_deref().unwrap_or("untyped")),
        Classification::Malformed(reason) => warn!("Rejecting webhook: {reason}"),
    }

    let status = match ack {
        Ack::Accepted(_) => StatusCode::OK,
        Ack::Rejected(_) => StatusCode::BAD_REQUEST,
    };
    (status, ack.message())
}

/// Plex posts `multipart/form-data` with the JSON document in its `payload` part. Any other body
/// is taken to be the document itself.
async fn read_payload(request: Request) -> Result<String, Reply> {
    const BAD_BODY: Reply = (StatusCode::BAD_REQUEST, "Invalid request body");

    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));
    if !is_multipart {
        return String::from_request(request, &()).await.map_err(|e| {
            warn!("Unreadable webhook body: {e}");
            BAD_BODY
        });
    }

    let mut multipart = Multipart::from_request(request, &()).await.map_err(|e| {
        warn!("Unreadable multipart body: {e}");
        BAD_BODY
    })?;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("payload") => {
                return field.text().await.map_err(|e| {
                    warn!("Unreadable payload field: {e}");
                    BAD_BODY
                });
            },
            Ok(Some(_)) => continue,
            Ok(None) => return Err((StatusCode::BAD_REQUEST, "No payload found")),
            Err(e) => {
                warn!("Unreadable multipart body: {e}");
                return Err(BAD_BODY);
            },
        }
    }
}

/// Runs the blocking submission off the async workers, bounded by the configured timeout.
/// The outcome only matters to the logs.
async fn submit(state: &AppState, raw: RawTrack) {
    let scrobbler = Arc::clone(&state.scrobbler);
    let task = tokio::task::spawn_blocking(move || forward(&raw, scrobbler.as_ref()));

    match tokio::time::timeout(state.submit_timeout, task).await {
        Ok(Ok(_)) => {},
        Ok(Err(e)) => error!("-> Scrobble task failed: {e}"),
        Err(_) => error!("-> Scrobble timed out after {:?} ({})", state.submit_timeout, state.scrobbler.name()),
    }
}
