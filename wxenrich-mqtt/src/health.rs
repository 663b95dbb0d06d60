//! Liveness heartbeat and HTTP healthcheck endpoint
//!
//! The bridge marks the heartbeat alive after every successful
//! enrich-and-publish. The endpoint reports 200 while the last heartbeat is
//! younger than the configured healthy interval, 503 otherwise (including
//! before the first message arrives). Container orchestrators poll this to
//! restart a daemon whose broker subscription has silently died.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tracing::info;

/// Shared last-alive tracker
#[derive(Debug, Clone)]
pub struct Heartbeat {
    inner: Arc<Mutex<Option<Instant>>>,
    threshold: Duration,
}

impl Heartbeat {
    /// New heartbeat that reports healthy for `threshold` after each beat
    pub fn new(threshold: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
            threshold,
        }
    }

    /// Record that the pipeline just did useful work
    pub fn mark_alive(&self) {
        let mut last = self.inner.lock().expect("heartbeat lock poisoned");
        *last = Some(Instant::now());
    }

    /// Whether the last beat is within the healthy threshold
    pub fn is_healthy(&self) -> bool {
        let last = self.inner.lock().expect("heartbeat lock poisoned");
        match *last {
            Some(at) => at.elapsed() <= self.threshold,
            None => false,
        }
    }
}

async fn health_handler(State(hb): State<Heartbeat>) -> StatusCode {
    if hb.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// Serve `GET /health` on the given port until the process exits
pub async fn serve(heartbeat: Heartbeat, port: u16) -> std::io::Result<()> {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(heartbeat);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "health endpoint listening");
    axum::serve(listener, app).await
}
