//! Readiness probe.

/// `GET /api/healthz` — plain-text liveness check.
pub async fn healthz() -> &'static str {
    "OK"
}
