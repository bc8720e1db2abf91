//! Health check endpoint

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use deadpool_postgres::Pool;
use serde::Serialize;

/// Connection pool occupancy
#[derive(Serialize)]
pub struct PoolStatus {
    size: usize,
    available: usize,
    waiting: usize,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    pool: PoolStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// GET /health - Probe the database and report pool occupancy
pub async fn check(State(pool): State<Pool>) -> impl IntoResponse {
    let probe = match pool.get().await {
        Ok(client) => client
            .query_one("SELECT 1", &[])
            .await
            .map(|_| ())
            .map_err(|e| format!("Database query failed: {}", e)),
        Err(e) => Err(format!("Database connection failed: {}", e)),
    };

    let status = pool.status();
    let pool_status = PoolStatus {
        size: status.size,
        available: status.available,
        waiting: status.waiting,
    };

    match probe {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                pool: pool_status,
                reason: None,
            }),
        ),
        Err(reason) => {
            tracing::error!(reason = %reason, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    pool: pool_status,
                    reason: Some(reason),
                }),
            )
        }
    }
}
