//! HTTP API for the age-eligibility service.
//!
//! # Modules
//!
//! - [`age_restrictions`]: Eligibility, seating, tournament start, table closure and venue hours checks
//! - [`error`]: Error type and its mapping to HTTP responses
//! - [`request_id`]: Request correlation middleware
//!
//! # Endpoints Overview
//!
//! ## Age Restrictions
//! - `POST /api/v1/age-restrictions/validate-player-eligibility`
//! - `POST /api/v1/age-restrictions/validate-table-assignment`
//! - `POST /api/v1/age-restrictions/validate-tournament-start`
//! - `POST /api/v1/age-restrictions/validate-table-closure`
//! - `POST /api/v1/age-restrictions/validate-venue-hours`
//!
//! ## Health Check
//! - `GET /health` - Server health status
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use ap_server::{api::{create_router, AppState}, config::ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_router(AppState::new(ServerConfig::default()));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:6970").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively for development. In production, configure
//! appropriate origins, methods, and headers.

pub mod age_restrictions;
pub mod error;
pub mod request_id;

use age_policy::Tournament;
use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use chrono::{DateTime, FixedOffset, Utc};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use error::ApiError;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Venue wall-clock offset, or an internal error when misconfigured
    pub fn venue_offset(&self) -> Result<FixedOffset, ApiError> {
        self.config.venue_offset().ok_or_else(|| {
            ApiError::Internal(format!(
                "venue UTC offset of {} minutes is out of range",
                self.config.venue_utc_offset_minutes
            ))
        })
    }

    /// Evaluation instant on the venue clock: the pinned one when given,
    /// otherwise the server clock.
    ///
    /// Callers may spell an instant in any offset (`Z` included); windows are
    /// compared on venue wall-clock time.
    pub fn now(&self, pinned: Option<DateTime<FixedOffset>>) -> Result<DateTime<FixedOffset>, ApiError> {
        let offset = self.venue_offset()?;
        Ok(match pinned {
            Some(at) => at.with_timezone(&offset),
            None => Utc::now().with_timezone(&offset),
        })
    }

    /// Move the tournament's scheduled start onto the venue clock
    pub fn localize(&self, mut tournament: Tournament) -> Result<Tournament, ApiError> {
        let offset = self.venue_offset()?;
        tournament.start_date = tournament.start_date.map(|at| at.with_timezone(&offset));
        Ok(tournament)
    }
}

/// Create the complete API router with all endpoints and middleware.
///
/// # Endpoint Summary
///
/// ```text
/// GET  /health                                               - Health check
/// POST /api/v1/age-restrictions/validate-player-eligibility  - Registration check
/// POST /api/v1/age-restrictions/validate-table-assignment    - Seating check
/// POST /api/v1/age-restrictions/validate-tournament-start    - Whole-field check
/// POST /api/v1/age-restrictions/validate-table-closure       - Closure impact
/// POST /api/v1/age-restrictions/validate-venue-hours         - Venue window config check
/// ```
pub fn create_router(state: AppState) -> Router {
    let v1_routes = create_v1_router();

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", v1_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route(
            "/age-restrictions/validate-player-eligibility",
            post(age_restrictions::validate_player_eligibility),
        )
        .route(
            "/age-restrictions/validate-table-assignment",
            post(age_restrictions::validate_table_assignment),
        )
        .route(
            "/age-restrictions/validate-tournament-start",
            post(age_restrictions::validate_tournament_start_handler),
        )
        .route(
            "/age-restrictions/validate-table-closure",
            post(age_restrictions::validate_table_closure_handler),
        )
        .route(
            "/age-restrictions/validate-venue-hours",
            post(age_restrictions::validate_venue_hours_handler),
        )
}

/// Health check endpoint for monitoring and load balancers.
///
/// The engine holds no connections, so the service is healthy whenever it
/// answers.
///
/// ```bash
/// curl http://localhost:6970/health
/// # {"status":"healthy","version":"0.1.0","timestamp":"2025-11-22T10:30:00Z"}
/// ```
async fn health_check() -> impl IntoResponse {
    let response = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(response))
}
