//! Age restriction API handlers.
//!
//! Thin JSON wrappers around the `age_policy` checks:
//! - Player registration eligibility
//! - Table seating
//! - Tournament start with the whole field
//! - Table closure impact
//! - Venue window configuration
//!
//! Every check answers `200 OK` with `{ "success": true, "validation": ... }`,
//! including refusals. Malformed input answers `400`, oversized batches `413`.
//!
//! # Examples
//!
//! ```bash
//! curl -X POST http://localhost:6970/api/v1/age-restrictions/validate-player-eligibility \
//!   -H "Content-Type: application/json" \
//!   -d '{"player": {"id": "p1", "ageGroup": "UNDER_18"},
//!        "tournament": {"id": "t1", "isAgeRestricted": true, "venueId": "v1"},
//!        "venue": {"id": "v1", "ageRestriction": "NO_MINORS_AGE_GATE"}}'
//! ```

use age_policy::{
    AgeOverride, EligibilityResult, EligibilityVerdict, HoursIssue, Player, Table, Tournament, Venue,
    validate_player_table_assignment, validate_player_tournament_eligibility, validate_table_closure,
    validate_tournament_start, validate_venue_hours,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{AppState, error::ApiError, request_id::RequestId};
use crate::{logging, metrics};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEligibilityRequest {
    pub player: Player,
    pub tournament: Tournament,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub age_overrides: Vec<AgeOverride>,
    /// Pins the evaluation instant; the server clock is used when absent.
    /// Any offset is accepted and read on the venue clock.
    #[serde(default)]
    pub evaluated_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableAssignmentRequest {
    pub player: Player,
    pub table: Table,
    pub venue: Venue,
    pub tournament: Tournament,
    #[serde(default)]
    pub age_overrides: Vec<AgeOverride>,
    #[serde(default)]
    pub evaluated_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentStartRequest {
    pub tournament: Tournament,
    pub players: Vec<Player>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub age_overrides: Vec<AgeOverride>,
    #[serde(default)]
    pub evaluated_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableClosureRequest {
    pub table_to_close: Table,
    #[serde(default)]
    pub remaining_tables: Vec<Table>,
    #[serde(default)]
    pub active_players: Vec<Player>,
    #[serde(default)]
    pub venue: Option<Venue>,
    pub tournament: Tournament,
    #[serde(default)]
    pub age_overrides: Vec<AgeOverride>,
    #[serde(default)]
    pub evaluated_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Deserialize)]
pub struct VenueHoursRequest {
    pub venue: Venue,
}

/// Successful check, refusals included
#[derive(Debug, Serialize)]
pub struct ValidationResponse<T> {
    pub success: bool,
    pub validation: T,
    /// Human-readable violations and warnings, for display as-is
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct IssueView {
    #[serde(flatten)]
    pub issue: HoursIssue,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HoursReport {
    pub valid: bool,
    pub issues: Vec<IssueView>,
}

type VerdictResponse = Result<Json<ValidationResponse<EligibilityVerdict>>, ApiError>;

fn check_batch(what: &'static str, count: usize, limit: usize) -> Result<(), ApiError> {
    if count > limit {
        return Err(ApiError::BatchTooLarge { what, count, limit });
    }
    Ok(())
}

/// Log, count and wrap the outcome of one check
fn respond(operation: &str, request_id: &RequestId, result: EligibilityResult<EligibilityVerdict>) -> VerdictResponse {
    match result {
        Ok(verdict) => {
            let mut messages: Vec<String> = verdict.violations().map(ToString::to_string).collect();
            messages.extend(verdict.warnings.iter().map(ToString::to_string));
            messages.extend(verdict.input_errors.iter().map(|e| e.message.clone()));

            logging::log_verdict(operation, request_id.as_str(), verdict.allowed, verdict.violations().count());
            metrics::eligibility_verdicts_total(operation, verdict.allowed);
            Ok(Json(ValidationResponse {
                success: true,
                validation: verdict,
                messages,
            }))
        }
        Err(e) => Err(rejected(operation, request_id, e.into())),
    }
}

fn rejected(operation: &str, request_id: &RequestId, err: ApiError) -> ApiError {
    logging::log_input_error(operation, request_id.as_str(), &err.to_string());
    metrics::input_errors_total(operation, err.code());
    err
}

/// Check whether a player may register for a tournament.
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body or invalid input (e.g. limited-hours venue without a minors window)
pub async fn validate_player_eligibility(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<PlayerEligibilityRequest>, JsonRejection>,
) -> VerdictResponse {
    const OP: &str = "validate-player-eligibility";
    let Json(req) = payload.map_err(|e| rejected(OP, &request_id, e.into()))?;
    let now = state.now(req.evaluated_at)?;
    let tournament = state.localize(req.tournament)?;

    respond(
        OP,
        &request_id,
        validate_player_tournament_eligibility(&req.player, &tournament, req.venue.as_ref(), &req.age_overrides, now),
    )
}

/// Check whether a player may be seated at a table.
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body or invalid input
pub async fn validate_table_assignment(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<TableAssignmentRequest>, JsonRejection>,
) -> VerdictResponse {
    const OP: &str = "validate-table-assignment";
    let Json(req) = payload.map_err(|e| rejected(OP, &request_id, e.into()))?;
    let now = state.now(req.evaluated_at)?;
    let tournament = state.localize(req.tournament)?;

    respond(
        OP,
        &request_id,
        validate_player_table_assignment(
            &req.player,
            &req.table,
            Some(&req.venue),
            &tournament,
            &req.age_overrides,
            now,
        ),
    )
}

/// Check whether a tournament may start with its registered players and tables.
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body, invalid tournament or venue
/// - `413 Payload Too Large`: More players or tables than configured
pub async fn validate_tournament_start_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<TournamentStartRequest>, JsonRejection>,
) -> VerdictResponse {
    const OP: &str = "validate-tournament-start";
    let Json(req) = payload.map_err(|e| rejected(OP, &request_id, e.into()))?;
    check_batch("players", req.players.len(), state.config.max_batch_players)
        .and_then(|_| check_batch("tables", req.tables.len(), state.config.max_batch_tables))
        .map_err(|e| rejected(OP, &request_id, e))?;
    let now = state.now(req.evaluated_at)?;
    let tournament = state.localize(req.tournament)?;

    metrics::batch_players(req.players.len());
    respond(
        OP,
        &request_id,
        validate_tournament_start(
            &tournament,
            &req.players,
            &req.tables,
            req.venue.as_ref(),
            &req.age_overrides,
            now,
        ),
    )
}

/// Report players left without an admissible table if a table closes.
///
/// Never refuses the closure; affected players come back as warnings.
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body or invalid input
/// - `413 Payload Too Large`: More players or tables than configured
pub async fn validate_table_closure_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<TableClosureRequest>, JsonRejection>,
) -> VerdictResponse {
    const OP: &str = "validate-table-closure";
    let Json(req) = payload.map_err(|e| rejected(OP, &request_id, e.into()))?;
    check_batch("players", req.active_players.len(), state.config.max_batch_players)
        .and_then(|_| check_batch("tables", req.remaining_tables.len(), state.config.max_batch_tables))
        .map_err(|e| rejected(OP, &request_id, e))?;
    let now = state.now(req.evaluated_at)?;
    let tournament = state.localize(req.tournament)?;

    respond(
        OP,
        &request_id,
        validate_table_closure(
            &req.table_to_close,
            &req.remaining_tables,
            &req.active_players,
            req.venue.as_ref(),
            &tournament,
            &req.age_overrides,
            now,
        ),
    )
}

/// Check a venue's time windows before saving them.
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body (including times not in `HH:MM` form)
pub async fn validate_venue_hours_handler(
    request_id: RequestId,
    payload: Result<Json<VenueHoursRequest>, JsonRejection>,
) -> Result<Json<ValidationResponse<HoursReport>>, ApiError> {
    const OP: &str = "validate-venue-hours";
    let Json(req) = payload.map_err(|e| rejected(OP, &request_id, e.into()))?;

    let issues: Vec<IssueView> = validate_venue_hours(&req.venue)
        .into_iter()
        .map(|issue| IssueView {
            message: issue.to_string(),
            issue,
        })
        .collect();
    let valid = issues.is_empty();

    logging::log_verdict(OP, request_id.as_str(), valid, issues.len());
    metrics::eligibility_verdicts_total(OP, valid);
    Ok(Json(ValidationResponse {
        success: true,
        messages: issues.iter().map(|i| i.message.clone()).collect(),
        validation: HoursReport { valid, issues },
    }))
}
