//! Binding restriction resolution.
//!
//! Precedence, highest first:
//!
//! 1. tournament not age restricted: nothing applies
//! 2. tournament uniform restriction
//! 3. the table's own restriction
//! 4. the venue policy
//! 5. nothing configured: nothing applies

use log::debug;
use serde::{Deserialize, Serialize};

use super::window::{TimeWindow, WindowStatus};
use crate::{
    eligibility::EligibilityError,
    model::{ClockTime, RestrictionKind, Table, Tournament, Venue},
};

/// Where the binding restriction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RestrictionScope {
    /// Tournament master switch is off
    Tournament,
    TournamentUniform,
    Table,
    Venue,
    /// No venue, table or uniform rule to evaluate
    Unconfigured,
}

/// A venue window and its state at the evaluation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowCheck {
    pub window: TimeWindow,
    pub status: WindowStatus,
}

impl WindowCheck {
    /// Window not consulted for this restriction
    pub fn unconsulted() -> Self {
        Self {
            window: TimeWindow::new(None, None),
            status: WindowStatus::NotConfigured,
        }
    }

    fn evaluate(window: TimeWindow, at: ClockTime) -> Self {
        Self {
            window,
            status: window.status(at),
        }
    }
}

/// The single restriction that decides admission at a point of access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRestriction {
    pub kind: RestrictionKind,
    pub scope: RestrictionScope,
    /// Minors window state for time-gated policies, `true` otherwise
    pub is_active_now: bool,
    pub minors: WindowCheck,
    pub ages_18_to_20: WindowCheck,
}

impl ResolvedRestriction {
    fn untimed(kind: RestrictionKind, scope: RestrictionScope) -> Self {
        Self {
            kind,
            scope,
            is_active_now: true,
            minors: WindowCheck::unconsulted(),
            ages_18_to_20: WindowCheck::unconsulted(),
        }
    }

    fn from_venue(venue: &Venue, at: ClockTime) -> Self {
        let minors = if venue.age_restriction.requires_minors_window() {
            WindowCheck::evaluate(venue.minors_window(), at)
        } else {
            WindowCheck::unconsulted()
        };
        let is_active_now = if venue.age_restriction.requires_minors_window() {
            minors.status == WindowStatus::Open
        } else {
            true
        };

        Self {
            kind: RestrictionKind::Venue(venue.age_restriction),
            scope: RestrictionScope::Venue,
            is_active_now,
            minors,
            ages_18_to_20: WindowCheck::evaluate(venue.ages_18_to_20_window(), at),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.kind == RestrictionKind::Unrestricted
    }
}

/// Resolve the restriction binding `table` (or the tournament as a whole when
/// `table` is `None`) at venue wall-clock time `at`.
///
/// # Errors
///
/// - `MissingUniformRestriction` when the tournament asks for a uniform rule
///   without providing one
/// - `MissingVenue` when a table without its own restriction needs venue
///   policy and no venue was supplied
/// - `VenueMismatch` when the venue is not the table's or tournament's venue
/// - `MissingMinorsWindow` when a limited-hours venue policy binds without a
///   configured minors window
pub fn resolve_binding_restriction(
    tournament: &Tournament,
    venue: Option<&Venue>,
    table: Option<&Table>,
    at: ClockTime,
) -> Result<ResolvedRestriction, EligibilityError> {
    if !tournament.is_age_restricted {
        return Ok(ResolvedRestriction::untimed(
            RestrictionKind::Unrestricted,
            RestrictionScope::Tournament,
        ));
    }

    if tournament.use_uniform_age_restriction {
        let uniform = tournament.uniform_age_restriction.ok_or_else(|| {
            EligibilityError::MissingUniformRestriction {
                tournament_id: tournament.id.clone(),
            }
        })?;
        return Ok(ResolvedRestriction::untimed(
            RestrictionKind::Table(uniform),
            RestrictionScope::TournamentUniform,
        ));
    }

    if let Some(venue) = venue {
        check_venue_matches(tournament, venue, table)?;
    }

    if let Some(table) = table {
        let venue_for_all = venue.is_some_and(|v| v.use_venue_age_for_all_tables);
        if let Some(restriction) = table.age_restriction {
            // An explicit table restriction binds even when the venue asks for
            // its policy on all tables.
            if venue_for_all {
                debug!(
                    "table {} restriction {} overrides venue-wide policy",
                    table.id, restriction
                );
            }
            return Ok(ResolvedRestriction::untimed(
                RestrictionKind::Table(restriction),
                RestrictionScope::Table,
            ));
        }
    }

    match (venue, table) {
        (Some(venue), _) => {
            venue.validate()?;
            Ok(ResolvedRestriction::from_venue(venue, at))
        }
        (None, Some(table)) => Err(EligibilityError::MissingVenue {
            table_id: table.id.clone(),
        }),
        (None, None) => Ok(ResolvedRestriction::untimed(
            RestrictionKind::Unrestricted,
            RestrictionScope::Unconfigured,
        )),
    }
}

fn check_venue_matches(
    tournament: &Tournament,
    venue: &Venue,
    table: Option<&Table>,
) -> Result<(), EligibilityError> {
    let expected = tournament
        .venue_id
        .iter()
        .chain(table.map(|t| &t.venue_id))
        .find(|expected| **expected != venue.id);

    match expected {
        Some(expected) => Err(EligibilityError::VenueMismatch {
            expected: expected.clone(),
            found: venue.id.clone(),
        }),
        None => Ok(()),
    }
}
