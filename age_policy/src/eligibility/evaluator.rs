//! Single-player eligibility checks.

use chrono::{DateTime, FixedOffset, Utc};
use log::debug;

use super::{
    errors::EligibilityResult,
    verdict::{EligibilityVerdict, Reason, Warning},
};
use crate::{
    model::{AgeOverride, ClockTime, Player, PlayerAgeGroup, RestrictionKind, Table, Tournament, Venue},
    policy::{
        Admission, ResolvedRestriction, RestrictionScope, WindowKind, active_override, admit,
        resolve_binding_restriction,
    },
};

/// Wall-clock time used for window checks at tournament scope: the scheduled
/// start when known, otherwise `now`.
pub(crate) fn tournament_clock(tournament: &Tournament, now: DateTime<FixedOffset>) -> ClockTime {
    ClockTime::from_naive(tournament.start_date.unwrap_or(now).time())
}

/// Decide whether `player` may register for `tournament`.
///
/// Time windows are checked against the tournament's scheduled start when it
/// has one, otherwise against `now`. Overrides are always checked against
/// `now`.
///
/// # Errors
///
/// Returns an [`EligibilityError`](super::EligibilityError) for malformed
/// input (missing ids, a uniform flag without a value, a limited-hours venue
/// without a minors window, a venue that is not the tournament's). A player
/// who is not admitted is not an error.
pub fn validate_player_tournament_eligibility(
    player: &Player,
    tournament: &Tournament,
    venue: Option<&Venue>,
    overrides: &[AgeOverride],
    now: DateTime<FixedOffset>,
) -> EligibilityResult<EligibilityVerdict> {
    player.validate()?;
    tournament.validate()?;

    let at = tournament_clock(tournament, now);
    let binding = resolve_binding_restriction(tournament, venue, None, at)?;
    Ok(evaluate(player, tournament, None, &binding, overrides, now))
}

/// Decide whether `player` may be seated at `table`.
///
/// An inactive table is refused before any age policy is consulted. Time
/// windows are checked against `now`.
///
/// # Errors
///
/// As [`validate_player_tournament_eligibility`], plus `MissingVenue` when the
/// table has no restriction of its own, the tournament has no uniform rule,
/// and no venue was supplied.
pub fn validate_player_table_assignment(
    player: &Player,
    table: &Table,
    venue: Option<&Venue>,
    tournament: &Tournament,
    overrides: &[AgeOverride],
    now: DateTime<FixedOffset>,
) -> EligibilityResult<EligibilityVerdict> {
    player.validate()?;
    table.validate()?;
    tournament.validate()?;

    if !table.is_active {
        let (effective_age, _) = effective_age(player, tournament, overrides, now);
        debug!("player {} refused: table {} is inactive", player.id, table.id);
        return Ok(EligibilityVerdict::for_player(
            effective_age,
            None,
            vec![Reason::TableInactive {
                table_id: table.id.clone(),
            }],
            Vec::new(),
        ));
    }

    let at = ClockTime::from_naive(now.time());
    let binding = resolve_binding_restriction(tournament, venue, Some(table), at)?;
    Ok(evaluate(player, tournament, Some(table), &binding, overrides, now))
}

/// Effective age group and the override that produced it.
///
/// Overrides are ignored outright for tournaments that are not age
/// restricted.
pub(crate) fn effective_age<'a>(
    player: &Player,
    tournament: &Tournament,
    overrides: &'a [AgeOverride],
    now: DateTime<FixedOffset>,
) -> (PlayerAgeGroup, Option<&'a AgeOverride>) {
    let applied = active_override(player, &tournament.id, overrides, now.with_timezone(&Utc));
    match applied {
        Some(o) if tournament.is_age_restricted => (o.override_age, Some(o)),
        _ => (player.age_group, applied),
    }
}

/// Apply an already resolved restriction to one player.
pub(crate) fn evaluate(
    player: &Player,
    tournament: &Tournament,
    table: Option<&Table>,
    binding: &ResolvedRestriction,
    overrides: &[AgeOverride],
    now: DateTime<FixedOffset>,
) -> EligibilityVerdict {
    let (age, applied) = effective_age(player, tournament, overrides, now);

    let mut reasons = vec![admission_reason(player, age, table, binding)];
    let mut warnings = Vec::new();

    if let Some(o) = applied {
        if tournament.is_age_restricted {
            warnings.push(Warning::OverrideApplied {
                player_id: player.id.clone(),
                override_id: o.id.clone(),
                original_age: o.original_age,
                override_age: o.override_age,
                created_by: o.created_by.clone(),
            });
        } else {
            reasons.push(Reason::TournamentNotAgeRestrictedButOverrideIgnored {
                player_id: player.id.clone(),
                override_id: o.id.clone(),
            });
        }
        if o.original_age != player.age_group {
            warnings.push(Warning::OverrideOriginalAgeMismatch {
                player_id: player.id.clone(),
                override_id: o.id.clone(),
                profile_age: player.age_group,
                original_age: o.original_age,
            });
        }
    }

    let verdict = EligibilityVerdict::for_player(age, Some(*binding), reasons, warnings);
    debug!(
        "player {} ({}) under {} [{:?}]: allowed={}",
        player.id, age, binding.kind, binding.scope, verdict.allowed
    );
    verdict
}

fn admission_reason(
    player: &Player,
    age: PlayerAgeGroup,
    table: Option<&Table>,
    binding: &ResolvedRestriction,
) -> Reason {
    match (admit(binding, age), binding.kind) {
        (Admission::Admitted, RestrictionKind::Unrestricted) => Reason::Unrestricted,
        (Admission::Admitted, restriction) => Reason::Admitted {
            player_id: player.id.clone(),
            age_group: age,
            restriction,
            scope: binding.scope,
        },
        (Admission::OutsideWindow(window_kind), _) => Reason::OutsideAllowedHours {
            player_id: player.id.clone(),
            player_name: player.display_name(),
            age_group: age,
            window_kind,
            window: match window_kind {
                WindowKind::Minors => binding.minors.window,
                WindowKind::Ages18To20 => binding.ages_18_to_20.window,
            },
        },
        (Admission::NotAdmitted, RestrictionKind::Venue(policy)) => Reason::AgeNotAdmittedByVenuePolicy {
            player_id: player.id.clone(),
            player_name: player.display_name(),
            age_group: age,
            policy,
        },
        (Admission::NotAdmitted, RestrictionKind::Table(restriction)) => match (binding.scope, table) {
            (RestrictionScope::Table, Some(table)) => Reason::TableRestrictedToOtherAgeGroup {
                player_id: player.id.clone(),
                player_name: player.display_name(),
                table_id: table.id.clone(),
                age_group: age,
                restriction,
            },
            _ => Reason::TournamentRestrictedToOtherAgeGroup {
                player_id: player.id.clone(),
                player_name: player.display_name(),
                age_group: age,
                restriction,
            },
        },
        // Every row of the admission table admits all groups when unrestricted.
        (Admission::NotAdmitted, RestrictionKind::Unrestricted) => Reason::Unrestricted,
    }
}
