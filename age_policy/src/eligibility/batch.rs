//! Multi-player checks: tournament start, table availability, table closure.

use chrono::{DateTime, FixedOffset};
use log::{debug, info};

use super::{
    errors::EligibilityResult,
    evaluator::{
        effective_age, tournament_clock, validate_player_table_assignment,
        validate_player_tournament_eligibility,
    },
    verdict::{BatchEntry, EligibilityVerdict, EntryError, Reason, Subject, Warning},
};
use crate::{
    model::{AgeOverride, Player, PlayerAgeGroup, Table, Tournament, Venue},
    policy::{admit, resolve_binding_restriction},
};

/// Decide whether `tournament` may start with `players` and `tables`.
///
/// Every player is checked for tournament eligibility. When tables are
/// supplied, every active table must admit at least one eligible player and
/// every eligible player must be admitted by at least one active table.
///
/// The batch never stops at the first problem: a malformed player or table is
/// recorded in `input_errors` and the rest are still evaluated. Reasons keep
/// input order, players first, then tables.
///
/// # Errors
///
/// Only invalid tournament or venue input aborts the batch.
pub fn validate_tournament_start(
    tournament: &Tournament,
    players: &[Player],
    tables: &[Table],
    venue: Option<&Venue>,
    overrides: &[AgeOverride],
    now: DateTime<FixedOffset>,
) -> EligibilityResult<EligibilityVerdict> {
    tournament.validate()?;
    let at = tournament_clock(tournament, now);
    let binding = resolve_binding_restriction(tournament, venue, None, at)?;

    let mut entries = Vec::with_capacity(players.len() + tables.len());
    let mut input_errors = Vec::new();
    let mut warnings = Vec::new();
    // (entry index, player, effective age) of every eligible player
    let mut eligible: Vec<(usize, &Player, PlayerAgeGroup)> = Vec::new();

    for player in players {
        match validate_player_tournament_eligibility(player, tournament, venue, overrides, now) {
            Ok(verdict) => {
                if verdict.allowed {
                    let (age, _) = effective_age(player, tournament, overrides, now);
                    eligible.push((entries.len(), player, age));
                }
                warnings.extend(verdict.warnings.iter().cloned());
                entries.push(BatchEntry {
                    subject: Subject::Player(player.id.clone()),
                    verdict,
                });
            }
            Err(e) => {
                debug!("player entry {:?} rejected: {}", player.id, e);
                input_errors.push(EntryError::new(Subject::Player(player.id.clone()), e));
            }
        }
    }

    let mut table_entries = Vec::new();
    if !tables.is_empty() && !eligible.is_empty() {
        let mut seats = vec![0usize; eligible.len()];

        for table in tables.iter().filter(|t| t.is_active) {
            let resolved = table
                .validate()
                .and_then(|_| resolve_binding_restriction(tournament, venue, Some(table), at));
            let table_binding = match resolved {
                Ok(b) => b,
                Err(e) => {
                    debug!("table entry {:?} rejected: {}", table.id, e);
                    input_errors.push(EntryError::new(Subject::Table(table.id.clone()), e));
                    continue;
                }
            };

            let mut admitted_any = false;
            for (slot, (_, _, age)) in eligible.iter().enumerate() {
                if admit(&table_binding, *age).is_admitted() {
                    seats[slot] += 1;
                    admitted_any = true;
                }
            }

            let reasons = if admitted_any {
                Vec::new()
            } else {
                vec![Reason::TableAdmitsNoEligiblePlayer {
                    table_id: table.id.clone(),
                    restriction: table_binding.kind,
                }]
            };
            table_entries.push(BatchEntry {
                subject: Subject::Table(table.id.clone()),
                verdict: EligibilityVerdict {
                    allowed: admitted_any,
                    effective_age_group: None,
                    binding_restriction: Some(table_binding),
                    reasons,
                    warnings: Vec::new(),
                    entries: Vec::new(),
                    input_errors: Vec::new(),
                },
            });
        }

        for ((index, player, _), count) in eligible.iter().zip(&seats) {
            if *count > 0 {
                continue;
            }
            let verdict = &mut entries[*index].verdict;
            verdict.reasons.push(Reason::NoAvailableTable {
                player_id: player.id.clone(),
                player_name: player.display_name(),
            });
            verdict.allowed = false;
        }
    }

    entries.extend(table_entries);

    let mut reasons: Vec<Reason> = entries
        .iter()
        .flat_map(|e| e.verdict.violations().cloned())
        .collect();
    let allowed = reasons.is_empty() && input_errors.is_empty();
    if allowed && binding.is_unrestricted() {
        reasons.push(Reason::Unrestricted);
    }

    info!(
        "tournament {} start check: {} players, {} tables, allowed={}, {} violations, {} input errors",
        tournament.id,
        players.len(),
        tables.len(),
        allowed,
        reasons.iter().filter(|r| r.is_violation()).count(),
        input_errors.len()
    );

    Ok(EligibilityVerdict {
        allowed,
        effective_age_group: None,
        binding_restriction: Some(binding),
        reasons,
        warnings,
        entries,
        input_errors,
    })
}

/// Active tables `player` may be seated at, in input order.
///
/// # Errors
///
/// Propagates the first input error raised while checking a table.
pub fn available_tables_for_player<'a>(
    player: &Player,
    tables: &'a [Table],
    venue: Option<&Venue>,
    tournament: &Tournament,
    overrides: &[AgeOverride],
    now: DateTime<FixedOffset>,
) -> EligibilityResult<Vec<&'a Table>> {
    let mut available = Vec::new();
    for table in tables.iter().filter(|t| t.is_active) {
        if validate_player_table_assignment(player, table, venue, tournament, overrides, now)?.allowed {
            available.push(table);
        }
    }
    Ok(available)
}

/// Check what closing `table_to_close` does to `active_players`.
///
/// Never blocks the closure: a player for whom the closing table is the last
/// admissible one gets a `LastTable` warning instead.
///
/// # Errors
///
/// Propagates input errors from the individual table checks.
pub fn validate_table_closure(
    table_to_close: &Table,
    remaining_tables: &[Table],
    active_players: &[Player],
    venue: Option<&Venue>,
    tournament: &Tournament,
    overrides: &[AgeOverride],
    now: DateTime<FixedOffset>,
) -> EligibilityResult<EligibilityVerdict> {
    tournament.validate()?;
    let mut warnings = Vec::new();

    for player in active_players {
        let fits_closing = validate_player_table_assignment(
            player,
            table_to_close,
            venue,
            tournament,
            overrides,
            now,
        )?
        .allowed;
        if !fits_closing {
            continue;
        }

        let remaining =
            available_tables_for_player(player, remaining_tables, venue, tournament, overrides, now)?;
        if remaining.is_empty() {
            warnings.push(Warning::LastTable {
                player_id: player.id.clone(),
                player_name: player.display_name(),
                table_id: table_to_close.id.clone(),
            });
        }
    }

    Ok(EligibilityVerdict {
        allowed: true,
        effective_age_group: None,
        binding_restriction: None,
        reasons: Vec::new(),
        warnings,
        entries: Vec::new(),
        input_errors: Vec::new(),
    })
}
