//! Effective age resolution under administrative overrides.

use chrono::{DateTime, Utc};

use crate::model::{AgeOverride, Player, PlayerAgeGroup};

/// The override that governs `player` in `tournament_id` at `now`, if any.
///
/// Expired overrides (`expires_at <= now`) are ignored. Among the active ones
/// the most recently created wins; on equal `created_at` the later entry in
/// `overrides` wins.
pub fn active_override<'a>(
    player: &Player,
    tournament_id: &str,
    overrides: &'a [AgeOverride],
    now: DateTime<Utc>,
) -> Option<&'a AgeOverride> {
    overrides
        .iter()
        .filter(|o| o.applies_to(&player.id, tournament_id))
        .filter(|o| o.is_active_at(now))
        .max_by_key(|o| o.created_at)
}

/// Age group to evaluate `player` as, falling back to the recorded group.
pub fn resolve_effective_age(
    player: &Player,
    tournament_id: &str,
    overrides: &[AgeOverride],
    now: DateTime<Utc>,
) -> PlayerAgeGroup {
    active_override(player, tournament_id, overrides, now)
        .map(|o| o.override_age)
        .unwrap_or(player.age_group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 15, 0, 0).unwrap()
    }

    fn age_override(
        id: &str,
        player: &str,
        tournament: &str,
        age: PlayerAgeGroup,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> AgeOverride {
        AgeOverride {
            id: id.to_string(),
            player_id: player.to_string(),
            tournament_id: tournament.to_string(),
            original_age: PlayerAgeGroup::Under18,
            override_age: age,
            created_at,
            expires_at,
            created_by: None,
            reason: None,
        }
    }

    #[test]
    fn test_no_overrides_returns_recorded_age() {
        let player = Player::new("p1", PlayerAgeGroup::Under18);
        assert_eq!(resolve_effective_age(&player, "t1", &[], now()), PlayerAgeGroup::Under18);
    }

    #[test]
    fn test_active_override_substitutes_age() {
        let player = Player::new("p1", PlayerAgeGroup::Under18);
        let overrides = [age_override(
            "o1",
            "p1",
            "t1",
            PlayerAgeGroup::Ages21Plus,
            now() - Duration::hours(1),
            None,
        )];
        assert_eq!(
            resolve_effective_age(&player, "t1", &overrides, now()),
            PlayerAgeGroup::Ages21Plus
        );
    }

    #[test]
    fn test_override_for_other_player_or_tournament_is_ignored() {
        let player = Player::new("p1", PlayerAgeGroup::Under18);
        let created = now() - Duration::hours(1);
        let overrides = [
            age_override("o1", "p2", "t1", PlayerAgeGroup::Ages21Plus, created, None),
            age_override("o2", "p1", "t2", PlayerAgeGroup::Ages21Plus, created, None),
        ];
        assert_eq!(resolve_effective_age(&player, "t1", &overrides, now()), PlayerAgeGroup::Under18);
    }

    #[test]
    fn test_override_expiring_now_is_ignored() {
        let player = Player::new("p1", PlayerAgeGroup::Under18);
        let overrides = [age_override(
            "o1",
            "p1",
            "t1",
            PlayerAgeGroup::Ages21Plus,
            now() - Duration::hours(3),
            Some(now()),
        )];
        assert!(active_override(&player, "t1", &overrides, now()).is_none());
    }

    #[test]
    fn test_latest_active_override_wins() {
        let player = Player::new("p1", PlayerAgeGroup::Under18);
        let overrides = [
            age_override("newest-expired", "p1", "t1", PlayerAgeGroup::Under18, now() - Duration::minutes(5), Some(now() - Duration::minutes(1))),
            age_override("older", "p1", "t1", PlayerAgeGroup::Ages18To20, now() - Duration::hours(2), None),
            age_override("newer", "p1", "t1", PlayerAgeGroup::Ages21Plus, now() - Duration::hours(1), None),
        ];
        let winner = active_override(&player, "t1", &overrides, now()).unwrap();
        assert_eq!(winner.id, "newer");
    }

    #[test]
    fn test_equal_created_at_prefers_later_entry() {
        let player = Player::new("p1", PlayerAgeGroup::Under18);
        let created = now() - Duration::hours(1);
        let overrides = [
            age_override("first", "p1", "t1", PlayerAgeGroup::Ages18To20, created, None),
            age_override("second", "p1", "t1", PlayerAgeGroup::Ages21Plus, created, None),
        ];
        assert_eq!(active_override(&player, "t1", &overrides, now()).unwrap().id, "second");
    }
}
