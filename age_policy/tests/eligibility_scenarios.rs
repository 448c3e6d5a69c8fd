//! Integration tests for single-player eligibility
//!
//! These walk through the registration and seating cases tournament directors
//! run into: unrestricted events, venue age gates, limited minors hours and
//! temporary age overrides.

#[cfg(test)]
mod eligibility_tests {
    use age_policy::{
        AgeOverride, ClockTime, Player, PlayerAgeGroup, Reason, RestrictionKind, RestrictionScope, Table,
        TableAgeRestriction, Tournament, Venue, VenueAgeRestriction, Warning, WindowKind, validate_player_table_assignment,
        validate_player_tournament_eligibility,
    };
    use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

    fn venue_time(h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 6, 1, h, m, 0)
            .unwrap()
    }

    fn hm(h: u32, m: u32) -> ClockTime {
        ClockTime::from_hm(h, m).unwrap()
    }

    fn override_for(player: &Player, tournament: &Tournament, age: PlayerAgeGroup) -> AgeOverride {
        AgeOverride {
            id: "o1".to_string(),
            player_id: player.id.clone(),
            tournament_id: tournament.id.clone(),
            original_age: player.age_group,
            override_age: age,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            expires_at: None,
            created_by: Some("director-1".to_string()),
            reason: Some("Verified ID at the door".to_string()),
        }
    }

    #[test]
    fn test_unrestricted_tournament_admits_everyone_everywhere() {
        let tournament = Tournament::new("t1", false).at_venue("v1");
        let venue = Venue::new("v1", VenueAgeRestriction::NoMinorsAgeGate);
        let tables = [
            Table::new("open", "v1"),
            Table::new("bar", "v1").with_restriction(TableAgeRestriction::RestrictedToAges21Plus),
            Table::new("kids", "v1").with_restriction(TableAgeRestriction::RestrictedToUnder18),
        ];

        for age in PlayerAgeGroup::ALL {
            let player = Player::new("p1", age);
            let verdict =
                validate_player_tournament_eligibility(&player, &tournament, Some(&venue), &[], venue_time(23, 0))
                    .unwrap();
            assert!(verdict.allowed);
            assert_eq!(verdict.reasons, vec![Reason::Unrestricted]);

            for table in &tables {
                let verdict =
                    validate_player_table_assignment(&player, table, Some(&venue), &tournament, &[], venue_time(23, 0))
                        .unwrap();
                assert!(verdict.allowed, "{age} at {}", table.id);
                assert_eq!(verdict.reasons, vec![Reason::Unrestricted]);
            }
        }
    }

    #[test]
    fn test_no_minors_venue_refuses_minor() {
        let tournament = Tournament::new("t1", true).at_venue("v1");
        let venue = Venue::new("v1", VenueAgeRestriction::NoMinorsAgeGate);
        let player = Player::new("p1", PlayerAgeGroup::Under18).with_name("Sam", "Minor");

        let verdict =
            validate_player_tournament_eligibility(&player, &tournament, Some(&venue), &[], venue_time(19, 0)).unwrap();

        assert!(!verdict.allowed);
        assert_eq!(verdict.effective_age_group, Some(PlayerAgeGroup::Under18));
        assert_eq!(
            verdict.reasons,
            vec![Reason::AgeNotAdmittedByVenuePolicy {
                player_id: "p1".to_string(),
                player_name: "Sam Minor".to_string(),
                age_group: PlayerAgeGroup::Under18,
                policy: VenueAgeRestriction::NoMinorsAgeGate,
            }]
        );
    }

    #[test]
    fn test_limited_hours_follow_the_minors_window() {
        let tournament = Tournament::new("t1", true).at_venue("v1");
        let venue =
            Venue::new("v1", VenueAgeRestriction::MinorsAllowedLimitedHours).with_minors_window(hm(12, 0), hm(20, 0));
        let player = Player::new("p1", PlayerAgeGroup::Under18);

        let late =
            validate_player_tournament_eligibility(&player, &tournament, Some(&venue), &[], venue_time(22, 0)).unwrap();
        assert!(!late.allowed);
        assert!(matches!(late.reasons[0], Reason::OutsideAllowedHours { .. }));
        assert!(late.reasons[0].to_string().contains("12:00-20:00"));

        let afternoon =
            validate_player_tournament_eligibility(&player, &tournament, Some(&venue), &[], venue_time(15, 0)).unwrap();
        assert!(afternoon.allowed);

        // Window end is exclusive.
        let closing =
            validate_player_tournament_eligibility(&player, &tournament, Some(&venue), &[], venue_time(20, 0)).unwrap();
        assert!(!closing.allowed);
    }

    #[test]
    fn test_override_lets_minor_sit_at_adult_table() {
        let tournament = Tournament::new("t1", true).at_venue("v1");
        let venue = Venue::new("v1", VenueAgeRestriction::NoMinorsAgeGate);
        let table = Table::new("bar", "v1").with_restriction(TableAgeRestriction::RestrictedToAges21Plus);
        let player = Player::new("p1", PlayerAgeGroup::Under18);
        let overrides = [override_for(&player, &tournament, PlayerAgeGroup::Ages21Plus)];

        let verdict =
            validate_player_table_assignment(&player, &table, Some(&venue), &tournament, &overrides, venue_time(21, 0))
                .unwrap();

        assert!(verdict.allowed);
        assert_eq!(verdict.effective_age_group, Some(PlayerAgeGroup::Ages21Plus));
        assert!(matches!(
            verdict.warnings[0],
            Warning::OverrideApplied {
                override_age: PlayerAgeGroup::Ages21Plus,
                ..
            }
        ));
    }

    #[test]
    fn test_expired_override_falls_back_to_profile_age() {
        let tournament = Tournament::new("t1", true);
        let table = Table::new("bar", "v1").with_restriction(TableAgeRestriction::RestrictedToAges21Plus);
        let player = Player::new("p1", PlayerAgeGroup::Under18);
        let now = venue_time(21, 0);
        let mut expired = override_for(&player, &tournament, PlayerAgeGroup::Ages21Plus);
        expired.expires_at = Some(now.with_timezone(&Utc));

        let verdict = validate_player_table_assignment(&player, &table, None, &tournament, &[expired], now).unwrap();

        assert!(!verdict.allowed);
        assert_eq!(verdict.effective_age_group, Some(PlayerAgeGroup::Under18));
        assert!(verdict.warnings.is_empty());
    }

    #[test]
    fn test_override_for_other_tournament_is_ignored() {
        let tournament = Tournament::new("t1", true);
        let other = Tournament::new("t2", true);
        let table = Table::new("bar", "v1").with_restriction(TableAgeRestriction::RestrictedToAges21Plus);
        let player = Player::new("p1", PlayerAgeGroup::Ages18To20);
        let overrides = [override_for(&player, &other, PlayerAgeGroup::Ages21Plus)];

        let verdict =
            validate_player_table_assignment(&player, &table, None, &tournament, &overrides, venue_time(21, 0)).unwrap();
        assert!(!verdict.allowed);
    }

    #[test]
    fn test_table_restriction_beats_venue_policy() {
        let tournament = Tournament::new("t1", true).at_venue("v1");
        let mut venue = Venue::new("v1", VenueAgeRestriction::MinorsAllowedAllDay);
        venue.use_venue_age_for_all_tables = true;
        let table = Table::new("bar", "v1").with_restriction(TableAgeRestriction::RestrictedToAges21Plus);
        let player = Player::new("p1", PlayerAgeGroup::Under18);

        let verdict =
            validate_player_table_assignment(&player, &table, Some(&venue), &tournament, &[], venue_time(15, 0)).unwrap();

        assert!(!verdict.allowed);
        let binding = verdict.binding_restriction.unwrap();
        assert_eq!(binding.kind, RestrictionKind::Table(TableAgeRestriction::RestrictedToAges21Plus));
        assert_eq!(binding.scope, RestrictionScope::Table);
        assert!(matches!(verdict.reasons[0], Reason::TableRestrictedToOtherAgeGroup { .. }));
    }

    #[test]
    fn test_uniform_restriction_beats_table() {
        let tournament = Tournament::new("t1", true).with_uniform_restriction(TableAgeRestriction::RestrictedToUnder18);
        let table = Table::new("bar", "v1").with_restriction(TableAgeRestriction::RestrictedToAges21Plus);
        let player = Player::new("p1", PlayerAgeGroup::Under18);

        let verdict = validate_player_table_assignment(&player, &table, None, &tournament, &[], venue_time(15, 0)).unwrap();
        assert!(verdict.allowed);
        assert_eq!(verdict.binding_restriction.unwrap().scope, RestrictionScope::TournamentUniform);
    }

    #[test]
    fn test_inactive_table_refused_before_policy() {
        let tournament = Tournament::new("t1", true);
        let table = Table::new("old", "v1").inactive();
        let player = Player::new("p1", PlayerAgeGroup::Ages21Plus);

        let verdict = validate_player_table_assignment(&player, &table, None, &tournament, &[], venue_time(15, 0)).unwrap();
        assert!(!verdict.allowed);
        assert_eq!(
            verdict.reasons,
            vec![Reason::TableInactive {
                table_id: "old".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_venue_is_an_input_error() {
        let tournament = Tournament::new("t1", true);
        let table = Table::new("plain", "v1");
        let player = Player::new("p1", PlayerAgeGroup::Ages21Plus);

        let err =
            validate_player_table_assignment(&player, &table, None, &tournament, &[], venue_time(15, 0)).unwrap_err();
        assert!(err.to_string().contains("plain"));
    }

    fn window_kind(reason: &Reason) -> Option<WindowKind> {
        match reason {
            Reason::OutsideAllowedHours { window_kind, .. } => Some(*window_kind),
            _ => None,
        }
    }

    fn register(player: &Player, venue: &Venue, h: u32, m: u32) -> age_policy::EligibilityVerdict {
        let tournament = Tournament::new("t1", true).at_venue("v1");
        validate_player_tournament_eligibility(player, &tournament, Some(venue), &[], venue_time(h, m)).unwrap()
    }

    #[test]
    fn test_18_20_window_gates_all_day_and_no_minors_venues() {
        let player = Player::new("p1", PlayerAgeGroup::Ages18To20).with_name("Jo", "Young");

        for policy in [VenueAgeRestriction::MinorsAllowedAllDay, VenueAgeRestriction::NoMinorsAgeGate] {
            let venue = Venue::new("v1", policy).with_ages_18_to_20_window(hm(10, 0), hm(18, 0));

            let late = register(&player, &venue, 21, 0);
            assert!(!late.allowed, "{policy} at 21:00");
            assert_eq!(late.reasons.len(), 1);
            assert_eq!(window_kind(&late.reasons[0]), Some(WindowKind::Ages18To20));
            assert!(late.reasons[0].to_string().contains("10:00-18:00"));

            let midday = register(&player, &venue, 12, 0);
            assert!(midday.allowed, "{policy} at 12:00");

            // Adults are never held to the 18-20 window.
            let adult = register(&Player::new("p2", PlayerAgeGroup::Ages21Plus), &venue, 21, 0);
            assert!(adult.allowed);
        }

        // Minors are still admitted all day there.
        let venue = Venue::new("v1", VenueAgeRestriction::MinorsAllowedAllDay)
            .with_ages_18_to_20_window(hm(10, 0), hm(18, 0));
        assert!(register(&Player::new("p3", PlayerAgeGroup::Under18), &venue, 21, 0).allowed);
    }

    #[test]
    fn test_both_windows_are_checked_independently() {
        let venue = Venue::new("v1", VenueAgeRestriction::MinorsAllowedLimitedHours)
            .with_minors_window(hm(12, 0), hm(20, 0))
            .with_ages_18_to_20_window(hm(10, 0), hm(18, 0));
        let minor = Player::new("p1", PlayerAgeGroup::Under18);
        let young = Player::new("p2", PlayerAgeGroup::Ages18To20);
        let adult = Player::new("p3", PlayerAgeGroup::Ages21Plus);

        // 11:00: only the 18-20 window is open
        let v = register(&minor, &venue, 11, 0);
        assert_eq!(window_kind(&v.reasons[0]), Some(WindowKind::Minors));
        assert!(register(&young, &venue, 11, 0).allowed);

        // 19:00: only the minors window is open
        assert!(register(&minor, &venue, 19, 0).allowed);
        let v = register(&young, &venue, 19, 0);
        assert_eq!(window_kind(&v.reasons[0]), Some(WindowKind::Ages18To20));

        // 21:00: both closed, each player is refused by their own window
        let v = register(&minor, &venue, 21, 0);
        assert_eq!(window_kind(&v.reasons[0]), Some(WindowKind::Minors));
        let v = register(&young, &venue, 21, 0);
        assert_eq!(window_kind(&v.reasons[0]), Some(WindowKind::Ages18To20));

        for h in [11, 19, 21] {
            assert!(register(&adult, &venue, h, 0).allowed);
        }
    }

    #[test]
    fn test_overnight_18_20_window() {
        let venue = Venue::new("v1", VenueAgeRestriction::NoMinorsAgeGate)
            .with_ages_18_to_20_window(hm(20, 0), hm(2, 0));
        let young = Player::new("p1", PlayerAgeGroup::Ages18To20);

        assert!(register(&young, &venue, 20, 0).allowed);
        assert!(register(&young, &venue, 23, 30).allowed);
        assert!(register(&young, &venue, 1, 59).allowed);

        let closing = register(&young, &venue, 2, 0);
        assert_eq!(window_kind(&closing.reasons[0]), Some(WindowKind::Ages18To20));
        assert!(!register(&young, &venue, 12, 0).allowed);
    }

    #[test]
    fn test_18_20_window_applies_at_venue_policy_tables() {
        let tournament = Tournament::new("t1", true).at_venue("v1");
        let venue = Venue::new("v1", VenueAgeRestriction::MinorsAllowedAllDay)
            .with_ages_18_to_20_window(hm(10, 0), hm(18, 0));
        let open_table = Table::new("t-1", "v1");
        let bar = Table::new("bar", "v1").with_restriction(TableAgeRestriction::RestrictedToAges21Plus);
        let young = Player::new("p1", PlayerAgeGroup::Ages18To20);

        let late =
            validate_player_table_assignment(&young, &open_table, Some(&venue), &tournament, &[], venue_time(21, 0))
                .unwrap();
        assert!(!late.allowed);
        assert_eq!(window_kind(&late.reasons[0]), Some(WindowKind::Ages18To20));

        let midday =
            validate_player_table_assignment(&young, &open_table, Some(&venue), &tournament, &[], venue_time(12, 0))
                .unwrap();
        assert!(midday.allowed);

        // A 21+ table refuses them regardless of the window.
        let at_bar =
            validate_player_table_assignment(&young, &bar, Some(&venue), &tournament, &[], venue_time(12, 0)).unwrap();
        assert!(matches!(at_bar.reasons[0], Reason::TableRestrictedToOtherAgeGroup { .. }));
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let tournament = Tournament::new("t1", true).at_venue("v1");
        let venue =
            Venue::new("v1", VenueAgeRestriction::MinorsAllowedLimitedHours).with_minors_window(hm(22, 0), hm(2, 0));
        let table = Table::new("t-4", "v1");
        let player = Player::new("p1", PlayerAgeGroup::Under18);
        let now = venue_time(23, 30);
        let overrides = [AgeOverride {
            expires_at: Some(now.with_timezone(&Utc) + Duration::hours(1)),
            ..override_for(&player, &tournament, PlayerAgeGroup::Ages18To20)
        }];

        let first =
            validate_player_table_assignment(&player, &table, Some(&venue), &tournament, &overrides, now).unwrap();
        let second =
            validate_player_table_assignment(&player, &table, Some(&venue), &tournament, &overrides, now).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
