//! # Age Policy
//!
//! Age-eligibility engine for venue-hosted pool tournaments.
//!
//! Given a player's verified age group, any temporary tournament override, and
//! the restrictions configured on the tournament, its tables and its venue,
//! the engine decides whether the player may register, be seated, or whether
//! a tournament may start with its current field. Evaluation is pure: the
//! caller supplies every snapshot and the current time.
//!
//! ## Evaluation
//!
//! 1. **Effective age**: the newest active override for the player and
//!    tournament replaces the profile age, restricted tournaments only.
//! 2. **Binding restriction**: uniform tournament rule, else the table's own
//!    restriction, else the venue policy.
//! 3. **Admission**: a static table maps (restriction, age group) to admit,
//!    deny, or admit inside a venue time window.
//!
//! ## Core Modules
//!
//! - [`model`]: Age groups, restriction kinds and entity snapshots
//! - [`policy`]: Override resolution, time windows, restriction resolution
//!   and the admission table
//! - [`eligibility`]: Public checks, verdicts and input errors
//!
//! ## Example
//!
//! ```
//! use age_policy::{Player, PlayerAgeGroup, Tournament, Venue, VenueAgeRestriction};
//! use chrono::DateTime;
//!
//! let venue = Venue::new("v1", VenueAgeRestriction::NoMinorsAgeGate);
//! let tournament = Tournament::new("t1", true).at_venue("v1");
//! let player = Player::new("p1", PlayerAgeGroup::Under18);
//! let now = DateTime::parse_from_rfc3339("2025-06-01T19:00:00-05:00").unwrap();
//!
//! let verdict =
//!     age_policy::validate_player_tournament_eligibility(&player, &tournament, Some(&venue), &[], now)
//!         .unwrap();
//! assert!(!verdict.allowed);
//! ```

/// Age groups, restriction kinds and entity snapshots.
pub mod model;
pub use model::{
    AgeOverride, ClockTime, Player, PlayerAgeGroup, RestrictionKind, Table, TableAgeRestriction,
    Tournament, Venue, VenueAgeRestriction,
};

/// Policy building blocks used by the evaluator.
pub mod policy;
pub use policy::{ResolvedRestriction, RestrictionScope, TimeWindow, WindowKind};

/// Eligibility checks and verdicts.
pub mod eligibility;
pub use eligibility::{
    EligibilityError, EligibilityResult, EligibilityVerdict, HoursIssue, Reason, Subject, Warning,
    available_tables_for_player, override_warning_message, player_removal_warning,
    validate_player_table_assignment, validate_player_tournament_eligibility, validate_table_closure,
    validate_tournament_start, validate_venue_hours,
};
