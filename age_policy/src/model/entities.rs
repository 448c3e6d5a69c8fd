//! Snapshots of the players, venues, tables, tournaments and overrides the
//! engine evaluates. These mirror the records owned by the persistence layer;
//! the engine only ever reads them.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use super::{
    age::{PlayerAgeGroup, TableAgeRestriction, VenueAgeRestriction},
    clock::ClockTime,
};
use crate::{eligibility::EligibilityError, policy::window::TimeWindow};

pub type PlayerId = String;
pub type VenueId = String;
pub type TableId = String;
pub type TournamentId = String;
pub type OverrideId = String;

fn require(entity: &'static str, field: &'static str, value: &str) -> Result<(), EligibilityError> {
    if value.trim().is_empty() {
        Err(EligibilityError::MissingField { entity, field })
    } else {
        Ok(())
    }
}

/// Player profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Verified age bracket
    pub age_group: PlayerAgeGroup,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, age_group: PlayerAgeGroup) -> Self {
        Self {
            id: id.into(),
            first_name: String::new(),
            last_name: String::new(),
            age_group,
        }
    }

    pub fn with_name(mut self, first_name: &str, last_name: &str) -> Self {
        self.first_name = first_name.to_string();
        self.last_name = last_name.to_string();
        self
    }

    /// "First Last", falling back to the id when no name is on file.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.id.clone()
        } else {
            name.to_string()
        }
    }

    pub fn validate(&self) -> Result<(), EligibilityError> {
        require("player", "id", &self.id)
    }
}

/// Venue with its default age policy and optional time windows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: VenueId,
    #[serde(default)]
    pub name: String,
    pub age_restriction: VenueAgeRestriction,
    #[serde(default)]
    pub use_venue_age_for_all_tables: bool,
    #[serde(default)]
    pub minor_start_time: Option<ClockTime>,
    #[serde(default)]
    pub minor_end_time: Option<ClockTime>,
    #[serde(default)]
    pub ages_18_to_20_start_time: Option<ClockTime>,
    #[serde(default)]
    pub ages_18_to_20_end_time: Option<ClockTime>,
}

impl Venue {
    pub fn new(id: impl Into<VenueId>, age_restriction: VenueAgeRestriction) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            age_restriction,
            use_venue_age_for_all_tables: false,
            minor_start_time: None,
            minor_end_time: None,
            ages_18_to_20_start_time: None,
            ages_18_to_20_end_time: None,
        }
    }

    /// Set the minors window
    pub fn with_minors_window(mut self, start: ClockTime, end: ClockTime) -> Self {
        self.minor_start_time = Some(start);
        self.minor_end_time = Some(end);
        self
    }

    /// Set the 18-20 window
    pub fn with_ages_18_to_20_window(mut self, start: ClockTime, end: ClockTime) -> Self {
        self.ages_18_to_20_start_time = Some(start);
        self.ages_18_to_20_end_time = Some(end);
        self
    }

    pub fn minors_window(&self) -> TimeWindow {
        TimeWindow::new(self.minor_start_time, self.minor_end_time)
    }

    pub fn ages_18_to_20_window(&self) -> TimeWindow {
        TimeWindow::new(self.ages_18_to_20_start_time, self.ages_18_to_20_end_time)
    }

    /// Check the fields the restriction resolver depends on.
    pub fn validate(&self) -> Result<(), EligibilityError> {
        require("venue", "id", &self.id)?;
        if self.age_restriction.requires_minors_window() && !self.minors_window().is_configured() {
            return Err(EligibilityError::MissingMinorsWindow {
                venue_id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Physical table at a venue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: TableId,
    #[serde(default)]
    pub number: String,
    pub venue_id: VenueId,
    #[serde(default)]
    pub age_restriction: Option<TableAgeRestriction>,
    pub is_active: bool,
}

impl Table {
    pub fn new(id: impl Into<TableId>, venue_id: impl Into<VenueId>) -> Self {
        let id = id.into();
        Self {
            number: id.clone(),
            id,
            venue_id: venue_id.into(),
            age_restriction: None,
            is_active: true,
        }
    }

    pub fn with_restriction(mut self, restriction: TableAgeRestriction) -> Self {
        self.age_restriction = Some(restriction);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn validate(&self) -> Result<(), EligibilityError> {
        require("table", "id", &self.id)?;
        require("table", "venueId", &self.venue_id)
    }
}

/// Tournament age settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub venue_id: Option<VenueId>,
    /// Master switch: when false every player is admitted
    pub is_age_restricted: bool,
    #[serde(default)]
    pub use_uniform_age_restriction: bool,
    #[serde(default)]
    pub uniform_age_restriction: Option<TableAgeRestriction>,
    /// Scheduled start, in venue-local offset
    #[serde(default)]
    pub start_date: Option<DateTime<FixedOffset>>,
}

impl Tournament {
    pub fn new(id: impl Into<TournamentId>, is_age_restricted: bool) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            venue_id: None,
            is_age_restricted,
            use_uniform_age_restriction: false,
            uniform_age_restriction: None,
            start_date: None,
        }
    }

    pub fn at_venue(mut self, venue_id: impl Into<VenueId>) -> Self {
        self.venue_id = Some(venue_id.into());
        self
    }

    /// Apply one restriction to every table of the tournament
    pub fn with_uniform_restriction(mut self, restriction: TableAgeRestriction) -> Self {
        self.use_uniform_age_restriction = true;
        self.uniform_age_restriction = Some(restriction);
        self
    }

    pub fn starting_at(mut self, start_date: DateTime<FixedOffset>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn validate(&self) -> Result<(), EligibilityError> {
        require("tournament", "id", &self.id)
    }
}

/// Administrative substitution of a player's age group for one tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeOverride {
    pub id: OverrideId,
    pub player_id: PlayerId,
    pub tournament_id: TournamentId,
    /// Age group on file when the override was created (audit)
    pub original_age: PlayerAgeGroup,
    pub override_age: PlayerAgeGroup,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Tournament director who applied the override
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl AgeOverride {
    /// Whether the override still applies at `now`.
    ///
    /// An override expiring exactly at `now` is already expired.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at > now)
    }

    pub fn applies_to(&self, player_id: &str, tournament_id: &str) -> bool {
        self.player_id == player_id && self.tournament_id == tournament_id
    }
}
