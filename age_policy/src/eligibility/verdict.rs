//! Verdicts, reasons and warnings.

use serde::Serialize;
use std::fmt;

use super::errors::EligibilityError;
use crate::{
    model::{
        OverrideId, PlayerAgeGroup, PlayerId, RestrictionKind, TableAgeRestriction, TableId,
        VenueAgeRestriction,
    },
    policy::{ResolvedRestriction, RestrictionScope, TimeWindow, WindowKind},
};

/// Why a player was (or was not) admitted.
///
/// Violations make a verdict fail; notes are informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum Reason {
    /// Tournament not age restricted, or nothing configured to restrict it
    Unrestricted,

    /// Admitted by the binding restriction
    Admitted {
        player_id: PlayerId,
        age_group: PlayerAgeGroup,
        restriction: RestrictionKind,
        scope: RestrictionScope,
    },

    AgeNotAdmittedByVenuePolicy {
        player_id: PlayerId,
        player_name: String,
        age_group: PlayerAgeGroup,
        policy: VenueAgeRestriction,
    },

    /// Age group only admitted during a venue window that is closed
    OutsideAllowedHours {
        player_id: PlayerId,
        player_name: String,
        age_group: PlayerAgeGroup,
        window_kind: WindowKind,
        window: TimeWindow,
    },

    TableRestrictedToOtherAgeGroup {
        player_id: PlayerId,
        player_name: String,
        table_id: TableId,
        age_group: PlayerAgeGroup,
        restriction: TableAgeRestriction,
    },

    /// Uniform tournament restriction excludes the player
    TournamentRestrictedToOtherAgeGroup {
        player_id: PlayerId,
        player_name: String,
        age_group: PlayerAgeGroup,
        restriction: TableAgeRestriction,
    },

    TableInactive { table_id: TableId },

    /// Eligible player that no active table admits
    NoAvailableTable {
        player_id: PlayerId,
        player_name: String,
    },

    /// Active table that admits none of the eligible players
    TableAdmitsNoEligiblePlayer {
        table_id: TableId,
        restriction: RestrictionKind,
    },

    /// Active override on file for a tournament that is not age restricted
    TournamentNotAgeRestrictedButOverrideIgnored {
        player_id: PlayerId,
        override_id: OverrideId,
    },
}

impl Reason {
    pub fn is_violation(&self) -> bool {
        !matches!(
            self,
            Reason::Unrestricted
                | Reason::Admitted { .. }
                | Reason::TournamentNotAgeRestrictedButOverrideIgnored { .. }
        )
    }

    /// Player this reason concerns, if any.
    pub fn player_id(&self) -> Option<&str> {
        match self {
            Reason::Admitted { player_id, .. }
            | Reason::AgeNotAdmittedByVenuePolicy { player_id, .. }
            | Reason::OutsideAllowedHours { player_id, .. }
            | Reason::TableRestrictedToOtherAgeGroup { player_id, .. }
            | Reason::TournamentRestrictedToOtherAgeGroup { player_id, .. }
            | Reason::NoAvailableTable { player_id, .. }
            | Reason::TournamentNotAgeRestrictedButOverrideIgnored { player_id, .. } => Some(player_id),
            Reason::Unrestricted
            | Reason::TableInactive { .. }
            | Reason::TableAdmitsNoEligiblePlayer { .. } => None,
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Unrestricted => write!(f, "No age restriction applies"),
            Reason::Admitted {
                player_id,
                age_group,
                restriction,
                ..
            } => write!(f, "Player {player_id} ({age_group}) admitted under {restriction}"),
            Reason::AgeNotAdmittedByVenuePolicy {
                player_name,
                age_group,
                policy,
                ..
            } => write!(
                f,
                "Player {player_name} ({age_group}) cannot participate due to venue age restrictions: {policy}"
            ),
            Reason::OutsideAllowedHours {
                player_name,
                age_group,
                window,
                ..
            } => write!(
                f,
                "Player {player_name} ({age_group}) is only admitted between {window}"
            ),
            Reason::TableRestrictedToOtherAgeGroup {
                player_name,
                table_id,
                age_group,
                restriction,
                ..
            } => write!(
                f,
                "Player {player_name} ({age_group}) cannot be assigned to table {table_id} ({restriction})"
            ),
            Reason::TournamentRestrictedToOtherAgeGroup {
                player_name,
                age_group,
                restriction,
                ..
            } => write!(
                f,
                "Player {player_name} ({age_group}) cannot participate in {restriction} tournament"
            ),
            Reason::TableInactive { table_id } => write!(f, "Table {table_id} is not active"),
            Reason::NoAvailableTable { player_name, .. } => write!(
                f,
                "Player {player_name} cannot be assigned to any available tables due to age restrictions"
            ),
            Reason::TableAdmitsNoEligiblePlayer {
                table_id,
                restriction,
            } => write!(
                f,
                "Table {table_id} ({restriction}) admits none of the registered players"
            ),
            Reason::TournamentNotAgeRestrictedButOverrideIgnored {
                player_id,
                override_id,
            } => write!(
                f,
                "Age override {override_id} for player {player_id} ignored: tournament is not age restricted"
            ),
        }
    }
}

/// Non-blocking notice attached to a verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum Warning {
    /// Player evaluated under an override rather than the recorded age group
    OverrideApplied {
        player_id: PlayerId,
        override_id: OverrideId,
        original_age: PlayerAgeGroup,
        override_age: PlayerAgeGroup,
        created_by: Option<String>,
    },

    /// Override's recorded original age no longer matches the profile
    OverrideOriginalAgeMismatch {
        player_id: PlayerId,
        override_id: OverrideId,
        profile_age: PlayerAgeGroup,
        original_age: PlayerAgeGroup,
    },

    /// Closing this table leaves the player with nowhere to sit
    LastTable {
        player_id: PlayerId,
        player_name: String,
        table_id: TableId,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::OverrideApplied {
                player_id,
                original_age,
                override_age,
                ..
            } => write!(
                f,
                "Player {player_id} evaluated as {override_age} (recorded {original_age}) under an age override"
            ),
            Warning::OverrideOriginalAgeMismatch {
                player_id,
                override_id,
                profile_age,
                original_age,
            } => write!(
                f,
                "Age override {override_id} recorded player {player_id} as {original_age} but the profile says {profile_age}"
            ),
            Warning::LastTable {
                player_name,
                table_id,
                ..
            } => write!(
                f,
                "Cannot close table {table_id} - it's the last available table for player {player_name} due to age restrictions"
            ),
        }
    }
}

/// Entity a batch entry describes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Subject {
    Player(PlayerId),
    Table(TableId),
}

/// Per-entity breakdown of a batch verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub subject: Subject,
    pub verdict: EligibilityVerdict,
}

/// Input error confined to one entry of a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryError {
    pub subject: Subject,
    pub error: EligibilityError,
    pub message: String,
}

impl EntryError {
    pub fn new(subject: Subject, error: EligibilityError) -> Self {
        let message = error.to_string();
        Self {
            subject,
            error,
            message,
        }
    }
}

/// Outcome of an eligibility check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityVerdict {
    pub allowed: bool,
    /// Age group the player was evaluated as (absent on batch verdicts)
    pub effective_age_group: Option<PlayerAgeGroup>,
    pub binding_restriction: Option<ResolvedRestriction>,
    /// Violations and notes, in evaluation order
    pub reasons: Vec<Reason>,
    pub warnings: Vec<Warning>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<BatchEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub input_errors: Vec<EntryError>,
}

impl EligibilityVerdict {
    /// Single-player verdict; allowed iff no reason is a violation.
    pub fn for_player(
        effective_age_group: PlayerAgeGroup,
        binding_restriction: Option<ResolvedRestriction>,
        reasons: Vec<Reason>,
        warnings: Vec<Warning>,
    ) -> Self {
        Self {
            allowed: !reasons.iter().any(Reason::is_violation),
            effective_age_group: Some(effective_age_group),
            binding_restriction,
            reasons,
            warnings,
            entries: Vec::new(),
            input_errors: Vec::new(),
        }
    }

    /// Violations only
    pub fn violations(&self) -> impl Iterator<Item = &Reason> {
        self.reasons.iter().filter(|r| r.is_violation())
    }

    pub fn entry_for(&self, subject: &Subject) -> Option<&BatchEntry> {
        self.entries.iter().find(|e| &e.subject == subject)
    }
}
