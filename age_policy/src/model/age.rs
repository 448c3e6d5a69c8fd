//! Age groups and restriction kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verified age bracket recorded on a player profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerAgeGroup {
    /// Minors (<18)
    #[serde(rename = "UNDER_18")]
    Under18,
    /// 18-20
    #[serde(rename = "AGES_18_20")]
    Ages18To20,
    /// 21+
    #[serde(rename = "AGES_21_PLUS")]
    Ages21Plus,
}

impl PlayerAgeGroup {
    /// All age groups, youngest first.
    pub const ALL: [PlayerAgeGroup; 3] = [
        PlayerAgeGroup::Under18,
        PlayerAgeGroup::Ages18To20,
        PlayerAgeGroup::Ages21Plus,
    ];

    /// Column of this group in the admission table.
    pub(crate) const fn index(self) -> usize {
        match self {
            PlayerAgeGroup::Under18 => 0,
            PlayerAgeGroup::Ages18To20 => 1,
            PlayerAgeGroup::Ages21Plus => 2,
        }
    }

    /// Short label shown to operators.
    pub const fn label(self) -> &'static str {
        match self {
            PlayerAgeGroup::Under18 => "<18",
            PlayerAgeGroup::Ages18To20 => "18-20",
            PlayerAgeGroup::Ages21Plus => "21+",
        }
    }
}

impl fmt::Display for PlayerAgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Venue-wide default age policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VenueAgeRestriction {
    /// Minors allowed at any time
    MinorsAllowedAllDay,
    /// Minors allowed only inside the venue's minors window
    MinorsAllowedLimitedHours,
    /// No minors at any time
    NoMinorsAgeGate,
}

impl VenueAgeRestriction {
    pub const fn label(self) -> &'static str {
        match self {
            VenueAgeRestriction::MinorsAllowedAllDay => "Minors (<18) Allowed All Day",
            VenueAgeRestriction::MinorsAllowedLimitedHours => "Minors (<18) Allowed Limited Hours",
            VenueAgeRestriction::NoMinorsAgeGate => "No Minors (18+ Only)",
        }
    }

    /// Whether this policy cannot be evaluated without a minors window.
    pub const fn requires_minors_window(self) -> bool {
        matches!(self, VenueAgeRestriction::MinorsAllowedLimitedHours)
    }
}

impl fmt::Display for VenueAgeRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Restriction carried by a single table, or applied uniformly by a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableAgeRestriction {
    #[serde(rename = "RESTRICTED_TO_UNDER_18")]
    RestrictedToUnder18,
    #[serde(rename = "RESTRICTED_TO_AGES_21_PLUS")]
    RestrictedToAges21Plus,
}

impl TableAgeRestriction {
    pub const fn label(self) -> &'static str {
        match self {
            TableAgeRestriction::RestrictedToUnder18 => "<18 only",
            TableAgeRestriction::RestrictedToAges21Plus => "21+ only",
        }
    }
}

impl fmt::Display for TableAgeRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The restriction that binds at a point of access, whatever scope it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum RestrictionKind {
    Unrestricted,
    Venue(VenueAgeRestriction),
    Table(TableAgeRestriction),
}

impl RestrictionKind {
    /// Row of this kind in the admission table.
    pub(crate) const fn index(self) -> usize {
        match self {
            RestrictionKind::Unrestricted => 0,
            RestrictionKind::Venue(VenueAgeRestriction::MinorsAllowedAllDay) => 1,
            RestrictionKind::Venue(VenueAgeRestriction::MinorsAllowedLimitedHours) => 2,
            RestrictionKind::Venue(VenueAgeRestriction::NoMinorsAgeGate) => 3,
            RestrictionKind::Table(TableAgeRestriction::RestrictedToUnder18) => 4,
            RestrictionKind::Table(TableAgeRestriction::RestrictedToAges21Plus) => 5,
        }
    }
}

impl fmt::Display for RestrictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestrictionKind::Unrestricted => write!(f, "Unrestricted"),
            RestrictionKind::Venue(v) => write!(f, "{v}"),
            RestrictionKind::Table(t) => write!(f, "{t}"),
        }
    }
}
