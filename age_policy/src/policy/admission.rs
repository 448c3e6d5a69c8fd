//! Which age groups each restriction admits.
//!
//! The rules live in [`ADMISSION_TABLE`], one row per restriction kind and one
//! column per age group, so they can be audited without reading control flow.

use serde::{Deserialize, Serialize};

use super::{restriction::ResolvedRestriction, window::WindowStatus};
use crate::model::{PlayerAgeGroup, RestrictionKind};

/// Admission rule for one (restriction, age group) cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Admit,
    Deny,
    /// Admitted only while the venue's minors window is open
    MinorsWindow,
    /// Admitted unless an 18-20 window is configured and closed
    Ages18To20Window,
}

use Gate::{Admit, Ages18To20Window, Deny, MinorsWindow};

/// Rows follow `RestrictionKind::index`, columns follow `PlayerAgeGroup::index`
/// (`<18`, `18-20`, `21+`).
pub static ADMISSION_TABLE: [[Gate; 3]; 6] = [
    // Unrestricted
    [Admit, Admit, Admit],
    // MinorsAllowedAllDay
    [Admit, Ages18To20Window, Admit],
    // MinorsAllowedLimitedHours
    [MinorsWindow, Ages18To20Window, Admit],
    // NoMinorsAgeGate
    [Deny, Ages18To20Window, Admit],
    // RestrictedToUnder18
    [Admit, Deny, Deny],
    // RestrictedToAges21Plus
    [Deny, Deny, Admit],
];

pub fn gate(kind: RestrictionKind, age: PlayerAgeGroup) -> Gate {
    ADMISSION_TABLE[kind.index()][age.index()]
}

/// Which window turned a player away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowKind {
    Minors,
    #[serde(rename = "AGES_18_20")]
    Ages18To20,
}

/// Result of applying the table to one player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    NotAdmitted,
    OutsideWindow(WindowKind),
}

impl Admission {
    pub fn is_admitted(self) -> bool {
        matches!(self, Admission::Admitted)
    }
}

/// Apply the admission table, resolving window gates against the window
/// states captured in `restriction`.
pub fn admit(restriction: &ResolvedRestriction, age: PlayerAgeGroup) -> Admission {
    match gate(restriction.kind, age) {
        Admit => Admission::Admitted,
        Deny => Admission::NotAdmitted,
        MinorsWindow => match restriction.minors.status {
            WindowStatus::Open => Admission::Admitted,
            WindowStatus::Closed => Admission::OutsideWindow(WindowKind::Minors),
            // The resolver rejects a limited-hours venue without a window.
            WindowStatus::NotConfigured => Admission::NotAdmitted,
        },
        Ages18To20Window => match restriction.ages_18_to_20.status {
            WindowStatus::Closed => Admission::OutsideWindow(WindowKind::Ages18To20),
            WindowStatus::Open | WindowStatus::NotConfigured => Admission::Admitted,
        },
    }
}
