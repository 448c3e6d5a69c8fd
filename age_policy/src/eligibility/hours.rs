//! Venue time-window configuration checks.

use serde::Serialize;
use std::fmt;

use crate::{
    model::{ClockTime, Venue, VenueId},
    policy::{TimeWindow, WindowKind},
};

/// Shortest window an operator may configure, in minutes
pub const MIN_WINDOW_MINUTES: u32 = 60;

/// Problem with a venue's configured windows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum HoursIssue {
    /// Limited-hours policy with no minors window
    MinorsWindowRequired { venue_id: VenueId },

    /// Only one bound of a window set
    HalfConfigured {
        venue_id: VenueId,
        window_kind: WindowKind,
    },

    /// Start equals end, so the window never opens
    EmptyWindow {
        venue_id: VenueId,
        window_kind: WindowKind,
    },

    TooShort {
        venue_id: VenueId,
        window_kind: WindowKind,
        minutes: u32,
    },
}

impl fmt::Display for HoursIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoursIssue::MinorsWindowRequired { venue_id } => write!(
                f,
                "Venue {venue_id}: minor start and end times are required for this age restriction setting"
            ),
            HoursIssue::HalfConfigured {
                venue_id,
                window_kind,
            } => write!(
                f,
                "Venue {venue_id}: {} window needs both a start and an end time",
                kind_label(*window_kind)
            ),
            HoursIssue::EmptyWindow {
                venue_id,
                window_kind,
            } => write!(
                f,
                "Venue {venue_id}: {} window end time must differ from start time",
                kind_label(*window_kind)
            ),
            HoursIssue::TooShort {
                venue_id,
                window_kind,
                minutes,
            } => write!(
                f,
                "Venue {venue_id}: {} window is {minutes} minutes, it must be at least 1 hour",
                kind_label(*window_kind)
            ),
        }
    }
}

fn kind_label(kind: WindowKind) -> &'static str {
    match kind {
        WindowKind::Minors => "minors",
        WindowKind::Ages18To20 => "18-20",
    }
}

fn minutes_of_day(t: ClockTime) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Length of a fully configured window, wrapping past midnight.
fn window_minutes(start: ClockTime, end: ClockTime) -> u32 {
    let (s, e) = (minutes_of_day(start), minutes_of_day(end));
    if e >= s { e - s } else { 24 * 60 - s + e }
}

fn check_window(venue_id: &VenueId, kind: WindowKind, window: TimeWindow, issues: &mut Vec<HoursIssue>) {
    if window.is_half_configured() {
        issues.push(HoursIssue::HalfConfigured {
            venue_id: venue_id.clone(),
            window_kind: kind,
        });
        return;
    }
    let (Some(start), Some(end)) = (window.start, window.end) else {
        return;
    };
    match window_minutes(start, end) {
        0 => issues.push(HoursIssue::EmptyWindow {
            venue_id: venue_id.clone(),
            window_kind: kind,
        }),
        minutes if minutes < MIN_WINDOW_MINUTES => issues.push(HoursIssue::TooShort {
            venue_id: venue_id.clone(),
            window_kind: kind,
            minutes,
        }),
        _ => {}
    }
}

/// Check a venue's window configuration before it is saved.
///
/// Returns every issue found, empty when the configuration is usable.
/// Overnight windows (end before start) are valid.
pub fn validate_venue_hours(venue: &Venue) -> Vec<HoursIssue> {
    let mut issues = Vec::new();
    let minors = venue.minors_window();

    if venue.age_restriction.requires_minors_window() && !minors.is_configured() && !minors.is_half_configured() {
        issues.push(HoursIssue::MinorsWindowRequired {
            venue_id: venue.id.clone(),
        });
    }
    check_window(&venue.id, WindowKind::Minors, minors, &mut issues);
    check_window(&venue.id, WindowKind::Ages18To20, venue.ages_18_to_20_window(), &mut issues);

    issues
}
