//! Time-of-day windows.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ClockTime;

/// Whether `now` falls inside `[start, end)`.
///
/// A missing bound means the window is not configured and yields `false`;
/// callers that need to tell "not configured" apart from "closed" use
/// [`window_status`]. When `end < start` the window runs overnight.
pub fn is_within_window(start: Option<ClockTime>, end: Option<ClockTime>, now: ClockTime) -> bool {
    match (start, end) {
        (Some(start), Some(end)) if start <= end => now >= start && now < end,
        (Some(start), Some(end)) => now >= start || now < end,
        _ => false,
    }
}

/// State of a window at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowStatus {
    NotConfigured,
    Open,
    Closed,
}

pub fn window_status(start: Option<ClockTime>, end: Option<ClockTime>, now: ClockTime) -> WindowStatus {
    if start.is_none() || end.is_none() {
        WindowStatus::NotConfigured
    } else if is_within_window(start, end, now) {
        WindowStatus::Open
    } else {
        WindowStatus::Closed
    }
}

/// Pair of optional bounds as configured on a venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: Option<ClockTime>,
    pub end: Option<ClockTime>,
}

impl TimeWindow {
    pub fn new(start: Option<ClockTime>, end: Option<ClockTime>) -> Self {
        Self { start, end }
    }

    pub fn is_configured(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Exactly one bound set.
    pub fn is_half_configured(&self) -> bool {
        self.start.is_some() != self.end.is_some()
    }

    pub fn is_overnight(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if e < s)
    }

    pub fn contains(&self, now: ClockTime) -> bool {
        is_within_window(self.start, self.end, now)
    }

    pub fn status(&self, now: ClockTime) -> WindowStatus {
        window_status(self.start, self.end, now)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(start), Some(end)) => write!(f, "{start}-{end}"),
            _ => write!(f, "not configured"),
        }
    }
}
