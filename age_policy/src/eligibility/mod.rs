//! Eligibility checks for players, tables and tournament starts.
//!
//! Every check returns an [`EligibilityVerdict`]. Being refused is a normal
//! outcome (`allowed: false` plus reasons); an [`EligibilityError`] means the
//! input itself was malformed or incomplete.

pub mod batch;
pub mod errors;
pub mod evaluator;
pub mod hours;
pub mod notices;
pub mod verdict;

pub use batch::{available_tables_for_player, validate_table_closure, validate_tournament_start};
pub use errors::{EligibilityError, EligibilityResult};
pub use evaluator::{validate_player_table_assignment, validate_player_tournament_eligibility};
pub use hours::{HoursIssue, MIN_WINDOW_MINUTES, validate_venue_hours};
pub use notices::{override_warning_message, player_removal_warning};
pub use verdict::{BatchEntry, EligibilityVerdict, EntryError, Reason, Subject, Warning};
