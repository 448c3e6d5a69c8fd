//! Age model: age groups, restriction kinds and the entity snapshots the
//! engine evaluates.

pub mod age;
pub mod clock;
pub mod entities;

pub use age::{PlayerAgeGroup, RestrictionKind, TableAgeRestriction, VenueAgeRestriction};
pub use clock::ClockTime;
pub use entities::{
    AgeOverride, OverrideId, Player, PlayerId, Table, TableId, Tournament, TournamentId, Venue,
    VenueId,
};
