//! Policy building blocks: override resolution, time windows, binding
//! restriction resolution and the admission table.
//!
//! These are the evaluator's internal collaborators. They are public so they
//! can be tested and audited in isolation, but callers normally go through
//! [`crate::eligibility`].

pub mod admission;
pub mod overrides;
pub mod restriction;
pub mod window;

pub use admission::{ADMISSION_TABLE, Admission, Gate, WindowKind, admit};
pub use overrides::{active_override, resolve_effective_age};
pub use restriction::{ResolvedRestriction, RestrictionScope, WindowCheck, resolve_binding_restriction};
pub use window::{TimeWindow, WindowStatus, is_within_window, window_status};
