//! # gw-panel
//!
//! The annual indicator panel used by every Goodwill computation pass:
//! record and panel types with an invariant-enforcing constructor, the
//! fixed literal 2010–2024 dataset, a seeded synthetic generator for
//! 2005–2024, and the closed-interval year-range filter.
//!
//! A [`Panel`] holds one record per year over a contiguous span. Panels
//! are immutable; filtering produces a new panel rather than mutating in
//! place.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod literal;
mod panel;
mod synthetic;

pub use literal::{literal_panel, LITERAL_END_YEAR, LITERAL_START_YEAR};
pub use panel::{IndicatorRecord, Panel, INDICATORS};
pub use synthetic::{generate_synthetic_panel, SyntheticConfig};
