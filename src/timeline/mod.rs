//! Year-by-year benefit payment timelines with COLA steps at January
//! boundaries

mod builder;
mod types;

pub use builder::{build_benefit_timeline, months_in_period};
pub use types::{BenefitPhase, LifetimeBenefitResult, TimelineSegment, YearEntry};
