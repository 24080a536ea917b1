//! Candidate scoring rubrics.
//!
//! Two rubrics coexist on purpose: the general fitness score used to rank and
//! display candidates (0 to 10, clamped) and the visa sponsorship verdict with
//! its own 0 to 12 sub-score. They read the same `CandidateProfile` snapshot
//! but must never share arithmetic; tuning one cannot silently move the other.
//!
//! Both functions are pure and total. Missing optional fields mean "no bonus",
//! never an error, and repeated calls over the same snapshot return identical
//! results.

mod fitness;
mod sponsorship;

pub use fitness::{score_profile, FitnessBreakdown, ScoreComponent, ScoreFactor, MAX_SCORE};
pub use sponsorship::{evaluate_sponsorship, SponsorshipVerdict};
