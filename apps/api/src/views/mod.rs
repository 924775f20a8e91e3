//! Read-only projections built on top of normalized workers and the learner fixture.

pub mod learner_progress;
pub mod learning_paths;
pub mod skill_gaps;
