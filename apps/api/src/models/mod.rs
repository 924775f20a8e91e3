pub mod learner;
pub mod raw;
pub mod worker;
