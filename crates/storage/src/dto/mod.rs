pub mod ranking;
pub mod submission;
pub mod vote;
