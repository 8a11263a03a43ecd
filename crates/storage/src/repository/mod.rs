pub mod comparison;
pub mod rating;
pub mod submission;
pub mod voting_progress;
