pub mod comparison;
pub mod rating;
pub mod submission;
pub mod voting_progress;

pub use comparison::{Comparison, Winner};
pub use rating::RatingRecord;
pub use submission::Submission;
pub use voting_progress::VotingProgress;
