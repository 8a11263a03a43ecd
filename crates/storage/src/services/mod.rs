pub mod elo;
pub mod pair_selection;
pub mod quota;
pub mod rank_resolution;
pub mod vote_processing;
