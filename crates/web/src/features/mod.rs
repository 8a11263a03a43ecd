pub mod rankings;
pub mod submissions;
pub mod votes;
