//! Domain entities.

mod player;

pub use player::Player;
