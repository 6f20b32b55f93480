//! The river map carried by a game log, and who owns what on it.

mod board;
mod map;

pub use board::{Board, PunterScore};
pub use map::RiverMap;
