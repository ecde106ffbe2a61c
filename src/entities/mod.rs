//! Entities module
//!
//! The player character and the monsters they fight.

pub mod player;
pub mod monster;

pub use player::{EquipError, Player, DEFAULT_NAME, INVENTORY_CAPACITY};
pub use monster::Monster;
