//! World module
//!
//! The room grid, room types and procedural generation.

pub mod map;
pub mod room;
pub mod generation;

pub use map::{Direction, GameMap, Position, DEFAULT_MAP_SIZE, MAX_MAP_SIZE};
pub use room::{room_type_info, Room, RoomType, RoomTypeInfo};
pub use generation::generate_map;
