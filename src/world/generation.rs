//! Procedural map generation
//!
//! Fills the grid by weighted draws, then pins the safe start and the exit.

use rand::seq::SliceRandom;
use rand::Rng;

use super::map::{GameMap, Position};
use super::room::{Room, RoomType, EXIT_DESCRIPTION};

/// Room types that can come out of the weighted draw
const DRAWABLE: [RoomType; 5] = [
    RoomType::Empty,
    RoomType::Treasure,
    RoomType::Monster,
    RoomType::Trap,
    RoomType::Shop,
];

/// Draw a room type by generation weight (never the exit)
pub fn roll_room_type(rng: &mut impl Rng) -> RoomType {
    DRAWABLE
        .choose_weighted(rng, |t| t.weight())
        .copied()
        .unwrap_or(RoomType::Empty)
}

/// Generate a square map of `size` rooms per side.
/// `(0,0)` is an empty, already explored start and the far corner is the exit.
pub fn generate_map(size: usize, rng: &mut impl Rng) -> GameMap {
    let size = size.max(1);
    let rooms = (0..size * size)
        .map(|_| {
            let room_type = roll_room_type(rng);
            Room::new(room_type, room_type.random_description(rng))
        })
        .collect();
    let mut map = GameMap::from_rooms(size, rooms);

    if let Some(start) = map.room_at_mut(Position::new(0, 0)) {
        start.room_type = RoomType::Empty;
        start.visited = true;
        start.processed = true;
    }

    let exit_pos = map.exit_pos();
    if let Some(exit) = map.room_at_mut(exit_pos) {
        exit.room_type = RoomType::Exit;
        exit.description = EXIT_DESCRIPTION.to_string();
    }

    log::debug!("Generated {}x{} dungeon", size, size);
    map
}
