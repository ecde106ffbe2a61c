//! Map data structure
//!
//! The square grid of rooms making up the dungeon.

use serde::{Deserialize, Serialize};

use super::room::{Room, RoomType};

/// Default side length of the dungeon grid
pub const DEFAULT_MAP_SIZE: usize = 6;
/// Largest supported side length
pub const MAX_MAP_SIZE: usize = 64;

/// Glyph for the player on the minimap
pub const PLAYER_GLYPH: char = '@';
/// Glyph for a visited room with nothing special in it
pub const VISITED_GLYPH: char = '.';
/// Glyph for an unexplored room
pub const UNKNOWN_GLYPH: char = '#';

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in a direction (may be out of bounds)
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Cardinal movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Grid offset; north is towards row 0
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn key(&self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        }
    }
}

/// The dungeon grid
#[derive(Debug, Clone)]
pub struct GameMap {
    size: usize,
    rooms: Vec<Room>,
}

impl GameMap {
    /// Build a map from rooms in row-major order. `rooms.len()` must be `size * size`.
    pub(crate) fn from_rooms(size: usize, rooms: Vec<Room>) -> Self {
        debug_assert_eq!(rooms.len(), size * size);
        Self { size, rooms }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Position of the exit cell
    pub fn exit_pos(&self) -> Position {
        let last = self.size as i32 - 1;
        Position::new(last, last)
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        let size = self.size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    #[inline]
    fn idx(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.size + pos.x as usize)
        } else {
            None
        }
    }

    /// Get the room at a position
    pub fn room_at(&self, pos: Position) -> Option<&Room> {
        self.idx(pos).map(|i| &self.rooms[i])
    }

    pub fn room_at_mut(&mut self, pos: Position) -> Option<&mut Room> {
        match self.idx(pos) {
            Some(i) => Some(&mut self.rooms[i]),
            None => None,
        }
    }

    pub fn mark_visited(&mut self, pos: Position) {
        if let Some(room) = self.room_at_mut(pos) {
            room.visited = true;
        }
    }

    pub fn mark_processed(&mut self, pos: Position) {
        if let Some(room) = self.room_at_mut(pos) {
            room.processed = true;
        }
    }

    /// Directions that stay inside the grid from `pos`
    pub fn available_directions(&self, pos: Position) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| self.in_bounds(pos.step(*d)))
            .collect()
    }

    /// Iterate over all rooms with their positions
    pub fn rooms(&self) -> impl Iterator<Item = (Position, &Room)> + '_ {
        self.rooms.iter().enumerate().map(move |(i, room)| {
            let pos = Position::new((i % self.size) as i32, (i / self.size) as i32);
            (pos, room)
        })
    }

    /// Glyph for a cell on the minimap.
    /// Special room types always show, visited or not.
    pub fn minimap_glyph(&self, pos: Position, player: Position) -> char {
        if pos == player {
            return PLAYER_GLYPH;
        }
        match self.room_at(pos) {
            Some(room) if room.room_type != RoomType::Empty => room.room_type.glyph(),
            Some(room) if room.visited => VISITED_GLYPH,
            _ => UNKNOWN_GLYPH,
        }
    }

    /// Minimap rows, top row first
    pub fn minimap_rows(&self, player: Position) -> Vec<String> {
        (0..self.size as i32)
            .map(|y| {
                (0..self.size as i32)
                    .map(|x| self.minimap_glyph(Position::new(x, y), player).to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}
