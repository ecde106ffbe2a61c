//! Room definitions
//!
//! Room types, their display metadata, and per-room state.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Types of rooms in the dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    Empty,
    Treasure,
    Monster,
    Trap,
    Shop,
    Exit,
}

/// Static display and generation data for a room type
#[derive(Debug, Clone, Copy)]
pub struct RoomTypeInfo {
    pub name: &'static str,
    pub glyph: char,
    pub weight: u32,
    pub descriptions: &'static [&'static str],
}

/// Description of the forced exit cell
pub const EXIT_DESCRIPTION: &str = "The way out of the dungeon!";

pub fn room_type_info(room_type: RoomType) -> RoomTypeInfo {
    match room_type {
        RoomType::Empty => RoomTypeInfo {
            name: "Empty room",
            glyph: '.',
            weight: 60,
            descriptions: &[
                "An empty stone chamber. Water drips somewhere.",
                "An abandoned hall that smells of mold.",
                "A small room littered with broken crockery.",
                "A pillared hall. Every sound echoes.",
            ],
        },
        RoomType::Treasure => RoomTypeInfo {
            name: "Treasury",
            glyph: '$',
            weight: 15,
            descriptions: &[
                "The room glitters with gold! There must be treasure here!",
                "A chest stands in the middle of the room. Old, but intact.",
                "Gems and coins are scattered across a table.",
            ],
        },
        RoomType::Monster => RoomTypeInfo {
            name: "Monster lair",
            glyph: 'M',
            weight: 15,
            descriptions: &[
                "A growl comes from the darkness... Something is here!",
                "Fresh claw marks score the walls. Be careful!",
                "The air reeks. Something big lives here.",
            ],
        },
        RoomType::Trap => RoomTypeInfo {
            name: "Trapped room",
            glyph: '^',
            weight: 10,
            descriptions: &[
                "The floor looks suspicious... There may be traps.",
                "Arrow slits line the walls. Dangerous!",
                "The floorboards look unreliable.",
            ],
        },
        RoomType::Shop => RoomTypeInfo {
            name: "Shop",
            glyph: 'S',
            weight: 5,
            descriptions: &[
                "A small stall crammed with goods.",
                "An old man behind the counter eyes you with interest.",
                "Shelves sag under items and potions.",
            ],
        },
        RoomType::Exit => RoomTypeInfo {
            name: "Exit",
            glyph: '>',
            weight: 0,
            descriptions: &[
                EXIT_DESCRIPTION,
                "Light seeps into the room. This is the exit!",
                "A door with a golden handle leads to freedom!",
            ],
        },
    }
}

impl RoomType {
    /// Every room type, in declaration order
    pub const ALL: [RoomType; 6] = [
        RoomType::Empty,
        RoomType::Treasure,
        RoomType::Monster,
        RoomType::Trap,
        RoomType::Shop,
        RoomType::Exit,
    ];

    pub fn name(&self) -> &'static str {
        room_type_info(*self).name
    }

    pub fn glyph(&self) -> char {
        room_type_info(*self).glyph
    }

    pub fn weight(&self) -> u32 {
        room_type_info(*self).weight
    }

    /// Pick a flavor description for this room type
    pub fn random_description(&self, rng: &mut impl Rng) -> &'static str {
        room_type_info(*self)
            .descriptions
            .choose(rng)
            .copied()
            .unwrap_or("An unknown room.")
    }
}

/// A single room in the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub room_type: RoomType,
    pub visited: bool,
    pub processed: bool,
    pub description: String,
}

impl Room {
    pub fn new(room_type: RoomType, description: impl Into<String>) -> Self {
        Self {
            room_type,
            visited: false,
            processed: false,
            description: description.into(),
        }
    }

    /// Whether arriving here still has an event to resolve
    pub fn has_pending_event(&self) -> bool {
        !self.processed && self.room_type != RoomType::Empty
    }
}
