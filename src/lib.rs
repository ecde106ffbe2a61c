//! Cryptcrawl - A text-driven dungeon crawl
//!
//! Wander a grid of rooms, fight what lurks in them, fill your pack
//! and find the way out.

pub mod game;
pub mod world;
pub mod entities;
pub mod combat;
pub mod items;
pub mod progression;
pub mod ui;
pub mod save;
pub mod data;

// Re-export commonly used types
pub use data::GameConfig;
pub use game::{Game, GameState};
pub use world::{Direction, GameMap, Position};
