//! Save/load system
//!
//! Handles the save file and the highscore table.

pub mod save_game;
pub mod highscores;

pub use save_game::{
    SaveData, SaveError, PlayerSaveData, MapSaveData, RoomSaveData,
    save_game, load_game, save_exists, iso_timestamp,
};

pub use highscores::{
    HighscoreEntry, TOP_ENTRIES,
    load_highscores, append_highscore, top_scores, format_playtime,
};
