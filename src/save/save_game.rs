//! Game save/load system
//!
//! Handles saving and loading the session to/from a JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::entities::Player;
use crate::items::Item;
use crate::progression::XP_PER_LEVEL;
use crate::world::{generate_map, GameMap, Position, RoomType, MAX_MAP_SIZE};

/// Save error types
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no saved game found at {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid save data: {0}")]
    InvalidData(String),
    #[error("no game in progress")]
    NoSession,
}

/// Complete save data structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub player: PlayerSaveData,
    pub map: MapSaveData,
    pub timestamp: String,
    /// Seconds played so far
    #[serde(default)]
    pub playtime: f64,
}

/// Player-specific save data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSaveData {
    pub name: String,
    pub health: i32,
    #[serde(alias = "maxHealth")]
    pub max_health: i32,
    pub position: (i32, i32),
    pub gold: u32,
    pub score: u32,
    pub level: u32,
    pub experience: u32,
    pub kills: u32,
    pub inventory: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor: Option<Item>,
}

/// Map save data, rooms keyed by `"x,y"`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapSaveData {
    pub size: usize,
    pub rooms: BTreeMap<String, RoomSaveData>,
}

/// Room save data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSaveData {
    /// `None` when the file names a type this version does not know
    #[serde(rename = "type", default, deserialize_with = "lenient_room_type")]
    pub room_type: Option<RoomType>,
    pub visited: bool,
    pub processed: bool,
}

impl PlayerSaveData {
    pub fn capture(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            health: player.health,
            max_health: player.max_health,
            position: (player.position.x, player.position.y),
            gold: player.gold,
            score: player.score,
            level: player.level,
            experience: player.experience,
            kills: player.kills,
            inventory: player.inventory.clone(),
            weapon: player.weapon.clone(),
            armor: player.armor.clone(),
        }
    }

    /// Build a fresh player and overwrite it with the saved values.
    /// Levels too high to have an experience threshold are rejected.
    pub fn restore(&self) -> Result<Player, SaveError> {
        if self.level.checked_mul(XP_PER_LEVEL).is_none() {
            return Err(SaveError::InvalidData(format!("level {} is out of range", self.level)));
        }

        let mut player = Player::new(self.name.clone());
        player.health = self.health.clamp(0, self.max_health.max(0));
        player.max_health = self.max_health;
        player.position = Position::new(self.position.0, self.position.1);
        player.gold = self.gold;
        player.score = self.score;
        player.level = self.level.max(1);
        player.experience = self.experience;
        player.kills = self.kills;
        player.inventory = self.inventory.clone();
        player.weapon = self.weapon.clone();
        player.armor = self.armor.clone();
        Ok(player)
    }
}

impl MapSaveData {
    pub fn capture(map: &GameMap) -> Self {
        let rooms = map
            .rooms()
            .map(|(pos, room)| {
                (
                    room_key(pos),
                    RoomSaveData {
                        room_type: Some(room.room_type),
                        visited: room.visited,
                        processed: room.processed,
                    },
                )
            })
            .collect();
        Self { size: map.size(), rooms }
    }

    /// Generate a fresh map of the saved size and copy the saved room state onto it.
    /// Room types are restored when they parse; the exit stays pinned to its corner.
    pub fn restore(&self, rng: &mut impl Rng) -> Result<GameMap, SaveError> {
        if self.size < 2 {
            return Err(SaveError::InvalidData(format!("map size {} is too small", self.size)));
        }
        if self.size > MAX_MAP_SIZE {
            return Err(SaveError::InvalidData(format!("map size {} is too large", self.size)));
        }

        let mut map = generate_map(self.size, rng);
        let exit_pos = map.exit_pos();

        for (key, saved) in &self.rooms {
            let pos = parse_room_key(key)
                .ok_or_else(|| SaveError::InvalidData(format!("bad room key {:?}", key)))?;
            let Some(room) = map.room_at_mut(pos) else {
                continue;
            };

            room.visited = saved.visited;
            room.processed = saved.processed;

            if pos == exit_pos {
                continue;
            }
            match saved.room_type {
                Some(RoomType::Exit) | None => {}
                Some(room_type) if room_type != room.room_type => {
                    room.room_type = room_type;
                    room.description = room_type.random_description(rng).to_string();
                }
                Some(_) => {}
            }
        }
        Ok(map)
    }
}

impl SaveData {
    /// Snapshot a running session
    pub fn capture(player: &Player, map: &GameMap, playtime: f64) -> Self {
        Self {
            player: PlayerSaveData::capture(player),
            map: MapSaveData::capture(map),
            timestamp: iso_timestamp(),
            playtime,
        }
    }
}

/// Current local time in ISO-8601
pub fn iso_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Unknown or missing room type names read as `None` instead of failing the load
fn lenient_room_type<'de, D>(deserializer: D) -> Result<Option<RoomType>, D::Error>
where
    D: Deserializer<'de>,
{
    let name: Option<String> = Option::deserialize(deserializer)?;
    Ok(name.and_then(|name| {
        RoomType::deserialize(name.into_deserializer())
            .map_err(|e: serde::de::value::Error| log::warn!("Unknown room type in save: {}", e))
            .ok()
    }))
}

fn room_key(pos: Position) -> String {
    format!("{},{}", pos.x, pos.y)
}

fn parse_room_key(key: &str) -> Option<Position> {
    let (x, y) = key.split_once(',')?;
    Some(Position::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

/// Check if a save file exists
pub fn save_exists(path: &Path) -> bool {
    path.exists()
}

/// Write the save file, replacing any previous one
pub fn save_game(path: &Path, data: &SaveData) -> Result<(), SaveError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;

    log::info!("Game saved to {:?}", path);
    Ok(())
}

/// Read and parse the save file
pub fn load_game(path: &Path) -> Result<SaveData, SaveError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SaveError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    let save: SaveData = serde_json::from_str(&data)?;

    log::info!("Game loaded from {:?}", path);
    Ok(save)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::templates;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seasoned_player() -> Player {
        let mut p = Player::new("Aria");
        p.health = 73;
        p.max_health = 140;
        p.position = Position::new(3, 2);
        p.gold = 412;
        p.score = 275;
        p.level = 3;
        p.experience = 120;
        p.kills = 7;
        for item in templates::starter_kit() {
            p.add_item(item);
        }
        p.add_item(templates::treasures()[4].clone());
        p.weapon = Some(templates::wooden_sword());
        p.armor = Some(templates::leather_jerkin());
        p
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("savegame.json");
        let mut rng = StdRng::seed_from_u64(8);
        let map = generate_map(6, &mut rng);
        let player = seasoned_player();

        save_game(&path, &SaveData::capture(&player, &map, 321.5)).unwrap();
        assert!(save_exists(&path));

        let loaded = load_game(&path).unwrap();
        let restored = loaded.player.restore().unwrap();
        assert_eq!(restored, player);
        assert!((loaded.playtime - 321.5).abs() < 1e-6);
    }

    #[test]
    fn test_json_layout() {
        let mut rng = StdRng::seed_from_u64(8);
        let map = generate_map(3, &mut rng);
        let mut player = Player::new("Aria");
        player.add_item(templates::torch());
        let value = serde_json::to_value(SaveData::capture(&player, &map, 1.0)).unwrap();

        assert_eq!(value["player"]["max_health"], 100);
        assert_eq!(value["player"]["position"], serde_json::json!([0, 0]));
        assert_eq!(value["player"]["inventory"][0]["type"], "other");
        assert!(value["player"].get("weapon").is_none());
        assert_eq!(value["map"]["size"], 3);
        assert_eq!(value["map"]["rooms"]["2,2"]["type"], "EXIT");
        assert_eq!(value["map"]["rooms"]["0,0"]["visited"], true);
        assert!(value["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_restore_copies_flags_and_types() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut map = generate_map(4, &mut rng);
        let pos = Position::new(1, 2);
        {
            let room = map.room_at_mut(pos).unwrap();
            room.room_type = RoomType::Shop;
            room.visited = true;
        }
        map.mark_processed(Position::new(3, 0));
        let saved = MapSaveData::capture(&map);

        let mut other_rng = StdRng::seed_from_u64(999);
        let restored = saved.restore(&mut other_rng).unwrap();
        assert_eq!(restored.size(), 4);
        let room = restored.room_at(pos).unwrap();
        assert_eq!(room.room_type, RoomType::Shop);
        assert!(room.visited);
        assert!(restored.room_at(Position::new(3, 0)).unwrap().processed);
        assert_eq!(restored.room_at(Position::new(3, 3)).unwrap().room_type, RoomType::Exit);
        for (p, r) in restored.rooms() {
            assert_eq!(r.room_type, map.room_at(p).unwrap().room_type);
        }
    }

    #[test]
    fn test_restore_tolerates_unknown_types() {
        let mut rooms = BTreeMap::new();
        rooms.insert(
            "1,0".to_string(),
            RoomSaveData { room_type: None, visited: true, processed: true },
        );
        rooms.insert(
            "9,9".to_string(),
            RoomSaveData { room_type: Some(RoomType::Empty), visited: true, processed: true },
        );
        let saved = MapSaveData { size: 3, rooms };
        let map = saved.restore(&mut StdRng::seed_from_u64(1)).unwrap();
        assert!(map.room_at(Position::new(1, 0)).unwrap().processed);
    }

    #[test]
    fn test_restore_rejects_bad_data() {
        let saved = MapSaveData { size: 1, rooms: BTreeMap::new() };
        assert!(matches!(
            saved.restore(&mut StdRng::seed_from_u64(1)),
            Err(SaveError::InvalidData(_))
        ));

        let mut rooms = BTreeMap::new();
        rooms.insert(
            "one,two".to_string(),
            RoomSaveData { room_type: Some(RoomType::Empty), visited: false, processed: false },
        );
        let saved = MapSaveData { size: 3, rooms };
        assert!(saved.restore(&mut StdRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn test_accepts_camel_case_max_health() {
        let json = r#"{
            "name": "Old", "health": 10, "maxHealth": 120, "position": [1, 1],
            "gold": 5, "score": 0, "level": 2, "experience": 3, "kills": 0,
            "inventory": [], "weapon": null
        }"#;
        let saved: PlayerSaveData = serde_json::from_str(json).unwrap();
        let player = saved.restore().unwrap();
        assert_eq!(player.max_health, 120);
        assert!(player.weapon.is_none());
    }

    #[test]
    fn test_unknown_room_type_names_read_as_none() {
        let json = r#"{"size": 2, "rooms": {
            "1,0": {"type": "DRAGON", "visited": true, "processed": false},
            "0,1": {"type": "SHOP", "visited": false, "processed": false}
        }}"#;
        let saved: MapSaveData = serde_json::from_str(json).unwrap();
        assert_eq!(saved.rooms["1,0"].room_type, None);
        assert_eq!(saved.rooms["0,1"].room_type, Some(RoomType::Shop));

        let map = saved.restore(&mut StdRng::seed_from_u64(5)).unwrap();
        assert!(map.room_at(Position::new(1, 0)).unwrap().visited);
        assert_eq!(map.room_at(Position::new(0, 1)).unwrap().room_type, RoomType::Shop);
    }

    #[test]
    fn test_restore_rejects_oversized_map() {
        let saved = MapSaveData { size: 3_000_000_000, rooms: BTreeMap::new() };
        assert!(matches!(
            saved.restore(&mut StdRng::seed_from_u64(1)),
            Err(SaveError::InvalidData(_))
        ));

        let saved = MapSaveData { size: MAX_MAP_SIZE, rooms: BTreeMap::new() };
        assert_eq!(saved.restore(&mut StdRng::seed_from_u64(1)).unwrap().size(), MAX_MAP_SIZE);
    }

    #[test]
    fn test_restore_rejects_runaway_level() {
        let mut saved = PlayerSaveData::capture(&seasoned_player());
        saved.level = 50_000_000;
        assert!(matches!(saved.restore(), Err(SaveError::InvalidData(_))));

        saved.level = u32::MAX / XP_PER_LEVEL;
        let player = saved.restore().unwrap();
        assert_eq!(player.experience_to_next(), (u32::MAX / XP_PER_LEVEL) * XP_PER_LEVEL);
    }

    #[test]
    fn test_missing_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(load_game(&missing), Err(SaveError::NotFound(_))));

        let corrupt = dir.path().join("bad.json");
        fs::write(&corrupt, "{ not json").unwrap();
        assert!(matches!(load_game(&corrupt), Err(SaveError::Parse(_))));
    }
}
