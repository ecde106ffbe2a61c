//! Game state machine
//!
//! Owns the map, the hero and the RNG, and drives transitions between the
//! menu, exploration and the end of a run.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::combat::{CombatAction, Encounter, RoundOutcome};
use crate::data::GameConfig;
use crate::entities::{EquipError, Monster, Player, DEFAULT_NAME};
use crate::items::{templates, Item, Shop, ShopError};
use crate::progression::rating_for_score;
use crate::save::{
    append_highscore, iso_timestamp, load_game, save_game, HighscoreEntry, SaveData, SaveError,
};
use crate::world::{generate_map, Direction, GameMap, Room, RoomType};

use super::events::{claim_rewards, loot_treasure, spring_trap, CombatTurn, RoomEvent, TrapOutcome};

/// The main game struct that holds all game data
pub struct Game {
    /// Current game state
    state: GameState,
    config: GameConfig,
    map: GameMap,
    /// None until a run is started or loaded
    player: Option<Player>,
    shop: Shop,
    /// Fight in progress, if any
    encounter: Option<Encounter>,
    /// Set on arrival in a room, cleared once its event has been resolved
    arrival_armed: bool,
    /// Random number generator (seeded for reproducibility)
    rng: StdRng,
    /// When the current session started
    run_start: Instant,
    /// Seconds carried over from a loaded save
    playtime_offset: f64,
}

/// All possible game states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Main menu screen
    Menu,
    /// Exploring the dungeon
    Playing,
    /// Reached the exit
    Win,
    /// Player died
    Lose,
    /// Exit the game
    Quit,
}

impl GameState {
    /// Whether the run is over
    pub fn is_finished(&self) -> bool {
        matches!(self, GameState::Win | GameState::Lose)
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
    Abandoned,
}

/// End-of-session statistics
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub outcome: Outcome,
    pub name: String,
    /// Seconds played
    pub playtime: f64,
    pub score: u32,
    pub items: usize,
    pub health: i32,
    pub max_health: i32,
    pub gold: u32,
    pub kills: u32,
    pub level: u32,
    pub rating: &'static str,
}

impl Game {
    /// Create a game seeded from the config, or from entropy
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a game with an explicit RNG
    pub fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let map = generate_map(config.map_size, &mut rng);
        Self {
            state: GameState::Menu,
            config,
            map,
            player: None,
            shop: Shop::new(),
            encounter: None,
            arrival_armed: false,
            rng,
            run_start: Instant::now(),
            playtime_offset: 0.0,
        }
    }

    /// Get the current game state
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Set a new game state
    pub fn set_state(&mut self, state: GameState) {
        log::debug!("State transition: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    /// Start a fresh run with the starter kit
    pub fn start_new_game(&mut self, name: &str) {
        let name = match name.trim() {
            "" => DEFAULT_NAME,
            trimmed => trimmed,
        };

        let mut player = Player::new(name);
        for item in templates::starter_kit() {
            player.add_item(item);
        }
        let gear: Vec<usize> = player
            .inventory
            .iter()
            .enumerate()
            .filter(|(_, item)| item.kind.is_equipment())
            .map(|(idx, _)| idx)
            .collect();
        for idx in gear {
            if let Err(e) = player.equip(idx) {
                log::warn!("Starter gear: {}", e);
            }
        }

        self.map = generate_map(self.config.map_size, &mut self.rng);
        self.player = Some(player);
        self.encounter = None;
        self.arrival_armed = true;
        self.run_start = Instant::now();
        self.playtime_offset = 0.0;
        self.set_state(GameState::Playing);

        log::info!("New game started for {}", name);
    }

    /// Equip the weapon or armor at this pack index
    pub fn equip(&mut self, index: usize) -> Result<Item, EquipError> {
        let player = self.player.as_mut().ok_or(EquipError::NoHero)?;
        let item = player.equip(index)?.clone();
        log::debug!("{} equipped {}", player.name, item.name);
        Ok(item)
    }

    /// Room the player is standing in
    pub fn current_room(&self) -> Option<&Room> {
        let player = self.player.as_ref()?;
        self.map.room_at(player.position)
    }

    /// Directions that lead to another room
    pub fn available_directions(&self) -> Vec<Direction> {
        match &self.player {
            Some(player) => self.map.available_directions(player.position),
            None => Vec::new(),
        }
    }

    /// Step one room. Out-of-bounds moves are rejected without side effects.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        if self.state != GameState::Playing || self.encounter.is_some() {
            return false;
        }
        let Some(player) = self.player.as_mut() else {
            return false;
        };

        let target = player.position.step(direction);
        if !self.map.in_bounds(target) {
            return false;
        }

        player.position = target;
        self.map.mark_visited(target);
        self.arrival_armed = true;
        log::debug!("Moved {} to ({}, {})", direction.name(), target.x, target.y);
        true
    }

    /// Whether arriving here still has something to resolve
    pub fn has_pending_event(&self) -> bool {
        self.state == GameState::Playing
            && self.arrival_armed
            && self.encounter.is_none()
            && self.current_room().is_some_and(Room::has_pending_event)
    }

    /// Resolve the arrival event of the current room
    pub fn resolve_room_event(&mut self) -> RoomEvent {
        if !self.has_pending_event() {
            return RoomEvent::Nothing;
        }
        self.arrival_armed = false;

        let Some(player) = self.player.as_mut() else {
            return RoomEvent::Nothing;
        };
        let pos = player.position;
        let Some(room_type) = self.map.room_at(pos).map(|r| r.room_type) else {
            return RoomEvent::Nothing;
        };
        log::debug!("{} room at ({}, {})", room_type.name(), pos.x, pos.y);

        match room_type {
            RoomType::Empty => RoomEvent::Nothing,
            RoomType::Treasure => {
                let event = loot_treasure(player, &mut self.rng);
                self.map.mark_processed(pos);
                event
            }
            RoomType::Monster => {
                let monster = Monster::generate(player.level, &mut self.rng);
                let event = RoomEvent::MonsterAppears {
                    name: monster.name.clone(),
                    level: monster.level,
                };
                self.encounter = Some(Encounter::new(monster));
                event
            }
            RoomType::Trap => {
                let outcome = spring_trap(player, &mut self.rng);
                self.map.mark_processed(pos);
                if let TrapOutcome::Sprung { survived: false, .. } = outcome {
                    log::info!("Killed by a trap");
                    self.set_state(GameState::Lose);
                }
                RoomEvent::Trap(outcome)
            }
            RoomType::Shop => RoomEvent::Shop,
            RoomType::Exit => {
                self.set_state(GameState::Win);
                log::info!("Exit reached");
                let highscore_recorded = match self.record_highscore() {
                    Ok(()) => true,
                    Err(e) => {
                        log::warn!("Failed to record highscore: {}", e);
                        false
                    }
                };
                RoomEvent::Exit { highscore_recorded }
            }
        }
    }

    /// Play one round of the current fight
    pub fn combat_round(&mut self, action: CombatAction) -> Option<CombatTurn> {
        let player = self.player.as_mut()?;
        let encounter = self.encounter.as_mut()?;

        let report = encounter.play_round(player, action, &mut self.rng);
        let mut rewards = None;

        match report.outcome {
            RoundOutcome::Victory => {
                let monster = encounter.monster();
                log::info!("Defeated {} in {} rounds", monster.name, encounter.rounds());
                rewards = Some(claim_rewards(
                    player,
                    monster.experience_reward,
                    monster.gold_reward,
                ));
                self.map.mark_processed(player.position);
                self.encounter = None;
            }
            RoundOutcome::Defeat => {
                log::info!("Slain by {}", encounter.monster().name);
                self.encounter = None;
                self.set_state(GameState::Lose);
            }
            RoundOutcome::Fled => {
                log::debug!("Fled from {}", encounter.monster().name);
                self.encounter = None;
            }
            RoundOutcome::Continue | RoundOutcome::NoPotion => {}
        }

        Some(CombatTurn { report, rewards })
    }

    /// Buy a ware by 0-based catalog index
    pub fn buy(&mut self, index: usize) -> Result<Item, ShopError> {
        let player = self.player.as_mut().ok_or(ShopError::NoCustomer)?;
        let item = self.shop.buy(player, index)?;
        log::debug!("Bought {}", item.name);
        Ok(item)
    }

    /// Enter LOSE if the hero has run out of health
    pub fn check_vitals(&mut self) {
        let dead = self.player.as_ref().is_some_and(|p| !p.is_alive());
        if self.state == GameState::Playing && dead {
            self.set_state(GameState::Lose);
        }
    }

    /// Seconds played in this run, including time from a loaded save
    pub fn playtime(&self) -> f64 {
        self.playtime_offset + self.run_start.elapsed().as_secs_f64()
    }

    /// Write the current run to the save file
    pub fn save(&self) -> Result<(), SaveError> {
        let player = self.player.as_ref().ok_or(SaveError::NoSession)?;
        let data = SaveData::capture(player, &self.map, self.playtime());
        save_game(&self.config.save_file, &data)
    }

    /// Replace the current run with the saved one.
    /// On failure nothing in memory changes.
    pub fn load(&mut self) -> Result<(), SaveError> {
        let data = load_game(&self.config.save_file)?;
        let map = data.map.restore(&mut self.rng)?;
        let player = data.player.restore()?;

        if !map.in_bounds(player.position) {
            return Err(SaveError::InvalidData(format!(
                "position ({}, {}) is outside a {}x{} map",
                player.position.x,
                player.position.y,
                map.size(),
                map.size()
            )));
        }

        log::info!("Resuming {} from {}", player.name, data.timestamp);
        self.map = map;
        self.player = Some(player);
        self.encounter = None;
        self.arrival_armed = true;
        self.run_start = Instant::now();
        self.playtime_offset = data.playtime.max(0.0);
        self.set_state(GameState::Playing);
        Ok(())
    }

    /// Append this run to the highscore table
    pub fn record_highscore(&self) -> Result<(), SaveError> {
        let player = self.player.as_ref().ok_or(SaveError::NoSession)?;
        let entry = HighscoreEntry {
            name: player.name.clone(),
            score: player.score,
            level: player.level,
            kills: player.kills,
            gold: player.gold,
            playtime: self.playtime(),
            timestamp: iso_timestamp(),
        };
        append_highscore(&self.config.highscore_file, entry)
    }

    /// Abandon the run and go back to the main menu
    pub fn quit_to_menu(&mut self) {
        self.encounter = None;
        log::info!("Run abandoned");
        self.set_state(GameState::Menu);
    }

    /// Leave the game from the main menu
    pub fn quit(&mut self) {
        self.set_state(GameState::Quit);
    }

    /// Statistics for the end-of-session screen
    pub fn summary(&self) -> Option<SessionSummary> {
        let player = self.player.as_ref()?;
        let outcome = match self.state {
            GameState::Win => Outcome::Victory,
            GameState::Lose => Outcome::Defeat,
            _ => Outcome::Abandoned,
        };
        Some(SessionSummary {
            outcome,
            name: player.name.clone(),
            playtime: self.playtime(),
            score: player.score,
            items: player.inventory.len(),
            health: player.health,
            max_health: player.max_health,
            gold: player.gold,
            kills: player.kills,
            level: player.level,
            rating: rating_for_score(player.score),
        })
    }

    #[cfg(test)]
    pub(crate) fn map_mut(&mut self) -> &mut GameMap {
        &mut self.map
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }
}
