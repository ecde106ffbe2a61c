//! Player character
//!
//! Health, inventory, equipment and progression of the hero.

use rand::Rng;
use thiserror::Error;

use crate::items::{Item, ItemKind};
use crate::progression::xp_for_level;
use crate::world::Position;

/// Health gained on every level-up
pub const LEVEL_UP_HEALTH: i32 = 20;
/// Nominal inventory size shown to the player (not enforced)
pub const INVENTORY_CAPACITY: usize = 20;
/// Name used when the player leaves it blank
pub const DEFAULT_NAME: &str = "Nameless Hero";

/// Base attack roll range (inclusive)
const ATTACK_ROLL_MIN: i32 = 10;
const ATTACK_ROLL_MAX: i32 = 20;

/// The player character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub inventory: Vec<Item>,
    pub position: Position,
    pub gold: u32,
    pub score: u32,
    pub level: u32,
    pub experience: u32,
    pub kills: u32,
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
}

/// Why an item could not be equipped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquipError {
    #[error("there is no item #{0} in your pack")]
    NoSuchItem(usize),
    #[error("{0} cannot be equipped")]
    NotEquipment(String),
    #[error("no game in progress")]
    NoHero,
}

impl Player {
    /// Create a fresh level 1 hero with an empty pack
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            health: 100,
            max_health: 100,
            inventory: Vec::new(),
            position: Position::new(0, 0),
            gold: 100,
            score: 0,
            level: 1,
            experience: 0,
            kills: 0,
            weapon: None,
            armor: None,
        }
    }

    /// Take damage, reduced by armor (never below 1 while armored).
    /// Returns whether the player is still alive.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        let damage = match &self.armor {
            Some(armor) => (amount - armor.value).max(1),
            None => amount,
        };
        self.health = (self.health - damage).max(0);
        self.is_alive()
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    /// Remove the first matching item. Returns false if none was carried.
    pub fn remove_item(&mut self, item: &Item) -> bool {
        match self.inventory.iter().position(|i| i == item) {
            Some(idx) => {
                self.inventory.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Check for an item by name
    pub fn has_item_named(&self, name: &str) -> bool {
        self.inventory.iter().any(|i| i.name == name)
    }

    /// Take the oldest potion out of the pack
    pub fn take_first_potion(&mut self) -> Option<Item> {
        let idx = self.inventory.iter().position(|i| i.kind == ItemKind::Potion)?;
        Some(self.inventory.remove(idx))
    }

    /// Add experience and apply any level-ups. Returns the number of levels gained.
    pub fn add_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let mut gained = 0;
        while self.experience >= xp_for_level(self.level) {
            self.level_up();
            gained += 1;
        }
        gained
    }

    fn level_up(&mut self) {
        self.level = self.level.saturating_add(1);
        self.experience = 0;
        self.max_health = self.max_health.saturating_add(LEVEL_UP_HEALTH);
        self.health = self.max_health;
        log::info!("{} reached level {}", self.name, self.level);
    }

    /// Roll attack damage including the weapon bonus
    pub fn attack_damage(&self, rng: &mut impl Rng) -> i32 {
        let base = rng.gen_range(ATTACK_ROLL_MIN..=ATTACK_ROLL_MAX);
        base + self.weapon.as_ref().map_or(0, |w| w.value)
    }

    /// Equip the weapon or armor at `index` in the pack.
    /// The item stays in the pack; the slot holds its own copy.
    pub fn equip(&mut self, index: usize) -> Result<&Item, EquipError> {
        let item = self
            .inventory
            .get(index)
            .cloned()
            .ok_or(EquipError::NoSuchItem(index + 1))?;

        let slot = match item.kind {
            ItemKind::Weapon => &mut self.weapon,
            ItemKind::Armor => &mut self.armor,
            _ => return Err(EquipError::NotEquipment(item.name)),
        };
        let equipped: &Item = slot.insert(item);
        Ok(equipped)
    }

    /// Experience needed for the next level
    pub fn experience_to_next(&self) -> u32 {
        xp_for_level(self.level)
    }

    /// Filled segments of a proportional health bar of `width` cells
    pub fn health_bar_fill(&self, width: usize) -> usize {
        bar_fill(self.health.max(0) as u64, self.max_health.max(1) as u64, width)
    }

    /// Filled segments of a proportional experience bar of `width` cells
    pub fn experience_bar_fill(&self, width: usize) -> usize {
        bar_fill(self.experience as u64, self.experience_to_next().max(1) as u64, width)
    }
}

/// Proportional fill, rounded down and capped at `width`
pub fn bar_fill(current: u64, max: u64, width: usize) -> usize {
    if max == 0 {
        return 0;
    }
    ((current * width as u64) / max).min(width as u64) as usize
}
