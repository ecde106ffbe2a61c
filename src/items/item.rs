//! Item definitions
//!
//! Equipment, consumables and loot carried by the player.

use serde::{Deserialize, Serialize};

/// Main item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Potion,
    Treasure,
    Key,
    #[serde(other)]
    Other,
}

impl ItemKind {
    /// Heading used when grouping the inventory by kind
    pub fn group_name(&self) -> &'static str {
        match self {
            ItemKind::Weapon => "Weapons",
            ItemKind::Armor => "Armor",
            ItemKind::Potion => "Potions",
            ItemKind::Treasure => "Treasures",
            ItemKind::Key => "Keys",
            ItemKind::Other => "Miscellaneous",
        }
    }

    /// Check if this kind can go into an equipment slot
    pub fn is_equipment(&self) -> bool {
        matches!(self, ItemKind::Weapon | ItemKind::Armor)
    }
}

/// A single item.
///
/// `value` depends on the kind: damage bonus for weapons, damage reduction
/// for armor, heal amount for potions and score for treasures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub value: i32,
}

impl Item {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: ItemKind, value: i32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            value,
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.name, self.description)
    }
}

/// Item templates
pub mod templates {
    use super::{Item, ItemKind};

    /// Name of the item that helps spot traps
    pub const TORCH_NAME: &str = "Torch";

    pub fn wooden_sword() -> Item {
        Item::new("Wooden Sword", "A beginner's simple weapon", ItemKind::Weapon, 2)
    }

    pub fn leather_jerkin() -> Item {
        Item::new("Leather Jerkin", "Light protection", ItemKind::Armor, 1)
    }

    pub fn small_health_potion() -> Item {
        Item::new("Small Health Potion", "Restores 30 HP", ItemKind::Potion, 30)
    }

    pub fn large_health_potion() -> Item {
        Item::new("Large Health Potion", "Restores 60 HP", ItemKind::Potion, 60)
    }

    pub fn dungeon_map() -> Item {
        Item::new("Dungeon Map", "Shows where you are", ItemKind::Other, 0)
    }

    pub fn torch() -> Item {
        Item::new(TORCH_NAME, "Lights the way and reveals traps", ItemKind::Other, 0)
    }

    /// Items every new hero starts with; the first two go into the equipment slots
    pub fn starter_kit() -> Vec<Item> {
        vec![
            wooden_sword(),
            leather_jerkin(),
            small_health_potion(),
            dungeon_map(),
            torch(),
        ]
    }

    /// Loot pool for treasure rooms
    pub fn treasures() -> Vec<Item> {
        vec![
            Item::new("Gold Ingot", "Precious metal", ItemKind::Treasure, 50),
            Item::new("Magic Amulet", "A mysterious artifact", ItemKind::Treasure, 75),
            Item::new("Ancient Scroll", "Notes of long-dead sages", ItemKind::Treasure, 60),
            Item::new("Gemstone", "A sparkling jewel", ItemKind::Treasure, 40),
            Item::new("Royal Crown", "A costly regalia", ItemKind::Treasure, 100),
        ]
    }
}
