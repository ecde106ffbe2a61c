//! Room events
//!
//! What happens when the player walks into a room that still has
//! something in it.

use rand::Rng;

use crate::combat::RoundReport;
use crate::entities::Player;
use crate::items::{templates, Item};

/// Chance that carrying a torch reveals a trap in time
pub const TORCH_SAVE_CHANCE: f64 = 0.6;

/// Result of arriving in a room
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    Nothing,
    Treasure { item: Item, gold: u32 },
    /// A fight has started; see `Game::encounter`
    MonsterAppears { name: String, level: u32 },
    Trap(TrapOutcome),
    Shop,
    Exit { highscore_recorded: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapOutcome {
    /// The torch gave the trap away
    Avoided,
    /// `damage` is the rolled damage before armor
    Sprung { damage: i32, survived: bool },
}

/// Spoils of a won fight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rewards {
    pub experience: u32,
    pub gold: u32,
    pub score: u32,
    pub levels_gained: u32,
    pub total_kills: u32,
}

/// One resolved combat round plus rewards if it ended the fight in victory
#[derive(Debug, Clone, PartialEq)]
pub struct CombatTurn {
    pub report: RoundReport,
    pub rewards: Option<Rewards>,
}

/// Hand out a random treasure and a pile of gold
pub fn loot_treasure(player: &mut Player, rng: &mut impl Rng) -> RoomEvent {
    let mut pool = templates::treasures();
    let item = pool.swap_remove(rng.gen_range(0..pool.len()));
    let gold = rng.gen_range(20..=100);

    player.add_item(item.clone());
    player.gold = player.gold.saturating_add(gold);
    player.score = player.score.saturating_add(item.value.max(0) as u32);

    log::debug!("Treasure: {} and {} gold", item.name, gold);
    RoomEvent::Treasure { item, gold }
}

/// Spring a trap on the player
pub fn spring_trap(player: &mut Player, rng: &mut impl Rng) -> TrapOutcome {
    let damage = rng.gen_range(10..=30);

    if player.has_item_named(templates::TORCH_NAME) && rng.gen_bool(TORCH_SAVE_CHANCE) {
        log::debug!("Trap avoided thanks to the torch");
        return TrapOutcome::Avoided;
    }

    let survived = player.take_damage(damage);
    log::debug!("Trap dealt {} damage, survived: {}", damage, survived);
    TrapOutcome::Sprung { damage, survived }
}

/// Apply the spoils of a slain monster
pub fn claim_rewards(player: &mut Player, experience: u32, gold: u32) -> Rewards {
    let levels_gained = player.add_experience(experience);
    let score = experience.saturating_mul(2);
    player.gold = player.gold.saturating_add(gold);
    player.score = player.score.saturating_add(score);
    player.kills = player.kills.saturating_add(1);

    Rewards {
        experience,
        gold,
        score,
        levels_gained,
        total_kills: player.kills,
    }
}
