//! Turn-based encounters
//!
//! One fight against one monster, resolved a round at a time.

use rand::Rng;

use crate::entities::{Monster, Player};
use crate::items::Item;

/// Chance that fleeing succeeds
pub const FLEE_CHANCE: f64 = 0.6;

/// What the player does this round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    Defend,
    UsePotion,
    Flee,
    /// Unrecognized input: the player does nothing but still gets hit
    Hesitate,
}

impl CombatAction {
    /// Parse the combat menu choice
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => CombatAction::Attack,
            "2" => CombatAction::Defend,
            "3" => CombatAction::UsePotion,
            "4" => CombatAction::Flee,
            _ => CombatAction::Hesitate,
        }
    }
}

/// How a round ended
#[derive(Debug, Clone, PartialEq)]
pub enum RoundOutcome {
    /// Both sides still standing
    Continue,
    /// No potion to drink; the round did not happen
    NoPotion,
    /// Player got away, monster did not act
    Fled,
    /// Monster slain
    Victory,
    /// Player slain
    Defeat,
}

/// Everything that happened in one round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    pub action: CombatAction,
    /// Damage the player dealt
    pub dealt: Option<i32>,
    /// Potion drunk and the health it was worth
    pub potion: Option<Item>,
    /// A flee attempt failed
    pub flee_failed: bool,
    /// Damage the monster swung for (before armor)
    pub monster_hit: Option<i32>,
    pub outcome: RoundOutcome,
}

impl RoundReport {
    fn new(action: CombatAction) -> Self {
        Self {
            action,
            dealt: None,
            potion: None,
            flee_failed: false,
            monster_hit: None,
            outcome: RoundOutcome::Continue,
        }
    }
}

/// An ongoing fight
#[derive(Debug, Clone)]
pub struct Encounter {
    monster: Monster,
    rounds: u32,
}

impl Encounter {
    pub fn new(monster: Monster) -> Self {
        Self { monster, rounds: 0 }
    }

    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    pub fn monster_mut(&mut self) -> &mut Monster {
        &mut self.monster
    }

    /// Rounds actually fought (rejected potion rounds do not count)
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Resolve one round of combat
    pub fn play_round(&mut self, player: &mut Player, action: CombatAction, rng: &mut impl Rng) -> RoundReport {
        let mut report = RoundReport::new(action);

        match action {
            CombatAction::Attack => {
                let damage = player.attack_damage(rng);
                self.monster.take_damage(damage);
                report.dealt = Some(damage);
            }
            CombatAction::Defend => {}
            CombatAction::UsePotion => match player.take_first_potion() {
                Some(potion) => {
                    player.heal(potion.value);
                    report.potion = Some(potion);
                }
                None => {
                    report.outcome = RoundOutcome::NoPotion;
                    return report;
                }
            },
            CombatAction::Flee => {
                if rng.gen_bool(FLEE_CHANCE) {
                    self.rounds += 1;
                    report.outcome = RoundOutcome::Fled;
                    return report;
                }
                report.flee_failed = true;
            }
            CombatAction::Hesitate => {}
        }

        self.rounds += 1;

        if !self.monster.is_alive() {
            report.outcome = RoundOutcome::Victory;
            return report;
        }

        let hit = if action == CombatAction::Defend {
            (self.monster.damage / 2).max(1)
        } else {
            self.monster.damage
        };
        report.monster_hit = Some(hit);

        if !player.take_damage(hit) {
            report.outcome = RoundOutcome::Defeat;
        }
        report
    }
}

/// Filled segments of a monster's health bar
pub fn monster_health_fill(monster: &Monster, width: usize) -> usize {
    crate::entities::player::bar_fill(
        monster.health.max(0) as u64,
        monster.max_health.max(1) as u64,
        width,
    )
}
