//! Monster generation
//!
//! Monsters are rolled fresh for every encounter and scale with the
//! player's level.

use rand::seq::SliceRandom;
use rand::Rng;

const PREFIXES: &[&str] = &["Furious", "Ancient", "Mighty", "Eerie", "Cunning"];
const TYPES: &[&str] = &["Goblin", "Orc", "Troll", "Skeleton", "Zombie", "Spider", "Wolf"];
const SUFFIXES: &[&str] = &["Destroyer", "Slayer", "Devourer", "Guardian", "Overlord"];

/// Roll below this for "prefix type"
const PREFIX_CHANCE: f64 = 0.3;
/// Roll below this (and above the prefix band) for "type suffix"
const SUFFIX_CHANCE: f64 = 0.5;

/// A monster met in a monster room
#[derive(Debug, Clone, PartialEq)]
pub struct Monster {
    pub name: String,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub damage: i32,
    pub experience_reward: u32,
    pub gold_reward: u32,
}

impl Monster {
    /// Roll a monster of the given level
    pub fn generate(level: u32, rng: &mut impl Rng) -> Self {
        let name = generate_name(rng);
        let gold_roll: u32 = rng.gen_range(5..=20);
        let mut monster = Self::with_stats(name, level);
        monster.gold_reward = gold_roll * level;
        monster
    }

    /// Monster with the level-derived stats and no gold
    pub fn with_stats(name: impl Into<String>, level: u32) -> Self {
        let health = 20 + 10 * level as i32;
        Self {
            name: name.into(),
            level,
            health,
            max_health: health,
            damage: 5 + level as i32,
            experience_reward: 10 * level,
            gold_reward: 0,
        }
    }

    /// Returns whether the monster is still alive
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health = (self.health - amount).max(0);
        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Build a monster name from the word lists
pub fn generate_name(rng: &mut impl Rng) -> String {
    let roll: f64 = rng.gen();

    if roll < PREFIX_CHANCE {
        let prefix = pick(PREFIXES, rng);
        format!("{} {}", prefix, pick(TYPES, rng))
    } else if roll < SUFFIX_CHANCE {
        let kind = pick(TYPES, rng);
        format!("{} {}", kind, pick(SUFFIXES, rng))
    } else {
        pick(TYPES, rng).to_string()
    }
}

fn pick(list: &[&'static str], rng: &mut impl Rng) -> &'static str {
    list.choose(rng).copied().unwrap_or("Beast")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_level_scaling() {
        let mut rng = StdRng::seed_from_u64(1);
        for level in 1..=6 {
            let m = Monster::generate(level, &mut rng);
            assert_eq!(m.health, 20 + 10 * level as i32);
            assert_eq!(m.max_health, m.health);
            assert_eq!(m.damage, 5 + level as i32);
            assert_eq!(m.experience_reward, 10 * level);
            assert_eq!(m.gold_reward % level, 0);
            assert!((5 * level..=20 * level).contains(&m.gold_reward));
        }
    }

    #[test]
    fn test_level_one_matches_encounter_baseline() {
        let m = Monster::with_stats("Goblin", 1);
        assert_eq!(m.health, 30);
        assert_eq!(m.damage, 6);
        assert_eq!(m.experience_reward, 10);
    }

    #[test]
    fn test_names_come_from_word_lists() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut saw_bare = false;
        let mut saw_compound = false;
        for _ in 0..300 {
            let name = generate_name(&mut rng);
            let words: Vec<&str> = name.split(' ').collect();
            match words.as_slice() {
                [kind] => {
                    assert!(TYPES.contains(kind));
                    saw_bare = true;
                }
                [first, second] => {
                    let prefixed = PREFIXES.contains(first) && TYPES.contains(second);
                    let suffixed = TYPES.contains(first) && SUFFIXES.contains(second);
                    assert!(prefixed || suffixed, "unexpected name {}", name);
                    saw_compound = true;
                }
                _ => panic!("unexpected name {}", name),
            }
        }
        assert!(saw_bare && saw_compound);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut m = Monster::with_stats("Wolf", 1);
        assert!(m.take_damage(10));
        assert!(!m.take_damage(100));
        assert_eq!(m.health, 0);
    }
}
