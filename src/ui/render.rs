//! Text screens
//!
//! Every screen is built as a `String` so the console driver only has to
//! write it out.

use std::fmt::Write;

use crate::combat::{monster_health_fill, CombatAction, RoundOutcome};
use crate::entities::{Monster, Player, INVENTORY_CAPACITY};
use crate::game::{CombatTurn, Outcome, SessionSummary};
use crate::items::{Item, ItemKind, Shop};
use crate::save::{format_playtime, HighscoreEntry};
use crate::world::{Direction, GameMap, Position, Room, RoomType};

const RULE_WIDTH: usize = 50;
const HEALTH_BAR_WIDTH: usize = 20;
const EXPERIENCE_BAR_WIDTH: usize = 15;
const MONSTER_BAR_WIDTH: usize = 15;
const HIGHSCORE_NAME_WIDTH: usize = 18;

const FILLED: char = '█';
const EMPTY: char = '░';

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Banner with a centred title between two rules
fn banner(title: &str) -> String {
    format!("{rule}\n{title:^width$}\n{rule}\n", rule = rule(), width = RULE_WIDTH)
}

fn bar(filled: usize, width: usize) -> String {
    let filled = filled.min(width);
    let mut s = String::with_capacity(width * 3);
    s.extend(std::iter::repeat(FILLED).take(filled));
    s.extend(std::iter::repeat(EMPTY).take(width - filled));
    s
}

/// Truncate a string to fit within max_len characters, adding "…" if truncated
pub fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else if max_len <= 1 {
        "…".to_string()
    } else {
        let truncated: String = name.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    }
}

pub fn title() -> String {
    let mut out = rule();
    out.push_str("\n  CRYPTCRAWL\n  Find the way out before the dungeon finds you.\n");
    out.push_str(&rule());
    out.push('\n');
    out
}

pub fn main_menu() -> String {
    let mut out = banner("MAIN MENU");
    out.push_str("1. New game\n");
    out.push_str("2. Continue\n");
    out.push_str("3. Highscores\n");
    out.push_str("4. How to play\n");
    out.push_str("5. Exit\n");
    out.push_str(&rule());
    out.push('\n');
    out
}

pub fn help() -> String {
    let mut out = banner("HOW TO PLAY");
    out.push_str(
        "Goal: find the exit (>) in the far corner of the dungeon.\n\
         \n\
         Movement:\n\
         \x20 N / north / с / север   go north\n\
         \x20 S / south / ю / юг      go south\n\
         \x20 E / east  / в / восток  go east\n\
         \x20 W / west  / з / запад   go west\n\
         \n\
         Commands:\n\
         \x20 M        map\n\
         \x20 I        inventory and stats\n\
         \x20 equip N  equip pack item N\n\
         \x20 save     save the game\n\
         \x20 L        load the last save\n\
         \x20 H        this help\n\
         \x20 Q        quit to the main menu\n\
         \n\
         Combat: 1 attack, 2 defend (halves the next hit), 3 drink a potion,\n\
         4 try to flee (60%).\n\
         \n\
         Rooms: $ treasure, M monster, ^ trap, S shop, > exit.\n\
         A torch gives you a good chance to spot traps in time.\n",
    );
    out.push_str(&rule());
    out.push('\n');
    out
}

/// Character sheet with health and experience bars
pub fn player_stats(player: &Player) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "HERO: {} (level {})", player.name, player.level);
    let _ = writeln!(
        out,
        "HEALTH: [{}] {}/{}",
        bar(player.health_bar_fill(HEALTH_BAR_WIDTH), HEALTH_BAR_WIDTH),
        player.health,
        player.max_health
    );
    let _ = writeln!(
        out,
        "EXP:    [{}] {}/{}",
        bar(player.experience_bar_fill(EXPERIENCE_BAR_WIDTH), EXPERIENCE_BAR_WIDTH),
        player.experience,
        player.experience_to_next()
    );
    let _ = writeln!(out, "GOLD: {}  SCORE: {}  KILLS: {}", player.gold, player.score, player.kills);
    let weapon = player.weapon.as_ref().map_or("none".to_string(), |w| format!("{} (+{})", w.name, w.value));
    let armor = player.armor.as_ref().map_or("none".to_string(), |a| format!("{} (+{})", a.name, a.value));
    let _ = writeln!(out, "WEAPON: {}", weapon);
    let _ = writeln!(out, "ARMOR:  {}", armor);
    let _ = writeln!(out, "{}", rule());
    out
}

/// Pack contents grouped by kind. Numbers are pack positions for `equip N`.
pub fn inventory(player: &Player) -> String {
    let mut out = format!(
        "INVENTORY ({}/{}):\n",
        player.inventory.len(),
        INVENTORY_CAPACITY
    );
    if player.inventory.is_empty() {
        out.push_str("  Your pack is empty.\n");
        return out;
    }

    // Only the first copy of an equipped item carries the marker
    let first_copy = |slot: &Option<Item>| {
        slot.as_ref()
            .and_then(|gear| player.inventory.iter().position(|item| item == gear))
    };
    let equipped = [first_copy(&player.weapon), first_copy(&player.armor)];

    let kinds = [
        ItemKind::Weapon,
        ItemKind::Armor,
        ItemKind::Potion,
        ItemKind::Treasure,
        ItemKind::Key,
        ItemKind::Other,
    ];
    for kind in kinds {
        let group: Vec<_> = player
            .inventory
            .iter()
            .enumerate()
            .filter(|(_, item)| item.kind == kind)
            .collect();
        if group.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  {}:", kind.group_name());
        for (idx, item) in group {
            let marker = if equipped.contains(&Some(idx)) { " [equipped]" } else { "" };
            let _ = writeln!(out, "    {}. {}{}", idx + 1, item, marker);
        }
    }
    out
}

/// Minimap and legend
pub fn minimap(map: &GameMap, player: Position) -> String {
    let mut out = banner("DUNGEON MAP");
    for row in map.minimap_rows(player) {
        let _ = writeln!(out, "  {}", row);
    }
    let _ = writeln!(out, "{}", rule());
    out.push_str("LEGEND:\n");
    out.push_str("  @ you  . visited  # unknown\n");
    let specials: Vec<String> = RoomType::ALL
        .iter()
        .filter(|t| **t != RoomType::Empty)
        .map(|t| format!("{} {}", t.glyph(), t.name().to_lowercase()))
        .collect();
    let _ = writeln!(out, "  {}", specials.join("  "));
    out.push_str(&rule());
    out.push('\n');
    out
}

/// Where the player stands and what the room looks like
pub fn location(pos: Position, room: &Room) -> String {
    format!("Position: [{}, {}]\n{}\n", pos.x, pos.y, room.description)
}

/// Exits and meta-commands at the end of a turn
pub fn directions(dirs: &[Direction]) -> String {
    let mut out = banner("WHERE NEXT?");
    if dirs.is_empty() {
        out.push_str("No way onward!\n");
    } else {
        out.push_str("Available directions:\n");
        for dir in dirs {
            let _ = writeln!(out, "  {} - {}", dir.key(), dir.name());
        }
    }
    out.push_str("\nOther commands:\n");
    out.push_str("  M - map, I - inventory, H - help, equip N\n");
    out.push_str("  save - save, L - load, Q - quit to menu\n");
    out
}

pub fn monster_health(monster: &Monster) -> String {
    format!(
        "[{}] {}/{}",
        bar(monster_health_fill(monster, MONSTER_BAR_WIDTH), MONSTER_BAR_WIDTH),
        monster.health.max(0),
        monster.max_health
    )
}

/// Both fighters and the action menu
pub fn combat_status(player: &Player, monster: &Monster) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(40));
    let _ = writeln!(out, "Your health: {}/{}", player.health, player.max_health);
    let _ = writeln!(out, "{}: {}", monster.name, monster_health(monster));
    let _ = writeln!(out, "{}", "=".repeat(40));
    out.push_str("\nChoose an action:\n");
    out.push_str("1. Attack\n");
    out.push_str("2. Defend (halves the monster's hit)\n");
    out.push_str("3. Drink a potion\n");
    out.push_str("4. Try to flee (60% chance)\n");
    out
}

/// What happened in one combat round
pub fn combat_turn(turn: &CombatTurn, monster_name: &str, player: &Player) -> String {
    let report = &turn.report;
    let mut out = String::new();

    match report.action {
        CombatAction::Attack => {
            if let Some(dealt) = report.dealt {
                let _ = writeln!(out, "You deal {} damage!", dealt);
            }
        }
        CombatAction::Defend => out.push_str("You raise your shield. The next blow will be weaker.\n"),
        CombatAction::UsePotion => {
            if let Some(potion) = &report.potion {
                let _ = writeln!(out, "You drink {}! Restored {} health", potion.name, potion.value);
            }
        }
        CombatAction::Flee => {
            if report.flee_failed {
                out.push_str("You fail to escape! The monster attacks!\n");
            }
        }
        CombatAction::Hesitate => out.push_str("Invalid choice! The monster attacks!\n"),
    }

    if let Some(hit) = report.monster_hit {
        if report.action == CombatAction::Defend {
            let _ = writeln!(out, "Your guard cuts the blow down to {}", hit);
        }
        let _ = writeln!(out, "{} hits you for {} damage!", monster_name, hit);
    }

    match report.outcome {
        RoundOutcome::NoPotion => out.push_str("You have no potions!\n"),
        RoundOutcome::Fled => out.push_str("You got away!\n"),
        RoundOutcome::Defeat => out.push_str("\nYOU FELL IN BATTLE!\n"),
        RoundOutcome::Victory => {
            let _ = writeln!(out, "\nYou defeated {}!", monster_name);
            if let Some(rewards) = &turn.rewards {
                let _ = writeln!(out, "+{} experience", rewards.experience);
                let _ = writeln!(out, "+{} gold", rewards.gold);
                let _ = writeln!(out, "+{} points", rewards.score);
                let _ = writeln!(out, "Monsters slain: {}", rewards.total_kills);
                if rewards.levels_gained > 0 {
                    let _ = writeln!(out, "\nLEVEL UP! You are now level {}!", player.level);
                    let _ = writeln!(out, "Max health raised to {}", player.max_health);
                }
            }
        }
        RoundOutcome::Continue => {}
    }
    out
}

/// Numbered catalog with an affordability marker
pub fn shop_listing(shop: &Shop, player: &Player) -> String {
    let mut out = String::from("\nWARES:\n");
    for (idx, (item, price)) in shop.listing().enumerate() {
        let marker = if player.gold >= price { "+" } else { "x" };
        let _ = writeln!(out, "{} {}. {} - {} gold", marker, idx + 1, item, price);
    }
    let _ = writeln!(out, "\nYour gold: {}", player.gold);
    out.push_str("Pick an item number to buy or Q to leave\n");
    out
}

fn medal(rank: usize) -> &'static str {
    match rank {
        1 => "[G]",
        2 => "[S]",
        3 => "[B]",
        _ => "   ",
    }
}

/// Highscore table, best first
pub fn highscores(entries: &[HighscoreEntry]) -> String {
    let mut out = banner("HIGHSCORES");
    if entries.is_empty() {
        out.push_str("\n  Nothing here yet...\n  Be the first champion!\n");
    } else {
        let _ = writeln!(
            out,
            "\n #    {:<width$} {:>6} {:>5} {:>6}",
            "Name",
            "Score",
            "Level",
            "Time",
            width = HIGHSCORE_NAME_WIDTH
        );
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        for (idx, entry) in entries.iter().enumerate() {
            let rank = idx + 1;
            let _ = writeln!(
                out,
                "{:2}.{} {:<width$} {:>6} {:>5} {:>6}",
                rank,
                medal(rank),
                truncate_name(&entry.name, HIGHSCORE_NAME_WIDTH),
                entry.score,
                entry.level,
                format_playtime(entry.playtime),
                width = HIGHSCORE_NAME_WIDTH
            );
        }
    }
    out.push_str(&rule());
    out.push('\n');
    out
}

/// End-of-session screen
pub fn summary(summary: &SessionSummary) -> String {
    let (headline, tagline) = match summary.outcome {
        Outcome::Victory => ("CONGRATULATIONS!", "You made it out of the dungeon!"),
        Outcome::Defeat => ("GAME OVER", "Your adventure ended in failure..."),
        Outcome::Abandoned => ("GAME ABANDONED", "The dungeon will wait for you."),
    };
    let total = summary.playtime.max(0.0) as u64;

    let mut out = String::new();
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "{}\n{}", headline, tagline);
    let _ = writeln!(out, "{}", rule());
    out.push_str("\nFINAL STATS:\n");
    let _ = writeln!(out, "Hero: {}", summary.name);
    let _ = writeln!(out, "Playtime: {} min {} sec", total / 60, total % 60);
    let _ = writeln!(out, "Score: {}", summary.score);
    let _ = writeln!(out, "Items collected: {}", summary.items);
    let _ = writeln!(out, "Health left: {}/{}", summary.health, summary.max_health);
    let _ = writeln!(out, "Gold: {}", summary.gold);
    let _ = writeln!(out, "Monsters slain: {}", summary.kills);
    let _ = writeln!(out, "Level: {}", summary.level);
    let _ = writeln!(out, "\nYour rating: {}", summary.rating);
    let _ = writeln!(out, "{}", rule());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::templates;

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Aria", 18), "Aria");
        assert_eq!(truncate_name("Bartholomew the Unending", 18).chars().count(), 18);
        assert!(truncate_name("Bartholomew the Unending", 18).ends_with('…'));
    }

    #[test]
    fn test_bars_in_stats() {
        let mut player = Player::new("Aria");
        player.health = 50;
        let stats = player_stats(&player);
        let health_bar = format!("[{}{}]", "█".repeat(10), "░".repeat(10));
        assert!(stats.contains(&health_bar), "{}", stats);
        assert!(stats.contains("0/100"));
    }

    #[test]
    fn test_inventory_groups_and_numbers() {
        let mut player = Player::new("Aria");
        player.add_item(templates::torch());
        player.add_item(templates::wooden_sword());
        player.equip(1).unwrap();

        let text = inventory(&player);
        assert!(text.starts_with("INVENTORY (2/20)"));
        assert!(text.contains("Weapons:"));
        assert!(text.contains("2. Wooden Sword"));
        assert!(text.contains("[equipped]"));
        // Weapons are listed before miscellaneous items
        assert!(text.find("Weapons").unwrap() < text.find("Miscellaneous").unwrap());
    }

    #[test]
    fn test_only_one_copy_marked_equipped() {
        let mut player = Player::new("Aria");
        player.add_item(templates::wooden_sword());
        player.add_item(templates::wooden_sword());
        player.equip(1).unwrap();

        let text = inventory(&player);
        assert_eq!(text.matches("[equipped]").count(), 1, "{}", text);
        let marked: Vec<_> = text.lines().filter(|l| l.ends_with("[equipped]")).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].trim_start().starts_with("1. Wooden Sword"), "{}", text);
    }

    #[test]
    fn test_shop_marks_affordability() {
        let shop = Shop::new();
        let mut player = Player::new("Aria");
        player.gold = 30;
        let text = shop_listing(&shop, &player);
        assert!(text.contains("+ 1. Small Health Potion"));
        assert!(text.contains("x 2. Large Health Potion"));
        assert!(text.contains("Your gold: 30"));
    }

    #[test]
    fn test_empty_highscores_invite() {
        assert!(highscores(&[]).contains("Be the first champion!"));
    }

    #[test]
    fn test_highscore_rows() {
        let entries = vec![
            HighscoreEntry {
                name: "A very long hero name indeed".to_string(),
                score: 420,
                level: 3,
                kills: 5,
                gold: 80,
                playtime: 125.0,
                timestamp: String::new(),
            },
        ];
        let text = highscores(&entries);
        assert!(text.contains("[G]"));
        assert!(text.contains("02:05"));
        assert!(text.contains("420"));
        assert!(!text.contains("indeed"));
    }

    #[test]
    fn test_victory_turn_lists_rewards() {
        use crate::combat::RoundReport;
        use crate::game::Rewards;

        let mut player = Player::new("Aria");
        player.add_experience(100);
        let turn = CombatTurn {
            report: RoundReport {
                action: CombatAction::Attack,
                dealt: Some(18),
                potion: None,
                flee_failed: false,
                monster_hit: None,
                outcome: RoundOutcome::Victory,
            },
            rewards: Some(Rewards {
                experience: 100,
                gold: 12,
                score: 200,
                levels_gained: 1,
                total_kills: 3,
            }),
        };
        let text = combat_turn(&turn, "Mighty Orc", &player);
        assert!(text.contains("You deal 18 damage!"));
        assert!(text.contains("You defeated Mighty Orc!"));
        assert!(text.contains("+200 points"));
        assert!(text.contains("LEVEL UP! You are now level 2!"));
    }

    #[test]
    fn test_directions_listing() {
        let text = directions(&[Direction::South, Direction::East]);
        assert!(text.contains("S - South"));
        assert!(text.contains("E - East"));
        assert!(!text.contains("N - North"));
    }
}
