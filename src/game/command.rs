//! Command parsing
//!
//! Maps typed input to exploration commands. Matching is case-insensitive
//! and accepts English words and Russian aliases for movement.

use crate::world::Direction;

/// A command typed while exploring
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Map,
    Inventory,
    Help,
    Save,
    Load,
    QuitToMenu,
    /// Equip the pack item at this 0-based index
    Equip(usize),
    Unknown(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        let cmd = input.trim().to_lowercase();

        if let Some(direction) = parse_direction(&cmd) {
            return Command::Move(direction);
        }

        let known = match cmd.as_str() {
            "m" | "map" | "карта" => Some(Command::Map),
            "i" | "inv" | "inventory" | "инвентарь" => Some(Command::Inventory),
            "h" | "help" | "?" | "помощь" => Some(Command::Help),
            "save" | "сохранить" => Some(Command::Save),
            "l" | "load" | "загрузить" => Some(Command::Load),
            "q" | "quit" | "выход" => Some(Command::QuitToMenu),
            _ => parse_equip(&cmd),
        };
        known.unwrap_or(Command::Unknown(cmd))
    }
}

/// Movement words. A bare `s` is always south.
fn parse_direction(cmd: &str) -> Option<Direction> {
    match cmd {
        "n" | "north" | "с" | "север" => Some(Direction::North),
        "s" | "south" | "ю" | "юг" => Some(Direction::South),
        "e" | "east" | "в" | "восток" => Some(Direction::East),
        "w" | "west" | "з" | "запад" => Some(Direction::West),
        _ => None,
    }
}

fn parse_equip(cmd: &str) -> Option<Command> {
    let (word, arg) = cmd.split_once(char::is_whitespace)?;
    if !matches!(word, "equip" | "eq") {
        return None;
    }
    let number: usize = arg.trim().parse().ok()?;
    number.checked_sub(1).map(Command::Equip)
}

/// Answer to a yes/no prompt
pub fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes" | "д" | "да")
}
