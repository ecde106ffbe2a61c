//! Game module - Core game logic and state management

mod command;
mod events;
mod state;

pub use command::{is_yes, Command};
pub use events::{CombatTurn, Rewards, RoomEvent, TrapOutcome, TORCH_SAVE_CHANCE};
pub use state::{Game, GameState, Outcome, SessionSummary};
