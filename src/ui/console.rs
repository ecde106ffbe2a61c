//! Console driver
//!
//! A line-based read-eval loop over any reader and writer. Reaching the end
//! of input ends the session quietly.

use std::io::{BufRead, Write};

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

use crate::combat::CombatAction;
use crate::data::GameConfig;
use crate::game::{is_yes, Command, Game, GameState, Outcome, RoomEvent, TrapOutcome};
use crate::items::ShopError;
use crate::save::{load_highscores, top_scores, SaveError, TOP_ENTRIES};

use super::render;

/// Whether input is still available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Closed,
}

/// Console front end
pub struct Console<R, W> {
    input: R,
    output: W,
    config: GameConfig,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, config: GameConfig) -> Self {
        Self { input, output, config }
    }

    /// Run menus and games until the player leaves or input runs out
    pub fn run(&mut self) -> Result<()> {
        let mut game = Game::new(self.config.clone());
        self.clear()?;
        self.say(render::title())?;

        loop {
            if self.main_menu(&mut game)? == Flow::Closed || game.state() == GameState::Quit {
                return Ok(());
            }

            if self.play(&mut game)? == Flow::Closed {
                return Ok(());
            }
            if let Some(summary) = game.summary() {
                self.say(render::summary(&summary))?;
                if summary.outcome == Outcome::Defeat {
                    log::info!("{} was defeated with {} points", summary.name, summary.score);
                }
            }

            let Some(answer) = self.prompt("\nPlay again? (y/n) ")? else {
                return Ok(());
            };
            if !is_yes(&answer) {
                self.say("\nThanks for playing!\n")?;
                return Ok(());
            }
            game = Game::new(self.config.clone());
        }
    }

    /// Show the main menu until a game starts or the player exits
    fn main_menu(&mut self, game: &mut Game) -> Result<Flow> {
        loop {
            self.say(render::main_menu())?;
            let Some(choice) = self.prompt("Your choice: ")? else {
                return Ok(Flow::Closed);
            };

            match choice.trim() {
                "1" => {
                    let Some(name) = self.prompt("Enter your hero's name: ")? else {
                        return Ok(Flow::Closed);
                    };
                    game.start_new_game(&name);
                    self.welcome(game)?;
                    return Ok(Flow::Continue);
                }
                "2" => match game.load() {
                    Ok(()) => {
                        self.say("Game loaded!\n")?;
                        return Ok(Flow::Continue);
                    }
                    Err(e) => self.report_load_error(&e)?,
                },
                "3" => {
                    let entries = top_scores(load_highscores(&self.config.highscore_file), TOP_ENTRIES);
                    self.clear()?;
                    self.say(render::highscores(&entries))?;
                    if self.pause()? == Flow::Closed {
                        return Ok(Flow::Closed);
                    }
                }
                "4" => {
                    self.clear()?;
                    self.say(render::help())?;
                    if self.pause()? == Flow::Closed {
                        return Ok(Flow::Closed);
                    }
                }
                "5" => {
                    game.quit();
                    self.say("\nGoodbye! Thanks for playing!\n")?;
                    return Ok(Flow::Continue);
                }
                _ => self.say("Invalid choice!\n")?,
            }
        }
    }

    fn welcome(&mut self, game: &Game) -> Result<()> {
        let Some(player) = game.player() else {
            return Ok(());
        };
        let mut text = format!("\nWelcome, {}!\nYou set out with:\n", player.name);
        for item in &player.inventory {
            text.push_str(&format!("  {}\n", item));
        }
        text.push_str(&format!("\nStarting gold: {}\n", player.gold));
        self.say(text)
    }

    /// The exploration loop. Returns when the run is over or abandoned.
    fn play(&mut self, game: &mut Game) -> Result<Flow> {
        while game.state() == GameState::Playing {
            self.clear()?;
            let header = match (game.player(), game.current_room()) {
                (Some(player), Some(room)) => format!(
                    "{}{}",
                    render::player_stats(player),
                    render::location(player.position, room)
                ),
                _ => return Ok(Flow::Continue),
            };
            self.say(header)?;

            if game.has_pending_event() {
                let event = game.resolve_room_event();
                if self.show_event(game, event)? == Flow::Closed {
                    return Ok(Flow::Closed);
                }
            }

            game.check_vitals();
            if game.state() != GameState::Playing {
                if game.state() == GameState::Lose {
                    self.say("\nYOU HAVE DIED...\n")?;
                }
                return self.pause();
            }

            self.say(render::directions(&game.available_directions()))?;
            let Some(line) = self.prompt("> ")? else {
                return Ok(Flow::Closed);
            };
            if self.dispatch(game, Command::parse(&line))? == Flow::Closed {
                return Ok(Flow::Closed);
            }
        }
        Ok(Flow::Continue)
    }

    fn dispatch(&mut self, game: &mut Game, command: Command) -> Result<Flow> {
        match command {
            Command::Move(direction) => {
                if game.move_player(direction) {
                    return Ok(Flow::Continue);
                }
                self.say("You can't go that way!\n")?;
            }
            Command::Map => {
                if let Some(player) = game.player() {
                    let map = render::minimap(game.map(), player.position);
                    self.say(map)?;
                }
            }
            Command::Inventory => {
                if let Some(player) = game.player() {
                    let text = format!("{}{}", render::player_stats(player), render::inventory(player));
                    self.say(text)?;
                }
            }
            Command::Help => self.say(render::help())?,
            Command::Save => match game.save() {
                Ok(()) => self.say("Game saved!\n")?,
                Err(e) => {
                    log::warn!("Save failed: {}", e);
                    self.say(format!("Save failed: {}\n", e))?;
                }
            },
            Command::Load => match game.load() {
                Ok(()) => self.say("Game loaded!\n")?,
                Err(e) => self.report_load_error(&e)?,
            },
            Command::QuitToMenu => {
                let Some(answer) = self.prompt("\nReally quit to the menu? (y/n) ")? else {
                    return Ok(Flow::Closed);
                };
                if is_yes(&answer) {
                    game.quit_to_menu();
                    return Ok(Flow::Continue);
                }
                self.say("Carrying on!\n")?;
                return Ok(Flow::Continue);
            }
            Command::Equip(index) => {
                match game.equip(index) {
                    Ok(item) => self.say(format!("You equip {}.\n", item.name))?,
                    Err(e) => self.say(format!("Can't equip that: {}\n", e))?,
                }
            }
            Command::Unknown(_) => self.say("Unknown command. Type 'h' for help.\n")?,
        }
        self.pause()
    }

    fn show_event(&mut self, game: &mut Game, event: RoomEvent) -> Result<Flow> {
        match event {
            RoomEvent::Nothing => {}
            RoomEvent::Treasure { item, gold } => {
                let total = game.player().map_or(0, |p| p.gold);
                self.say(format!(
                    "\nYOU FOUND TREASURE!\nYou got: {} (+{} points)\nFound {} gold\nYou now have {} gold\n",
                    item.name, item.value, gold, total
                ))?;
            }
            RoomEvent::MonsterAppears { name, level } => {
                self.say(format!("\nA MONSTER ATTACKS!\nBefore you stands {} (level {})!\n", name, level))?;
                return self.fight(game);
            }
            RoomEvent::Trap(TrapOutcome::Avoided) => {
                self.say("\nYOU TRIGGERED A TRAP!\nThanks to your torch you spotted it in time!\n")?;
            }
            RoomEvent::Trap(TrapOutcome::Sprung { damage, survived }) => {
                self.say(format!("\nYOU TRIGGERED A TRAP!\nThe trap deals {} damage!\n", damage))?;
                if !survived {
                    self.say("\nTHE TRAP KILLED YOU!\n")?;
                }
            }
            RoomEvent::Shop => return self.shop(game),
            RoomEvent::Exit { highscore_recorded } => {
                self.say("\nYOU FOUND THE WAY OUT OF THE DUNGEON!\nVICTORY!\n")?;
                if highscore_recorded {
                    self.say("Your run has been added to the highscore table!\n")?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Combat sub-loop, one action per round
    fn fight(&mut self, game: &mut Game) -> Result<Flow> {
        loop {
            let (status, monster_name) = match (game.player(), game.encounter()) {
                (Some(player), Some(encounter)) => (
                    render::combat_status(player, encounter.monster()),
                    encounter.monster().name.clone(),
                ),
                _ => return Ok(Flow::Continue),
            };
            self.say(status)?;

            let Some(line) = self.prompt("> ")? else {
                return Ok(Flow::Closed);
            };
            let Some(turn) = game.combat_round(CombatAction::parse(&line)) else {
                return Ok(Flow::Continue);
            };
            if let Some(player) = game.player() {
                let text = render::combat_turn(&turn, &monster_name, player);
                self.say(text)?;
            }
        }
    }

    /// Shop sub-loop. Invalid input re-prompts; `q` leaves.
    fn shop(&mut self, game: &mut Game) -> Result<Flow> {
        self.say("\nWELCOME TO THE SHOP!\nUseful wares for the brave.\n")?;
        loop {
            let listing = match game.player() {
                Some(player) => render::shop_listing(game.shop(), player),
                None => return Ok(Flow::Continue),
            };
            self.say(listing)?;

            let Some(line) = self.prompt("> ")? else {
                return Ok(Flow::Closed);
            };
            let choice = line.trim().to_lowercase();
            if choice == "q" {
                self.say("\nBack to the adventure!\n")?;
                return Ok(Flow::Continue);
            }

            let Ok(number) = choice.parse::<usize>() else {
                self.say("Invalid input!\n")?;
                continue;
            };
            let result = match number.checked_sub(1) {
                Some(index) => game.buy(index),
                None => Err(ShopError::InvalidIndex(number)),
            };
            match result {
                Ok(item) => {
                    let price = game.shop().price_of(&item.name).unwrap_or(0);
                    let gold = game.player().map_or(0, |p| p.gold);
                    self.say(format!("\nYou bought {} for {} gold! Gold left: {}\n", item.name, price, gold))?;
                }
                Err(ShopError::InsufficientGold { price, gold, .. }) => {
                    self.say(format!("\nNot enough gold! You need {}, you have {}\n", price, gold))?;
                }
                Err(e) => self.say(format!("\nInvalid item number: {}\n", e))?,
            }
        }
    }

    fn report_load_error(&mut self, error: &SaveError) -> Result<()> {
        match error {
            SaveError::NotFound(_) => self.say("No saved game found!\n"),
            e => {
                log::warn!("Load failed: {}", e);
                self.say(format!("Load failed: {}\n", e))
            }
        }
    }

    fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        self.output.write_all(text.as_ref().as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Print a prompt and read one line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        self.say(text)?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(|c| c == '\r' || c == '\n').to_string()))
    }

    /// Wait for Enter before the screen is cleared
    fn pause(&mut self) -> Result<Flow> {
        if !self.config.clear_screen {
            return Ok(Flow::Continue);
        }
        match self.prompt("\nPress Enter to continue...")? {
            Some(_) => Ok(Flow::Continue),
            None => Ok(Flow::Closed),
        }
    }

    fn clear(&mut self) -> Result<()> {
        if self.config.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }
}
