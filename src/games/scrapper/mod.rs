/// Cosmic Scrapper: click the ship for Scrap, buy upgrades, finish tasks,
/// build the station.

pub mod actions;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod logic;
pub mod pricing;
pub mod render;
pub mod save;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::config::GameConfig;
use crate::games::Game;
use crate::input::{ClickState, InputEvent};
use crate::time::{AutosaveTimer, TickClock};

use catalog::{TASKS, UPGRADES};
use engine::{Engine, LoadOutcome};
use error::GameError;
use logic::{format_scrap, TaskCheck};
use save::SaveStore;

/// Frames the ship art stays "pressed" after a click.
const CLICK_FLASH_FRAMES: u32 = 6;
const MAX_LOG_ENTRIES: usize = 50;

/// Log entry shown in the message panel.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Presentation-only state. Never persisted.
#[derive(Debug, Default)]
pub struct UiState {
    pub log: Vec<LogEntry>,
    pub click_flash: u32,
    pub confirming_reset: bool,
}

impl UiState {
    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG_ENTRIES {
            self.log.remove(0);
        }
    }
}

pub struct ScrapperGame<S: SaveStore> {
    pub engine: Engine<S>,
    pub ui: UiState,
    clock: TickClock,
    autosave: AutosaveTimer,
}

impl<S: SaveStore> ScrapperGame<S> {
    /// Resume the saved game from `store` if there is one.
    pub fn new(store: S, config: &GameConfig, now: f64) -> Self {
        let engine = Engine::restore_or_new(store, now);
        let mut ui = UiState::default();
        if engine.session().counters.total_clicks > 0 || engine.session().state.scrap > 0.0 {
            ui.add_log("Welcome back, scrapper.", true);
        } else {
            ui.add_log("Welcome to Cosmic Scrapper!", true);
        }
        Self {
            engine,
            ui,
            clock: TickClock::new(config.tick_interval_secs),
            autosave: AutosaveTimer::new(config.autosave_interval_secs, now),
        }
    }

    fn apply_action(&mut self, action_id: u16, now: f64) {
        match action_id {
            actions::CLICK_SHIP => {
                self.engine.click();
                self.ui.click_flash = CLICK_FLASH_FRAMES;
            }
            actions::SAVE_GAME => match self.engine.save(now) {
                Ok(()) => self.ui.add_log("Progress saved.", false),
                Err(e) => self.ui.add_log(&format!("Could not save: {e}"), true),
            },
            actions::LOAD_GAME => match self.engine.load(now) {
                Ok(LoadOutcome::Loaded) => self.ui.add_log("Save loaded.", false),
                Ok(LoadOutcome::NoSave) => self.ui.add_log("No save found.", false),
                Err(e) => self.ui.add_log(&format!("Could not load: {e}"), true),
            },
            actions::RESET_GAME => {
                self.ui.confirming_reset = true;
                self.ui.add_log("Start over from scratch? Press Y to confirm.", true);
            }
            actions::CONFIRM_RESET => {
                self.ui.confirming_reset = false;
                match self.engine.reset(now) {
                    Ok(()) => self.ui.add_log("A new game has started.", true),
                    Err(e) => self.ui.add_log(
                        &format!("A new game has started, but the old save remains: {e}"),
                        true,
                    ),
                }
            }
            actions::CANCEL_RESET => {
                self.ui.confirming_reset = false;
                self.ui.add_log("Reset cancelled.", false);
            }
            id => {
                if let Some(idx) = actions::upgrade_index(id) {
                    self.buy(idx);
                } else if let Some(idx) = actions::task_index(id) {
                    self.check_task(idx);
                }
            }
        }
    }

    fn buy(&mut self, idx: usize) {
        match self.engine.buy(UPGRADES[idx].id) {
            Ok(r) => {
                self.ui.add_log(
                    &format!(
                        "Bought {} (x{}) for {} Scrap.",
                        r.name,
                        r.owned,
                        format_scrap(r.cost)
                    ),
                    false,
                );
                if let Some(bonus) = r.station_bonus {
                    self.announce_station(bonus);
                }
            }
            Err(e @ GameError::InsufficientFunds { .. }) => {
                self.ui.add_log(&format!("Not enough Scrap: {e}."), false);
            }
            // Unknown ids are logged by the engine.
            Err(_) => {}
        }
    }

    fn check_task(&mut self, idx: usize) {
        match self.engine.check_task(TASKS[idx].id) {
            Ok(TaskCheck::Completed { reward, .. }) => self.ui.add_log(
                &format!("Task complete! You received {} Scrap.", format_scrap(reward)),
                true,
            ),
            Ok(TaskCheck::AlreadyComplete) => {
                self.ui.add_log("That task is already complete.", false)
            }
            Ok(TaskCheck::NotYet) => self
                .ui
                .add_log("Not yet: the task's conditions are not met.", false),
            Err(_) => {}
        }
    }

    fn announce_station(&mut self, bonus: f64) {
        self.ui.add_log(
            &format!(
                "Station complete! Reward: {} Scrap.",
                format_scrap(bonus)
            ),
            true,
        );
    }
}

impl<S: SaveStore> Game for ScrapperGame<S> {
    fn handle_input(&mut self, event: &InputEvent, now: f64) -> bool {
        let action = match event {
            InputEvent::Key(c) => actions::key_to_action(*c, self.ui.confirming_reset),
            InputEvent::Click(id) => Some(*id),
        };
        let Some(mut action) = action else {
            return false;
        };
        if self.ui.confirming_reset && action != actions::CONFIRM_RESET {
            action = actions::CANCEL_RESET;
        }
        self.apply_action(action, now);
        true
    }

    fn update(&mut self, now: f64) {
        self.ui.click_flash = self.ui.click_flash.saturating_sub(1);

        if self.clock.is_due(self.engine.session().state.last_tick, now) {
            let report = self.engine.tick_at(now);
            if let Some(bonus) = report.station_bonus {
                self.announce_station(bonus);
            }
        }

        if self.autosave.is_due(now) {
            if let Err(e) = self.engine.save(now) {
                self.ui.add_log(&format!("Autosave failed: {e}"), true);
            }
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self.engine.session(), &self.ui, f, area, click_state);
    }

    fn shutdown(&mut self, now: f64) {
        // Storage errors were already logged by the engine; nothing is left
        // on screen to show them.
        let _ = self.engine.save(now);
    }
}
