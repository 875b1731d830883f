/// Cosmic Scrapper game state definitions.
use std::collections::BTreeMap;

/// Completion status of a checklist task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TaskStatus {
    #[default]
    Incomplete,
    Done,
}

/// Everything the player owns and the rates derived from upgrades.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Spendable Scrap. Never negative.
    pub scrap: f64,
    pub scrap_per_click: f64,
    pub scrap_per_second: f64,
    /// Owned count per upgrade id. Missing means zero.
    pub upgrades: BTreeMap<String, u32>,
    /// Task status per task id. Missing means incomplete.
    pub tasks: BTreeMap<String, TaskStatus>,
    /// Station construction meter, 0..100.
    pub station_progress: f64,
    /// Wall-clock seconds of the last accrual tick.
    pub last_tick: f64,
}

impl GameState {
    pub fn new(now: f64) -> Self {
        Self {
            scrap: 0.0,
            scrap_per_click: 1.0,
            scrap_per_second: 0.0,
            upgrades: BTreeMap::new(),
            tasks: BTreeMap::new(),
            station_progress: 0.0,
            last_tick: now,
        }
    }

    pub fn owned(&self, upgrade_id: &str) -> u32 {
        self.upgrades.get(upgrade_id).copied().unwrap_or(0)
    }

    pub fn task_status(&self, task_id: &str) -> TaskStatus {
        self.tasks.get(task_id).copied().unwrap_or_default()
    }

    pub fn is_task_done(&self, task_id: &str) -> bool {
        self.task_status(task_id) == TaskStatus::Done
    }
}

/// Lifetime counters, persisted next to the state but kept apart from it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionCounters {
    pub total_clicks: u64,
    /// Gross Scrap earned from clicks and passive income. Spending does not
    /// reduce it.
    pub total_scrap_earned: f64,
}

/// The state object every engine operation works on.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub state: GameState,
    pub counters: SessionCounters,
}

impl Session {
    pub fn new(now: f64) -> Self {
        Self {
            state: GameState::new(now),
            counters: SessionCounters::default(),
        }
    }
}
