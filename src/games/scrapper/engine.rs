//! Session owner: applies player intents and talks to the save store.

use super::error::GameError;
use super::logic::{self, ClickReport, PurchaseReport, TaskCheck, TickReport};
use super::save::{self, SaveStore, StorageError};
use super::state::Session;

/// What `load` found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    NoSave,
}

/// Owns the live session and the injected save store.
///
/// Gameplay never fails because of storage: on a storage error the in-memory
/// session is kept and the error is returned for the caller to show.
pub struct Engine<S: SaveStore> {
    session: Session,
    store: S,
}

impl<S: SaveStore> Engine<S> {
    /// Start a fresh session.
    pub fn new(store: S, now: f64) -> Self {
        Self {
            session: Session::new(now),
            store,
        }
    }

    /// Start from the saved game if there is one, otherwise fresh.
    /// An unreadable save is logged and ignored.
    pub fn restore_or_new(store: S, now: f64) -> Self {
        let mut engine = Self::new(store, now);
        if let Err(e) = engine.load(now) {
            log::warn!("could not load saved game, starting fresh: {e}");
        }
        engine
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn click(&mut self) -> ClickReport {
        logic::click(&mut self.session)
    }

    pub fn buy(&mut self, upgrade_id: &str) -> Result<PurchaseReport, GameError> {
        let result = logic::buy_upgrade(&mut self.session, upgrade_id);
        if let Err(GameError::UnknownUpgrade(id)) = &result {
            log::error!("purchase requested for unknown upgrade {id}");
        }
        result
    }

    pub fn check_task(&mut self, task_id: &str) -> Result<TaskCheck, GameError> {
        let result = logic::check_task(&mut self.session, task_id);
        if let Err(GameError::UnknownTask(id)) = &result {
            log::error!("check requested for unknown task {id}");
        }
        result
    }

    pub fn tick(&mut self, elapsed: f64) -> TickReport {
        logic::tick(&mut self.session, elapsed)
    }

    /// Tick with the wall-clock delta since the previous tick.
    pub fn tick_at(&mut self, now: f64) -> TickReport {
        logic::tick_at(&mut self.session, now)
    }

    /// Overwrite the save with the current session.
    pub fn save(&mut self, now: f64) -> Result<(), StorageError> {
        let record = save::to_record(&self.session, now);
        match self.store.save(&record) {
            Ok(()) => {
                log::info!("game saved");
                Ok(())
            }
            Err(e) => {
                log::warn!("save failed: {e}");
                Err(e)
            }
        }
    }

    /// Replace the session with the saved one. Keeps the current session when
    /// there is no save or it cannot be read.
    pub fn load(&mut self, now: f64) -> Result<LoadOutcome, StorageError> {
        if !self.store.exists() {
            return Ok(LoadOutcome::NoSave);
        }
        match self.store.load() {
            Ok(Some(record)) => {
                self.session = save::from_record(&record, now);
                log::info!("game loaded (saved at {})", record.saved_at);
                Ok(LoadOutcome::Loaded)
            }
            Ok(None) => Ok(LoadOutcome::NoSave),
            Err(e) => {
                log::warn!("load failed: {e}");
                Err(e)
            }
        }
    }

    /// Start over: fresh session and no save. The session is replaced even
    /// when deleting the save fails.
    pub fn reset(&mut self, now: f64) -> Result<(), StorageError> {
        self.session = Session::new(now);
        log::info!("game reset");
        self.store.delete().inspect_err(|e| {
            log::warn!("could not delete save during reset: {e}");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::scrapper::save::{MemoryStore, PersistedRecord};

    /// Store whose every operation fails, to check storage errors stay non-fatal.
    struct BrokenStore;

    impl SaveStore for BrokenStore {
        fn load(&self) -> Result<Option<PersistedRecord>, StorageError> {
            Err(StorageError::Backend("disk on fire".into()))
        }
        fn save(&mut self, _record: &PersistedRecord) -> Result<(), StorageError> {
            Err(StorageError::Backend("disk on fire".into()))
        }
        fn exists(&self) -> bool {
            true
        }
        fn delete(&mut self) -> Result<(), StorageError> {
            Err(StorageError::Backend("disk on fire".into()))
        }
    }

    #[test]
    fn restored_full_station_pays_bonus_on_first_tick() {
        let store = MemoryStore::with_json(r#"{ "state": { "station_progress": 100.0 } }"#);
        let mut engine = Engine::restore_or_new(store, 50.0);
        assert_eq!(engine.session().state.station_progress, 100.0);

        let r = engine.tick_at(50.0);
        assert_eq!(r.station_bonus, Some(1000.0));
        assert_eq!(engine.session().state.station_progress, 0.0);
        assert_eq!(engine.session().state.scrap, 1000.0);
        assert_eq!(engine.tick(1.0).station_bonus, None);
    }

    #[test]
    fn save_then_load_restores_session() {
        let mut engine = Engine::new(MemoryStore::new(), 0.0);
        for _ in 0..20 {
            engine.click();
        }
        engine.buy("laser_tools").unwrap();
        engine.save(100.0).unwrap();
        let saved = engine.session().clone();

        for _ in 0..5 {
            engine.click();
        }
        assert_eq!(engine.load(0.0).unwrap(), LoadOutcome::Loaded);
        assert_eq!(engine.session(), &saved);
    }

    #[test]
    fn load_without_save_keeps_session() {
        let mut engine = Engine::new(MemoryStore::new(), 0.0);
        engine.click();
        assert_eq!(engine.load(0.0).unwrap(), LoadOutcome::NoSave);
        assert_eq!(engine.session().counters.total_clicks, 1);
    }

    #[test]
    fn load_sets_tick_base_to_now() {
        let mut engine = Engine::new(MemoryStore::new(), 0.0);
        engine.save(0.0).unwrap();
        engine.load(500.0).unwrap();
        assert_eq!(engine.session().state.last_tick, 500.0);
    }

    #[test]
    fn restore_or_new_picks_up_save() {
        let mut first = Engine::new(MemoryStore::new(), 0.0);
        first.click();
        first.click();
        first.save(1.0).unwrap();
        let Engine { store, .. } = first;

        let second = Engine::restore_or_new(store, 2.0);
        assert_eq!(second.session().counters.total_clicks, 2);
        assert_eq!(second.session().state.last_tick, 2.0);
    }

    #[test]
    fn restore_or_new_survives_broken_store() {
        let engine = Engine::restore_or_new(BrokenStore, 7.0);
        assert_eq!(engine.session(), &Session::new(7.0));
    }

    #[test]
    fn reset_clears_session_and_save() {
        let mut engine = Engine::new(MemoryStore::new(), 0.0);
        engine.click();
        engine.save(1.0).unwrap();
        engine.reset(3.0).unwrap();
        assert_eq!(engine.session(), &Session::new(3.0));
        assert!(!engine.store().exists());
    }

    #[test]
    fn storage_failures_do_not_touch_gameplay() {
        let mut engine = Engine::new(BrokenStore, 0.0);
        engine.click();
        assert!(engine.save(1.0).is_err());
        assert!(engine.load(1.0).is_err());
        assert_eq!(engine.session().counters.total_clicks, 1);

        // Reset still starts over even though the delete failed.
        assert!(engine.reset(2.0).is_err());
        assert_eq!(engine.session().counters.total_clicks, 0);
    }

    #[test]
    fn intents_report_errors() {
        let mut engine = Engine::new(MemoryStore::new(), 0.0);
        assert!(matches!(
            engine.buy("laser_tools"),
            Err(GameError::InsufficientFunds { .. })
        ));
        assert!(matches!(
            engine.buy("nope"),
            Err(GameError::UnknownUpgrade(_))
        ));
        assert!(matches!(
            engine.check_task("nope"),
            Err(GameError::UnknownTask(_))
        ));
        assert_eq!(engine.check_task("click_50").unwrap(), TaskCheck::NotYet);
    }

    #[test]
    fn tick_at_accrues_measured_time() {
        let mut engine = Engine::new(MemoryStore::new(), 1000.0);
        engine.session_mut().state.scrap_per_second = 2.0;
        let r = engine.tick_at(1030.0);
        assert!((r.gain - 60.0).abs() < 1e-9);
        let r = engine.tick(1.5);
        assert!((r.gain - 3.0).abs() < 1e-9);
    }
}
