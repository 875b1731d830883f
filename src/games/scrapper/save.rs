//! Cosmic Scrapper セーブ/ロード機能。
//!
//! セーブデータは人間が diff できる JSON。保存のたびにまるごと上書きする。
//! 読み込み時、欠けているキーは新規ゲームのデフォルト値で補完する
//! (スキーマのバージョン管理・マイグレーションは行わない)。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logic::STATION_MAX;
use super::state::{GameState, Session, SessionCounters, TaskStatus};

/// タスク完了を表す文字列。
const TASK_DONE: &str = "done";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// ブラウザのストレージが使えない、または書き込みに失敗した。
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("save data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// 永続化されるレコード全体。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PersistedRecord {
    pub state: StateRecord,
    pub total_clicks: u64,
    pub total_scrap_earned: f64,
    /// 保存時刻 (UNIX 秒)。
    pub saved_at: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateRecord {
    pub scrap: f64,
    pub scrap_per_click: f64,
    pub scrap_per_second: f64,
    pub upgrades: BTreeMap<String, u32>,
    /// 完了済みタスクのみ `"done"` で記録する。
    pub tasks: BTreeMap<String, String>,
    pub station_progress: f64,
}

impl Default for StateRecord {
    fn default() -> Self {
        Self::from(&GameState::new(0.0))
    }
}

impl From<&GameState> for StateRecord {
    fn from(state: &GameState) -> Self {
        Self {
            scrap: state.scrap,
            scrap_per_click: state.scrap_per_click,
            scrap_per_second: state.scrap_per_second,
            upgrades: state.upgrades.clone(),
            tasks: state
                .tasks
                .iter()
                .filter(|(_, status)| **status == TaskStatus::Done)
                .map(|(id, _)| (id.clone(), TASK_DONE.to_string()))
                .collect(),
            station_progress: state.station_progress,
        }
    }
}

/// セッションからセーブ用レコードを作る (純粋関数)。
pub fn to_record(session: &Session, saved_at: f64) -> PersistedRecord {
    PersistedRecord {
        state: StateRecord::from(&session.state),
        total_clicks: session.counters.total_clicks,
        total_scrap_earned: session.counters.total_scrap_earned,
        saved_at,
    }
}

/// レコードからセッションを復元する。`now` が次の tick の基準時刻になる。
///
/// 壊れた値は不変条件に収まるように補正する: 残高と毎秒収入は 0 以上、
/// クリック収入は 1 以上、ステーション進捗は 0..=100
/// (100 ちょうどは次の更新で完成扱い)。
pub fn from_record(record: &PersistedRecord, now: f64) -> Session {
    let r = &record.state;
    let mut state = GameState::new(now);
    state.scrap = non_negative(r.scrap);
    state.scrap_per_click = at_least_one(r.scrap_per_click);
    state.scrap_per_second = non_negative(r.scrap_per_second);
    state.upgrades = r.upgrades.clone();
    state.tasks = r
        .tasks
        .iter()
        .filter(|(_, status)| status.as_str() == TASK_DONE)
        .map(|(id, _)| (id.clone(), TaskStatus::Done))
        .collect();
    state.station_progress = non_negative(r.station_progress).min(STATION_MAX);

    Session {
        state,
        counters: SessionCounters {
            total_clicks: record.total_clicks,
            total_scrap_earned: non_negative(record.total_scrap_earned),
        },
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

fn at_least_one(v: f64) -> f64 {
    if v.is_finite() && v > 1.0 {
        v
    } else {
        1.0
    }
}

pub fn to_json(record: &PersistedRecord) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(record)?)
}

pub fn from_json(json: &str) -> Result<PersistedRecord, StorageError> {
    Ok(serde_json::from_str(json)?)
}

/// 永続化先。エンジンに注入される。
pub trait SaveStore {
    /// 保存済みレコードを読む。無ければ `Ok(None)`。
    fn load(&self) -> Result<Option<PersistedRecord>, StorageError>;
    /// レコードで保存先をまるごと上書きする。
    fn save(&mut self, record: &PersistedRecord) -> Result<(), StorageError>;
    fn exists(&self) -> bool;
    /// 保存済みレコードを削除する。無くてもエラーにしない。
    fn delete(&mut self) -> Result<(), StorageError>;
}

/// メモリ上に JSON を保持するストア。テスト用、および
/// localStorage が使えないブラウザでのフォールバック。
#[derive(Debug, Default)]
pub struct MemoryStore {
    json: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 任意の JSON を保存済みデータとして持つストアを作る。
    #[cfg(test)]
    pub fn with_json(json: &str) -> Self {
        Self {
            json: Some(json.to_string()),
        }
    }
}

impl SaveStore for MemoryStore {
    fn load(&self) -> Result<Option<PersistedRecord>, StorageError> {
        self.json.as_deref().map(from_json).transpose()
    }

    fn save(&mut self, record: &PersistedRecord) -> Result<(), StorageError> {
        self.json = Some(to_json(record)?);
        Ok(())
    }

    fn exists(&self) -> bool {
        self.json.is_some()
    }

    fn delete(&mut self) -> Result<(), StorageError> {
        self.json = None;
        Ok(())
    }
}

/// JSON ファイルに保存するストア (ネイティブ環境)。
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SaveStore for FileStore {
    fn load(&self) -> Result<Option<PersistedRecord>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => from_json(&json).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, record: &PersistedRecord) -> Result<(), StorageError> {
        std::fs::write(&self.path, to_json(record)?)?;
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn delete(&mut self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// localStorage に保存するストア。WASM 環境でのみ動作。
#[cfg(target_arch = "wasm32")]
#[derive(Debug)]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// localStorage が使えない環境では `None`。
    pub fn open(key: &str) -> Option<Self> {
        get_storage()?;
        Some(Self {
            key: key.to_string(),
        })
    }

    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        get_storage().ok_or_else(|| StorageError::Backend("localStorage is unavailable".into()))
    }
}

#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_arch = "wasm32")]
impl SaveStore for LocalStorageStore {
    fn load(&self) -> Result<Option<PersistedRecord>, StorageError> {
        let json = self
            .storage()?
            .get_item(&self.key)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))?;
        json.as_deref().map(from_json).transpose()
    }

    fn save(&mut self, record: &PersistedRecord) -> Result<(), StorageError> {
        let json = to_json(record)?;
        self.storage()?
            .set_item(&self.key, &json)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }

    fn exists(&self) -> bool {
        self.storage()
            .ok()
            .and_then(|s| s.get_item(&self.key).ok().flatten())
            .is_some()
    }

    fn delete(&mut self) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(&self.key)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::scrapper::logic;

    fn played_session() -> Session {
        let mut s = Session::new(42.0);
        for _ in 0..30 {
            logic::click(&mut s);
        }
        s.state.scrap = 1234.5;
        logic::buy_upgrade(&mut s, "laser_tools").unwrap();
        logic::buy_upgrade(&mut s, "magnet_drones").unwrap();
        logic::buy_upgrade(&mut s, "station_module").unwrap();
        s.state.scrap = 200.0;
        logic::check_task(&mut s, "collect_100").unwrap();
        logic::tick(&mut s, 12.0);
        s
    }

    #[test]
    fn record_roundtrip_preserves_session() {
        let original = played_session();
        let record = to_record(&original, 1_700_000_000.0);
        let restored = from_record(&record, original.state.last_tick);
        assert_eq!(restored, original);
    }

    #[test]
    fn json_roundtrip_through_memory_store() {
        let original = played_session();
        let mut store = MemoryStore::new();
        assert!(!store.exists());
        store.save(&to_record(&original, 5.0)).unwrap();
        assert!(store.exists());

        let record = store.load().unwrap().unwrap();
        assert_eq!(record.saved_at, 5.0);
        assert_eq!(from_record(&record, 42.0), original);
    }

    #[test]
    fn json_layout_matches_documented_keys() {
        let mut s = Session::new(0.0);
        s.state.tasks.insert("click_50".into(), TaskStatus::Done);
        s.state.upgrades.insert("laser_tools".into(), 2);
        let json = to_json(&to_record(&s, 9.0)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["state"]["scrap_per_click"], 1.0);
        assert_eq!(value["state"]["upgrades"]["laser_tools"], 2);
        assert_eq!(value["state"]["tasks"]["click_50"], "done");
        assert_eq!(value["total_clicks"], 0);
        assert_eq!(value["saved_at"], 9.0);
        assert!(value["state"].get("last_tick").is_none());
    }

    #[test]
    fn incomplete_tasks_are_not_written() {
        let mut s = Session::new(0.0);
        s.state
            .tasks
            .insert("click_50".into(), TaskStatus::Incomplete);
        let record = to_record(&s, 0.0);
        assert!(record.state.tasks.is_empty());
    }

    #[test]
    fn missing_keys_take_defaults() {
        let record = from_json(r#"{ "state": { "scrap": 12.0 } }"#).unwrap();
        let s = from_record(&record, 3.0);
        assert_eq!(s.state.scrap, 12.0);
        assert_eq!(s.state.scrap_per_click, 1.0);
        assert_eq!(s.state.scrap_per_second, 0.0);
        assert!(s.state.upgrades.is_empty());
        assert!(s.state.tasks.is_empty());
        assert_eq!(s.state.station_progress, 0.0);
        assert_eq!(s.state.last_tick, 3.0);
        assert_eq!(s.counters, SessionCounters::default());
    }

    #[test]
    fn empty_object_is_a_fresh_game() {
        let record = from_json("{}").unwrap();
        assert_eq!(from_record(&record, 0.0), Session::new(0.0));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{
            "state": { "scrap": 1.0, "future_field": [1, 2, 3] },
            "total_clicks": 4,
            "prestige": 99
        }"#;
        let s = from_record(&from_json(json).unwrap(), 0.0);
        assert_eq!(s.state.scrap, 1.0);
        assert_eq!(s.counters.total_clicks, 4);
    }

    #[test]
    fn unrecognised_task_status_reads_as_incomplete() {
        let json = r#"{ "state": { "tasks": { "collect_100": "done", "click_50": "pending" } } }"#;
        let s = from_record(&from_json(json).unwrap(), 0.0);
        assert!(s.state.is_task_done("collect_100"));
        assert!(!s.state.is_task_done("click_50"));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let json = r#"{ "state": { "scrap": -5.0, "station_progress": 250.0 }, "total_scrap_earned": -1.0 }"#;
        let s = from_record(&from_json(json).unwrap(), 0.0);
        assert_eq!(s.state.scrap, 0.0);
        assert_eq!(s.state.station_progress, STATION_MAX);
        assert_eq!(s.counters.total_scrap_earned, 0.0);
    }

    #[test]
    fn negative_rates_are_clamped() {
        let json = r#"{ "state": { "scrap": 0.0, "scrap_per_click": -5.0, "scrap_per_second": -2.0 } }"#;
        let mut s = from_record(&from_json(json).unwrap(), 0.0);
        assert_eq!(s.state.scrap_per_click, 1.0);
        assert_eq!(s.state.scrap_per_second, 0.0);

        logic::click(&mut s);
        assert_eq!(s.state.scrap, 1.0);
        let r = logic::tick(&mut s, 10.0);
        assert_eq!(r.gain, 0.0);
        assert_eq!(s.state.scrap, 1.0);
    }

    #[test]
    fn non_finite_rates_fall_back() {
        let mut record = PersistedRecord::default();
        record.state.scrap_per_click = f64::NAN;
        record.state.scrap_per_second = f64::INFINITY;
        let s = from_record(&record, 0.0);
        assert_eq!(s.state.scrap_per_click, 1.0);
        assert_eq!(s.state.scrap_per_second, 0.0);
    }

    #[test]
    fn full_station_completes_on_first_tick_after_load() {
        let json = r#"{ "state": { "scrap": 5.0, "station_progress": 100.0 } }"#;
        let mut s = from_record(&from_json(json).unwrap(), 0.0);
        assert_eq!(s.state.station_progress, STATION_MAX);

        let r = logic::tick(&mut s, 0.0);
        assert_eq!(r.station_bonus, Some(1000.0));
        assert_eq!(s.state.station_progress, 0.0);
        assert_eq!(s.state.scrap, 1005.0);
    }

    #[test]
    fn malformed_json_is_reported() {
        let store = MemoryStore::with_json("{ not json");
        assert!(matches!(store.load(), Err(StorageError::Malformed(_))));
    }

    #[test]
    fn memory_store_delete() {
        let mut store = MemoryStore::new();
        store.save(&PersistedRecord::default()).unwrap();
        store.delete().unwrap();
        assert!(!store.exists());
        assert!(store.load().unwrap().is_none());
        // Deleting twice is fine.
        store.delete().unwrap();
    }

    #[test]
    fn file_store_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "cosmic_scrapper_test_{}.json",
            std::process::id()
        ));
        let mut store = FileStore::new(&path);
        store.delete().unwrap();
        assert!(!store.exists());
        assert!(store.load().unwrap().is_none());

        let original = played_session();
        store.save(&to_record(&original, 1.0)).unwrap();
        assert!(store.exists());
        let restored = from_record(&store.load().unwrap().unwrap(), 42.0);
        assert_eq!(restored, original);

        store.delete().unwrap();
        assert!(!store.exists());
    }
}
