//! Semantic action IDs for Cosmic Scrapper click targets and key bindings.

use super::catalog::{TASKS, UPGRADES};

// ── Core actions ────────────────────────────────────────────────
pub const CLICK_SHIP: u16 = 0;

// ── Persistence ─────────────────────────────────────────────────
pub const SAVE_GAME: u16 = 10;
pub const LOAD_GAME: u16 = 11;
pub const RESET_GAME: u16 = 12;
pub const CONFIRM_RESET: u16 = 13;
pub const CANCEL_RESET: u16 = 14;

// ── Shop (base + index into UPGRADES) ───────────────────────────
pub const BUY_UPGRADE_BASE: u16 = 100;

// ── Task checks (base + index into TASKS) ───────────────────────
pub const CHECK_TASK_BASE: u16 = 200;

/// Keys for checking tasks, in TASKS order.
pub const TASK_KEYS: &[char] = &['q', 'w', 'e', 't', 'u', 'i', 'o', 'p'];

/// Display key for upgrade `idx` (`'1'`, `'2'`, ...).
pub fn upgrade_key(idx: usize) -> char {
    char::from_digit(idx as u32 + 1, 10).unwrap_or('?')
}

/// Display key for task `idx`.
pub fn task_key(idx: usize) -> char {
    TASK_KEYS.get(idx).copied().unwrap_or('?')
}

/// Map a key press to an action. While a reset is awaiting confirmation only
/// `y` confirms; every other key cancels.
pub fn key_to_action(key: char, confirming_reset: bool) -> Option<u16> {
    let key = key.to_ascii_lowercase();
    if confirming_reset {
        return Some(if key == 'y' {
            CONFIRM_RESET
        } else {
            CANCEL_RESET
        });
    }
    match key {
        'c' | ' ' => Some(CLICK_SHIP),
        's' => Some(SAVE_GAME),
        'l' => Some(LOAD_GAME),
        'r' => Some(RESET_GAME),
        '1'..='9' => {
            let idx = key as usize - '1' as usize;
            (idx < UPGRADES.len()).then_some(BUY_UPGRADE_BASE + idx as u16)
        }
        _ => TASK_KEYS
            .iter()
            .take(TASKS.len())
            .position(|&k| k == key)
            .map(|idx| CHECK_TASK_BASE + idx as u16),
    }
}

/// Upgrade index for a shop action ID.
pub fn upgrade_index(action_id: u16) -> Option<usize> {
    let idx = action_id.checked_sub(BUY_UPGRADE_BASE)? as usize;
    (idx < UPGRADES.len()).then_some(idx)
}

/// Task index for a task-check action ID.
pub fn task_index(action_id: u16) -> Option<usize> {
    let idx = action_id.checked_sub(CHECK_TASK_BASE)? as usize;
    (idx < TASKS.len()).then_some(idx)
}
