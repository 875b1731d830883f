//! Cosmic Scrapper game rules: pure functions over a `Session`.

use super::catalog::{self, EffectKind, TaskDefinition, TaskGoal, TASKS};
use super::error::GameError;
use super::pricing;
use super::state::{GameState, Session, TaskStatus};

/// Station meter value that triggers completion.
pub const STATION_MAX: f64 = 100.0;
/// Scrap paid out when the station completes.
pub const STATION_BONUS: f64 = 1000.0;
/// Passive Scrap needed for one point of station progress.
pub const SCRAP_PER_PROGRESS_POINT: f64 = 500.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ClickReport {
    pub gained: f64,
    pub scrap: f64,
    pub total_clicks: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseReport {
    pub upgrade_id: &'static str,
    pub name: &'static str,
    pub cost: f64,
    /// Owned count after the purchase.
    pub owned: u32,
    pub scrap: f64,
    /// Set when this purchase filled the station meter.
    pub station_bonus: Option<f64>,
}

/// Result of checking a task. `NotYet` is an ordinary answer, not an error.
#[derive(Clone, Debug, PartialEq)]
pub enum TaskCheck {
    Completed { reward: f64, scrap: f64 },
    AlreadyComplete,
    NotYet,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub elapsed: f64,
    pub gain: f64,
    pub progress_gain: f64,
    /// Set when the station completed during this tick.
    pub station_bonus: Option<f64>,
}

/// Manual click on the ship.
pub fn click(session: &mut Session) -> ClickReport {
    let gained = session.state.scrap_per_click;
    session.state.scrap += gained;
    session.counters.total_clicks += 1;
    session.counters.total_scrap_earned += gained;
    ClickReport {
        gained,
        scrap: session.state.scrap,
        total_clicks: session.counters.total_clicks,
    }
}

/// Buy one unit of an upgrade and apply its effect.
pub fn buy_upgrade(session: &mut Session, upgrade_id: &str) -> Result<PurchaseReport, GameError> {
    let def = catalog::find_upgrade(upgrade_id)
        .ok_or_else(|| GameError::UnknownUpgrade(upgrade_id.to_string()))?;
    let state = &mut session.state;
    let owned = state.owned(def.id);
    let cost = pricing::cost(def, owned);
    if state.scrap < cost {
        return Err(GameError::InsufficientFunds {
            cost,
            balance: state.scrap,
        });
    }

    state.scrap -= cost;
    state.upgrades.insert(def.id.to_string(), owned + 1);
    match def.effect {
        EffectKind::Click => state.scrap_per_click += def.effect_value,
        EffectKind::Aps => state.scrap_per_second += def.effect_value,
        EffectKind::Progress => {
            state.station_progress = (state.station_progress + def.effect_value).min(STATION_MAX);
        }
    }
    let station_bonus = complete_station(state);
    log::debug!("bought {} #{} for {}", def.id, owned + 1, cost);

    Ok(PurchaseReport {
        upgrade_id: def.id,
        name: def.name,
        cost,
        owned: owned + 1,
        scrap: state.scrap,
        station_bonus,
    })
}

/// Whether a goal holds for the session right now.
pub fn goal_met(session: &Session, goal: &TaskGoal) -> bool {
    match *goal {
        TaskGoal::ScrapTotal(threshold) => {
            session.counters.total_scrap_earned >= threshold || session.state.scrap >= threshold
        }
        TaskGoal::Clicks(threshold) => session.counters.total_clicks >= threshold,
        TaskGoal::StationProgress(threshold) => session.state.station_progress >= threshold,
    }
}

/// Player asks whether a task is complete. Pays the reward once.
pub fn check_task(session: &mut Session, task_id: &str) -> Result<TaskCheck, GameError> {
    let def = catalog::find_task(task_id)
        .ok_or_else(|| GameError::UnknownTask(task_id.to_string()))?;
    if session.state.is_task_done(def.id) {
        return Ok(TaskCheck::AlreadyComplete);
    }
    if !goal_met(session, &def.goal) {
        return Ok(TaskCheck::NotYet);
    }

    session
        .state
        .tasks
        .insert(def.id.to_string(), TaskStatus::Done);
    session.state.scrap += def.reward;
    log::debug!("task {} complete, reward {}", def.id, def.reward);
    Ok(TaskCheck::Completed {
        reward: def.reward,
        scrap: session.state.scrap,
    })
}

/// Incomplete tasks whose goal currently holds. Does not mark anything done.
pub fn claimable_tasks(session: &Session) -> Vec<&'static TaskDefinition> {
    TASKS
        .iter()
        .filter(|t| !session.state.is_task_done(t.id) && goal_met(session, &t.goal))
        .collect()
}

/// Advance passive income by `elapsed` real seconds.
///
/// Negative or non-finite input counts as zero. Catch-up is linear; progress is
/// clamped to the cap first, so one call pays the station bonus at most once.
pub fn tick(session: &mut Session, elapsed: f64) -> TickReport {
    let elapsed = if elapsed.is_finite() && elapsed > 0.0 {
        elapsed
    } else {
        0.0
    };

    let gain = session.state.scrap_per_second * elapsed;
    if gain > 0.0 {
        session.state.scrap += gain;
        session.counters.total_scrap_earned += gain;
    }

    let progress_gain = gain / SCRAP_PER_PROGRESS_POINT;
    if progress_gain > 0.0 {
        session.state.station_progress =
            (session.state.station_progress + progress_gain).min(STATION_MAX);
    }

    TickReport {
        elapsed,
        gain,
        progress_gain,
        station_bonus: complete_station(&mut session.state),
    }
}

/// Tick using wall-clock time: elapsed is measured from the last tick.
pub fn tick_at(session: &mut Session, now: f64) -> TickReport {
    let elapsed = now - session.state.last_tick;
    session.state.last_tick = now;
    tick(session, elapsed)
}

/// Pay the bonus and reset the meter if it is full.
fn complete_station(state: &mut GameState) -> Option<f64> {
    if state.station_progress < STATION_MAX {
        return None;
    }
    state.scrap += STATION_BONUS;
    state.station_progress = 0.0;
    log::debug!("station complete, bonus {}", STATION_BONUS);
    Some(STATION_BONUS)
}

/// Whole Scrap with thousands separators, e.g. `12,345`.
pub fn format_scrap(n: f64) -> String {
    let whole = n.trunc();
    let digits = format!("{}", whole.abs() as u64);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if whole < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
