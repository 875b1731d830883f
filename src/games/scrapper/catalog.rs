//! Static reference data: the upgrade shop and the task checklist.

/// What buying an upgrade does to the game state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectKind {
    /// Adds to Scrap per click.
    Click,
    /// Adds to Scrap per second.
    Aps,
    /// Adds directly to station progress.
    Progress,
}

/// One purchasable upgrade. Repeatable; the price grows with each purchase.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub base_cost: f64,
    pub effect: EffectKind,
    pub effect_value: f64,
    pub description: &'static str,
}

/// Upgrades in shop order. The shop key for entry `i` is `'1' + i`.
pub const UPGRADES: &[UpgradeDefinition] = &[
    UpgradeDefinition {
        id: "laser_tools",
        name: "Laser Pliers",
        base_cost: 10.0,
        effect: EffectKind::Click,
        effect_value: 1.0,
        description: "More Scrap per click.",
    },
    UpgradeDefinition {
        id: "magnet_drones",
        name: "Magnet Drones",
        base_cost: 50.0,
        effect: EffectKind::Aps,
        effect_value: 0.5,
        description: "An automatic collector (Scrap per second).",
    },
    UpgradeDefinition {
        id: "scrap_refinery",
        name: "Scrap Refinery",
        base_cost: 200.0,
        effect: EffectKind::Aps,
        effect_value: 2.0,
        description: "Faster processing, more Scrap per second.",
    },
    UpgradeDefinition {
        id: "reinforced_hull",
        name: "Reinforced Hull",
        base_cost: 150.0,
        effect: EffectKind::Click,
        effect_value: 5.0,
        description: "Much more Scrap per click.",
    },
    UpgradeDefinition {
        id: "station_module",
        name: "Station Module",
        base_cost: 1000.0,
        effect: EffectKind::Progress,
        effect_value: 10.0,
        description: "Adds station construction progress on purchase.",
    },
];

/// Condition a task checks against the current session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TaskGoal {
    /// Lifetime earnings or the current balance reach the threshold.
    ScrapTotal(f64),
    /// Lifetime clicks reach the threshold.
    Clicks(u64),
    /// Station progress reaches the threshold (percent).
    StationProgress(f64),
}

/// One checklist goal with a one-time reward.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskDefinition {
    pub id: &'static str,
    pub description: &'static str,
    pub goal: TaskGoal,
    pub reward: f64,
}

/// Tasks in checklist order. The check key for entry `i` is `'a' + i`.
pub const TASKS: &[TaskDefinition] = &[
    TaskDefinition {
        id: "collect_100",
        description: "Collect 100 Scrap",
        goal: TaskGoal::ScrapTotal(100.0),
        reward: 50.0,
    },
    TaskDefinition {
        id: "click_50",
        description: "Click 50 times",
        goal: TaskGoal::Clicks(50),
        reward: 30.0,
    },
    TaskDefinition {
        id: "build_25",
        description: "Reach 25% station progress",
        goal: TaskGoal::StationProgress(25.0),
        reward: 100.0,
    },
];

pub fn find_upgrade(id: &str) -> Option<&'static UpgradeDefinition> {
    UPGRADES.iter().find(|u| u.id == id)
}

pub fn find_task(id: &str) -> Option<&'static TaskDefinition> {
    TASKS.iter().find(|t| t.id == id)
}
