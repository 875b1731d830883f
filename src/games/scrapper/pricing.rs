//! Upgrade pricing curve.

use super::catalog::UpgradeDefinition;

/// Each purchase multiplies the next price by this factor.
pub const GROWTH_FACTOR: f64 = 1.6;

/// Price of the next unit when `owned` units are already bought.
///
/// `floor(base_cost * 1.6^owned)`, truncated rather than rounded.
pub fn cost(def: &UpgradeDefinition, owned: u32) -> f64 {
    (def.base_cost * GROWTH_FACTOR.powf(owned as f64)).floor()
}
