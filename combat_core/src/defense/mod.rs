//! Mitigation formulas - armor and resistance reductions with hard caps

mod armor;
mod resistance;

pub use armor::armor_reduction;
pub use resistance::{resistance_reduction, resistance_reduction_for_tags};

/// Maximum physical damage reduction from armor
pub const ARMOR_CAP: f64 = 0.85;

/// Armor formula level constant: reduction = armor / (armor + LEVEL_CONSTANT * level)
pub const ARMOR_LEVEL_CONSTANT: f64 = 10.0;

/// Maximum elemental damage reduction from resistance
pub const RESISTANCE_CAP: f64 = 0.70;
