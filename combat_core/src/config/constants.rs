//! Tunable combat constants

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which health figure the overpower bonus scales from
///
/// The original ruleset documents overpower as "(current HP + fortify) ×
/// multiplier" but computes it against max HP. Both readings are kept as
/// an explicit choice; fortify is added to the chosen basis either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverpowerBasis {
    #[default]
    MaxHp,
    CurrentHp,
}

/// Tunable combat constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Damage multiplier on a critical strike (1.5 = 150%)
    #[serde(default = "default_crit_multiplier")]
    pub crit_multiplier: f64,
    /// Fixed chance for an overpower proc (not a stat)
    #[serde(default = "default_overpower_chance")]
    pub overpower_chance: f64,
    /// Multiplier applied to the overpower health basis
    #[serde(default = "default_overpower_multiplier")]
    pub overpower_multiplier: f64,
    /// Health figure the overpower bonus scales from
    #[serde(default)]
    pub overpower_basis: OverpowerBasis,
    /// Damage multiplier against vulnerable targets (1.2 = +20%)
    #[serde(default = "default_vulnerable_multiplier")]
    pub vulnerable_multiplier: f64,
    /// Main-stat contribution per point: mult = 1 + main_stat * scale
    #[serde(default = "default_main_stat_scale")]
    pub main_stat_scale: f64,
    /// Flat incoming-damage reduction while fortified (0.15 = -15%)
    #[serde(default = "default_fortify_reduction")]
    pub fortify_reduction: f64,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            crit_multiplier: default_crit_multiplier(),
            overpower_chance: default_overpower_chance(),
            overpower_multiplier: default_overpower_multiplier(),
            overpower_basis: OverpowerBasis::default(),
            vulnerable_multiplier: default_vulnerable_multiplier(),
            main_stat_scale: default_main_stat_scale(),
            fortify_reduction: default_fortify_reduction(),
        }
    }
}

fn default_crit_multiplier() -> f64 {
    1.5
}
fn default_overpower_chance() -> f64 {
    0.03
}
fn default_overpower_multiplier() -> f64 {
    1.5
}
fn default_vulnerable_multiplier() -> f64 {
    1.2
}
fn default_main_stat_scale() -> f64 {
    0.001
}
fn default_fortify_reduction() -> f64 {
    0.15
}

/// Load combat constants from a TOML file
pub fn load_constants(path: &Path) -> Result<CombatConstants, ConfigError> {
    super::load_toml(path)
}

/// Load combat constants from a TOML string
pub fn parse_constants(content: &str) -> Result<CombatConstants, ConfigError> {
    super::parse_toml(content)
}
