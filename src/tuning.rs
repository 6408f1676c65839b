//! Roll tuning knobs.
//!
//! Everything the roll protocol treats as a constant lives here so the CLI
//! (or a host application) can override it from a RON file. Missing fields
//! fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::Error;

/// Tuning for one die's physics material, throw and intro animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollTuning {
    /// Height (m) the body teleports to when a roll starts.
    #[serde(default = "default_drop_height")]
    pub drop_height: f32,

    /// Angular velocity samples are drawn from `-spin_speed..spin_speed`
    /// (rad/s) on each axis.
    #[serde(default = "default_spin_speed")]
    pub spin_speed: f32,

    /// A die counts as settled once both linear and angular speed are below
    /// this (compared squared, so no square roots per step).
    #[serde(default = "default_settle_threshold")]
    pub settle_threshold: f32,

    /// Wall-clock bound on a roll; on expiry the current face is reported
    /// even if the die is still moving.
    #[serde(default = "default_roll_timeout_secs")]
    pub roll_timeout_secs: f32,

    /// Length of the scale-in intro played at the start of each roll.
    #[serde(default = "default_intro_duration")]
    pub intro_duration: f32,

    #[serde(default = "default_intro_start_scale")]
    pub intro_start_scale: f32,

    #[serde(default = "default_intro_end_scale")]
    pub intro_end_scale: f32,

    #[serde(default = "default_restitution")]
    pub restitution: f32,

    #[serde(default = "default_friction")]
    pub friction: f32,

    /// Collider density; the engine derives mass from it.
    #[serde(default = "default_density")]
    pub density: f32,
}

fn default_drop_height() -> f32 {
    2.5
}
fn default_spin_speed() -> f32 {
    8.0
}
fn default_settle_threshold() -> f32 {
    0.05
}
fn default_roll_timeout_secs() -> f32 {
    10.0
}
fn default_intro_duration() -> f32 {
    0.8
}
fn default_intro_start_scale() -> f32 {
    0.2
}
fn default_intro_end_scale() -> f32 {
    1.0
}
fn default_restitution() -> f32 {
    0.15
}
fn default_friction() -> f32 {
    0.7
}
fn default_density() -> f32 {
    1.5
}

impl Default for RollTuning {
    fn default() -> Self {
        Self {
            drop_height: default_drop_height(),
            spin_speed: default_spin_speed(),
            settle_threshold: default_settle_threshold(),
            roll_timeout_secs: default_roll_timeout_secs(),
            intro_duration: default_intro_duration(),
            intro_start_scale: default_intro_start_scale(),
            intro_end_scale: default_intro_end_scale(),
            restitution: default_restitution(),
            friction: default_friction(),
            density: default_density(),
        }
    }
}

impl RollTuning {
    /// Load tuning from a RON file; absent fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        Ok(ron::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tuning = RollTuning::default();
        assert_eq!(tuning.settle_threshold, 0.05);
        assert_eq!(tuning.roll_timeout_secs, 10.0);
        assert_eq!(tuning.intro_duration, 0.8);
        assert_eq!(tuning.intro_start_scale, 0.2);
        assert_eq!(tuning.intro_end_scale, 1.0);
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let tuning: RollTuning = ron::from_str("(drop_height: 4.0, spin_speed: 3.0)")
            .expect("partial tuning should parse");
        assert_eq!(tuning.drop_height, 4.0);
        assert_eq!(tuning.spin_speed, 3.0);
        assert_eq!(tuning.settle_threshold, RollTuning::default().settle_threshold);
    }

    #[test]
    fn test_ron_round_trip() {
        let tuning = RollTuning {
            drop_height: 3.25,
            ..RollTuning::default()
        };
        let text = ron::to_string(&tuning).expect("serialize tuning");
        let back: RollTuning = ron::from_str(&text).expect("reparse tuning");
        assert_eq!(back, tuning);
    }
}
