//! Data-driven game balance
//!
//! Every gameplay constant can be overridden from a JSON object stored in
//! LocalStorage. Missing fields keep their defaults from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::platform::KeyValueStore;

/// Upper bound on particles per burst
pub const MAX_PARTICLE_COUNT: usize = 1_000;

/// Gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub jump_velocity: f32,

    pub start_speed: f32,
    pub speed_step: f32,
    pub difficulty_interval_ms: f32,

    pub obstacle_interval_ms: f32,
    pub obstacle_width: f32,
    pub obstacle_min_height: f32,
    pub obstacle_max_height: f32,

    pub powerup_interval_ms: f32,
    pub powerup_size: f32,
    pub powerup_min_lift: f32,
    pub powerup_lift_range: f32,
    pub powerup_bonus: u64,

    pub particle_count: usize,
    /// Particle lifetime range in frame units
    pub particle_min_life: f32,
    pub particle_max_life: f32,

    pub parallax_factors: [f32; 2],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,

            start_speed: START_SPEED,
            speed_step: SPEED_STEP,
            difficulty_interval_ms: DIFFICULTY_INTERVAL_MS,

            obstacle_interval_ms: OBSTACLE_INTERVAL_MS,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_min_height: OBSTACLE_MIN_HEIGHT,
            obstacle_max_height: OBSTACLE_MAX_HEIGHT,

            powerup_interval_ms: POWERUP_INTERVAL_MS,
            powerup_size: POWERUP_SIZE,
            powerup_min_lift: POWERUP_MIN_LIFT,
            powerup_lift_range: POWERUP_LIFT_RANGE,
            powerup_bonus: POWERUP_BONUS,

            particle_count: PARTICLE_COUNT,
            particle_min_life: PARTICLE_MIN_LIFE,
            particle_max_life: PARTICLE_MAX_LIFE,

            parallax_factors: PARALLAX_FACTORS,
        }
    }
}

/// Why a tuning override was rejected
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("jump_velocity must point upward (negative), got {0}")]
    JumpNotUpward(f32),
    #[error("{field} must lie in [{min}, {max}] (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("particle_count {0} exceeds {MAX_PARTICLE_COUNT}")]
    TooManyParticles(usize),
    #[error("{field}: minimum {min} exceeds maximum {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
}

impl Tuning {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "parallax_dash_tuning";

    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the spawn/physics loop
    pub fn validate(&self) -> Result<(), TuningError> {
        let positives = [
            ("gravity", self.gravity),
            ("start_speed", self.start_speed),
            ("difficulty_interval_ms", self.difficulty_interval_ms),
            ("obstacle_interval_ms", self.obstacle_interval_ms),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_min_height", self.obstacle_min_height),
            ("powerup_interval_ms", self.powerup_interval_ms),
            ("powerup_size", self.powerup_size),
            ("particle_min_life", self.particle_min_life),
        ];
        for (field, value) in positives {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        let non_negatives = [
            ("speed_step", self.speed_step),
            ("powerup_min_lift", self.powerup_min_lift),
            ("powerup_lift_range", self.powerup_lift_range),
        ];
        for (field, value) in non_negatives {
            if !(value >= 0.0) {
                return Err(TuningError::Negative { field, value });
            }
        }
        if !(self.jump_velocity < 0.0) {
            return Err(TuningError::JumpNotUpward(self.jump_velocity));
        }
        // Layers may lag the game speed but never run backwards or ahead of it
        for value in self.parallax_factors {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::OutOfRange {
                    field: "parallax_factors",
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(TuningError::TooManyParticles(self.particle_count));
        }

        let ranges = [
            (
                "obstacle_height",
                self.obstacle_min_height,
                self.obstacle_max_height,
            ),
            (
                "particle_life",
                self.particle_min_life,
                self.particle_max_life,
            ),
        ];
        for (field, min, max) in ranges {
            if min > max {
                return Err(TuningError::InvertedRange { field, min, max });
            }
        }
        Ok(())
    }

    /// Load overrides from storage, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {e}");
                Self::default()
            }
        }
    }
}
