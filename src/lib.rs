//! Parallax Dash - A parallax endless-runner
//!
//! Core modules:
//! - `sim`: Simulation (physics, spawning, collisions, game state)
//! - `renderer`: Draw-command scene composition + Canvas 2D backend
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Milliseconds per frame unit; per-frame motion is scaled by `dt / FRAME_MS`
    pub const FRAME_MS: f32 = 16.0;
    /// Largest frame delta fed to the simulation (tab refocus, debugger pauses)
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Default surface size (2:1)
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 400.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Downward acceleration per frame unit
    pub const GRAVITY: f32 = 0.6;
    /// Vertical velocity applied on jump (negative = up)
    pub const JUMP_VELOCITY: f32 = -12.0;

    /// Starting scroll speed (pixels per frame unit)
    pub const START_SPEED: f32 = 4.0;
    pub const SPEED_STEP: f32 = 0.5;
    pub const DIFFICULTY_INTERVAL_MS: f32 = 10_000.0;

    /// Obstacle spawning
    pub const OBSTACLE_INTERVAL_MS: f32 = 1_500.0;
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 20.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 50.0;

    /// Power-up spawning
    pub const POWERUP_INTERVAL_MS: f32 = 5_000.0;
    pub const POWERUP_SIZE: f32 = 20.0;
    /// Lowest spawn height above the ground line
    pub const POWERUP_MIN_LIFT: f32 = 100.0;
    /// Random band added on top of `POWERUP_MIN_LIFT`
    pub const POWERUP_LIFT_RANGE: f32 = 150.0;
    pub const POWERUP_BONUS: u64 = 5;

    /// Crash burst
    pub const PARTICLE_COUNT: usize = 20;
    pub const PARTICLE_MIN_SPEED: f32 = 2.0;
    pub const PARTICLE_MAX_SPEED: f32 = 5.0;
    /// Lifetimes in frame units
    pub const PARTICLE_MIN_LIFE: f32 = 30.0;
    pub const PARTICLE_MAX_LIFE: f32 = 60.0;
    pub const PARTICLE_RADIUS: f32 = 3.0;

    /// Parallax scroll factors (far, near)
    pub const PARALLAX_FACTORS: [f32; 2] = [0.3, 0.6];
}

/// Convert a frame delta in milliseconds to frame units
#[inline]
pub fn frame_units(dt_ms: f32) -> f32 {
    dt_ms / consts::FRAME_MS
}
