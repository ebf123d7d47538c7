//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Variable frame delta, clamped by the caller and again in `tick`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use state::{
    BackgroundLayer, GameEvent, GamePhase, GameState, Obstacle, Particle, Player, PowerUp,
    Snapshot,
};
pub use tick::{TickInput, tick};
