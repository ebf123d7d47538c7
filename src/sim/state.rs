//! Game state and core simulation types
//!
//! The loop owns a single [`GameState`]; the HUD and renderer only ever see
//! it by shared reference or through a [`Snapshot`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::{PLAYER_SIZE, PLAYER_X};
use crate::platform::SurfaceSize;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Frozen by the player
    Paused,
    /// Run ended (terminal until reset)
    GameOver,
}

/// Things that happened during a tick, drained by the host for sound/persistence
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Jumped,
    PowerUpCollected { id: u32 },
    ObstacleCleared { id: u32 },
    SpeedUp { speed: f32 },
    Crashed { at: Vec2 },
    GameOver { score: u64 },
}

/// The runner
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels per frame unit, negative = up)
    pub vy: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, 0.0),
            size: Vec2::splat(PLAYER_SIZE),
            vy: 0.0,
        }
    }
}

impl Player {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Top edge y when standing on the ground
    pub fn ground_y(&self, surface: &SurfaceSize) -> f32 {
        surface.height - self.size.y
    }

    pub fn on_ground(&self, surface: &SurfaceSize) -> bool {
        self.pos.y >= self.ground_y(surface)
    }

    /// Semi-implicit Euler step, then clamp to the ground line
    pub fn integrate(&mut self, gravity: f32, f: f32, surface: &SurfaceSize) {
        self.vy += gravity * f;
        self.pos.y += self.vy * f;

        let ground = self.ground_y(surface);
        if self.pos.y > ground {
            self.pos.y = ground;
            self.vy = 0.0;
        }
    }
}

/// Ground obstacle
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Scroll speed captured at spawn time
    pub speed: f32,
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Floating bonus pickup
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Collected pickups stop rendering but keep scrolling until off-screen
    pub collected: bool,
}

impl PowerUp {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// A particle for the crash burst
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per frame unit
    pub vel: Vec2,
    /// Remaining life in frame units
    pub life: f32,
    /// 0-1, derived from `life`
    pub alpha: f32,
}

/// Particle life (frame units) at which alpha reaches 1
pub const PARTICLE_FULL_ALPHA_LIFE: f32 = 60.0;

impl Particle {
    pub fn update(&mut self, f: f32) {
        self.pos += self.vel * f;
        self.life -= f;
        self.alpha = (self.life / PARTICLE_FULL_ALPHA_LIFE).clamp(0.0, 1.0);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// One parallax background layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundLayer {
    /// Horizontal offset, always in `(-width, 0]`
    pub offset: f32,
    /// Fraction of game speed this layer scrolls at
    pub factor: f32,
}

impl BackgroundLayer {
    pub fn new(factor: f32) -> Self {
        Self {
            offset: 0.0,
            factor,
        }
    }

    pub fn scroll(&mut self, speed: f32, f: f32, width: f32) {
        self.offset -= speed * self.factor * f;
        if width > 0.0 && self.offset <= -width {
            self.offset = self.offset.rem_euclid(width) - width;
            // rem_euclid can land exactly on `width`, i.e. offset 0
            if self.offset <= -width {
                self.offset += width;
            }
        }
    }
}

/// Read-only view for HUD/UI controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub score: u64,
    pub high_score: u64,
    pub speed: f32,
    pub phase: GamePhase,
    pub elapsed_ms: f64,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub surface: SurfaceSize,
    pub player: Player,
    /// Spawn order
    pub obstacles: Vec<Obstacle>,
    /// Spawn order
    pub powerups: Vec<PowerUp>,
    /// Visual only
    pub particles: Vec<Particle>,
    /// Far layer first
    pub layers: [BackgroundLayer; 2],
    pub score: u64,
    /// Best score known at run start (updated on game over)
    pub high_score: u64,
    /// Current scroll speed
    pub speed: f32,
    pub phase: GamePhase,
    /// Accumulators (ms)
    pub difficulty_ms: f32,
    pub obstacle_timer_ms: f32,
    pub powerup_timer_ms: f32,
    /// Running time of this run (ms, excludes pauses)
    pub elapsed_ms: f64,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning, surface: SurfaceSize) -> Self {
        let layers = [
            BackgroundLayer::new(tuning.parallax_factors[0]),
            BackgroundLayer::new(tuning.parallax_factors[1]),
        ];
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            speed: tuning.start_speed,
            tuning,
            surface,
            player: Player::default(),
            obstacles: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            layers,
            score: 0,
            high_score: 0,
            phase: GamePhase::Running,
            difficulty_ms: 0.0,
            obstacle_timer_ms: 0.0,
            powerup_timer_ms: 0.0,
            elapsed_ms: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Start a fresh run, keeping surface, tuning and high score
    pub fn reset(&mut self, seed: u64) {
        let high_score = self.high_score;
        *self = Self::new(seed, self.tuning.clone(), self.surface);
        self.high_score = high_score;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            high_score: self.high_score,
            speed: self.speed,
            phase: self.phase,
            elapsed_ms: self.elapsed_ms,
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply a new surface size, re-anchoring ground-bound entities
    pub fn resize(&mut self, surface: SurfaceSize) {
        let dh = surface.height - self.surface.height;
        let was_grounded = self.player.on_ground(&self.surface);
        self.surface = surface;

        let ground = self.player.ground_y(&surface);
        if was_grounded || self.player.pos.y > ground {
            self.player.pos.y = ground;
            self.player.vy = 0.0;
        }

        for obstacle in &mut self.obstacles {
            obstacle.pos.y = surface.height - obstacle.size.y;
            obstacle.pos.x = obstacle.pos.x.min(surface.width);
        }
        // Keep the lift above the ground, but never leave the surface
        for powerup in &mut self.powerups {
            let lowest = (surface.height - powerup.size.y).max(0.0);
            powerup.pos.y = (powerup.pos.y + dh).clamp(0.0, lowest);
            powerup.pos.x = powerup.pos.x.min(surface.width);
        }
        for layer in &mut self.layers {
            layer.offset = layer.offset.max(-surface.width);
            if layer.offset <= -surface.width {
                layer.offset = 0.0;
            }
        }
    }

    /// Spawn an obstacle at the right edge, standing on the ground
    pub fn spawn_obstacle(&mut self) {
        let t = &self.tuning;
        let (min_h, max_h, width) = (t.obstacle_min_height, t.obstacle_max_height, t.obstacle_width);
        let height = min_h + self.rng.random::<f32>() * (max_h - min_h);
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(self.surface.width, self.surface.height - height),
            size: Vec2::new(width, height),
            speed: self.speed,
        });
        log::debug!("Spawned obstacle {} (h={:.1})", id, height);
    }

    /// Spawn a power-up at the right edge in the band above the ground
    pub fn spawn_powerup(&mut self) {
        let t = &self.tuning;
        let (lift, range, size) = (t.powerup_min_lift, t.powerup_lift_range, t.powerup_size);
        let y = self.surface.height - lift - self.rng.random::<f32>() * range;
        let id = self.next_entity_id();
        self.powerups.push(PowerUp {
            id,
            pos: Vec2::new(self.surface.width, y),
            size: Vec2::splat(size),
            speed: self.speed,
            collected: false,
        });
        log::debug!("Spawned power-up {}", id);
    }

    /// Radial particle burst
    pub fn spawn_burst(&mut self, at: Vec2) {
        use crate::consts::{PARTICLE_MAX_SPEED, PARTICLE_MIN_SPEED};

        let (count, min_life, max_life) = (
            self.tuning.particle_count,
            self.tuning.particle_min_life,
            self.tuning.particle_max_life,
        );
        self.particles.reserve(count);
        for _ in 0..count {
            let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
            let speed = PARTICLE_MIN_SPEED
                + self.rng.random::<f32>() * (PARTICLE_MAX_SPEED - PARTICLE_MIN_SPEED);
            let life = min_life + self.rng.random::<f32>() * (max_life - min_life);
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::from_angle(angle) * speed,
                life,
                alpha: (life / PARTICLE_FULL_ALPHA_LIFE).clamp(0.0, 1.0),
            });
        }
    }
}
