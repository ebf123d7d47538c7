//! Per-frame simulation step
//!
//! Advances physics, spawn timers and difficulty by a variable frame delta.
//! Motion is expressed per 16 ms frame unit and scaled by `dt / 16`.

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::MAX_FRAME_MS;
use crate::frame_units;

/// One-shot commands collected between frames
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (Space / ArrowUp)
    pub jump: bool,
    /// Pause toggle (P / button)
    pub pause: bool,
}

impl TickInput {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl GameState {
    /// Launch the player upward if standing on the ground.
    /// Returns false for mid-air requests or when the run is not active.
    pub fn jump(&mut self) -> bool {
        if !self.is_running() || !self.player.on_ground(&self.surface) {
            return false;
        }
        self.player.vy = self.tuning.jump_velocity;
        self.emit(GameEvent::Jumped);
        true
    }

    /// Toggle Running ⇄ Paused; no effect after game over
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::GameOver => GamePhase::GameOver,
        };
        log::info!("Phase: {:?}", self.phase);
    }
}

/// Advance the game state by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    let dt_ms = if dt_ms.is_finite() {
        dt_ms.clamp(0.0, MAX_FRAME_MS)
    } else {
        0.0
    };
    let f = frame_units(dt_ms);

    if input.pause {
        state.toggle_pause();
    }
    if input.jump {
        state.jump();
    }

    if state.is_running() {
        step_running(state, dt_ms, f);
    }

    // Particles keep animating while paused and after game over
    for particle in state.particles.iter_mut() {
        particle.update(f);
    }
    state.particles.retain(|p| p.is_alive());

    let (speed, width) = (state.speed, state.surface.width);
    for layer in state.layers.iter_mut() {
        layer.scroll(speed, f, width);
    }
}

fn step_running(state: &mut GameState, dt_ms: f32, f: f32) {
    state.elapsed_ms += dt_ms as f64;

    // Difficulty ramp
    state.difficulty_ms += dt_ms;
    if state.difficulty_ms > state.tuning.difficulty_interval_ms {
        state.speed += state.tuning.speed_step;
        state.difficulty_ms = 0.0;
        log::debug!("Speed up: {:.1}", state.speed);
        state.emit(GameEvent::SpeedUp { speed: state.speed });
    }

    let surface = state.surface;
    state.player.integrate(state.tuning.gravity, f, &surface);

    // Spawning
    state.obstacle_timer_ms += dt_ms;
    if state.obstacle_timer_ms > state.tuning.obstacle_interval_ms {
        state.spawn_obstacle();
        state.obstacle_timer_ms = 0.0;
    }
    state.powerup_timer_ms += dt_ms;
    if state.powerup_timer_ms > state.tuning.powerup_interval_ms {
        state.spawn_powerup();
        state.powerup_timer_ms = 0.0;
    }

    let player_box = state.player.aabb();

    // Obstacles: advance, then test against the player
    let mut crashed = false;
    for obstacle in state.obstacles.iter_mut() {
        obstacle.pos.x -= obstacle.speed * f;
        if obstacle.aabb().overlaps(&player_box) {
            crashed = true;
        }
    }

    // Power-ups: advance, collect once
    let bonus = state.tuning.powerup_bonus;
    let mut collected = Vec::new();
    for powerup in state.powerups.iter_mut() {
        powerup.pos.x -= powerup.speed * f;
        if !powerup.collected && powerup.aabb().overlaps(&player_box) {
            powerup.collected = true;
            collected.push(powerup.id);
        }
    }
    for id in collected {
        state.score += bonus;
        state.emit(GameEvent::PowerUpCollected { id });
    }

    // Cull off-screen entities; each cleared obstacle is a point
    let mut cleared = Vec::new();
    state.obstacles.retain(|o| {
        if o.off_screen() {
            cleared.push(o.id);
            false
        } else {
            true
        }
    });
    for id in cleared {
        state.score += 1;
        state.emit(GameEvent::ObstacleCleared { id });
    }
    state.powerups.retain(|p| !p.off_screen());

    if crashed {
        end_run(state);
    }
}

/// Transition into GameOver. Only reachable from Running, so the burst and
/// the GameOver event happen once per run.
fn end_run(state: &mut GameState) {
    let at = state.player.aabb().center();
    state.spawn_burst(at);
    state.phase = GamePhase::GameOver;
    state.obstacles.clear();
    state.powerups.clear();
    state.emit(GameEvent::Crashed { at });
    state.emit(GameEvent::GameOver { score: state.score });
    log::info!(
        "Game over: score {} at speed {:.1} after {:.1}s",
        state.score,
        state.speed,
        state.elapsed_ms / 1000.0
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SurfaceSize;
    use crate::sim::state::{Obstacle, PowerUp};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f32 = 16.0;

    fn grounded_state(tuning: Tuning) -> GameState {
        let mut state = GameState::new(12345, tuning, SurfaceSize::default());
        state.player.pos.y = state.player.ground_y(&state.surface);
        state
    }

    /// No automatic spawns, so tests control every entity
    fn quiet_tuning() -> Tuning {
        Tuning {
            obstacle_interval_ms: 1.0e9,
            powerup_interval_ms: 1.0e9,
            ..Default::default()
        }
    }

    fn idle(state: &mut GameState, frames: usize) {
        let input = TickInput::default();
        for _ in 0..frames {
            tick(state, &input, DT);
        }
    }

    fn game_over_count(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count()
    }

    #[test]
    fn test_obstacle_scrolls_and_scores() {
        let mut state = grounded_state(quiet_tuning());
        let id = state.next_entity_id();
        // Top lane, never touches the grounded player
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(800.0, 0.0),
            size: Vec2::new(20.0, 20.0),
            speed: 4.0,
        });

        idle(&mut state, 10);
        assert_eq!(state.obstacles[0].pos.x, 760.0);

        idle(&mut state, 195);
        assert_eq!(state.obstacles[0].pos.x, -20.0);
        assert_eq!(state.score, 0);

        idle(&mut state, 1);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 1);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::ObstacleCleared { id })
        );
    }

    #[test]
    fn test_obstacle_spawn_interval() {
        let mut state = grounded_state(Tuning {
            powerup_interval_ms: 1.0e9,
            ..Default::default()
        });
        idle(&mut state, 93);
        assert!(state.obstacles.is_empty());
        idle(&mut state, 1);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacle_timer_ms, 0.0);
        // Spawned at the right edge, then advanced once
        assert_eq!(state.obstacles[0].pos.x, 800.0 - 4.0);
    }

    #[test]
    fn test_powerup_spawn_interval() {
        let mut state = grounded_state(Tuning {
            obstacle_interval_ms: 1.0e9,
            ..Default::default()
        });
        // 5000 / 16 = 312.5
        idle(&mut state, 312);
        assert!(state.powerups.is_empty());
        idle(&mut state, 1);
        assert_eq!(state.powerups.len(), 1);
    }

    #[test]
    fn test_difficulty_ramp() {
        let mut state = grounded_state(quiet_tuning());
        idle(&mut state, 625);
        assert_eq!(state.speed, 4.0);
        idle(&mut state, 1);
        assert_eq!(state.speed, 4.5);
        assert_eq!(state.difficulty_ms, 0.0);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::SpeedUp { speed: 4.5 })
        );
    }

    #[test]
    fn test_new_obstacles_inherit_speed() {
        let mut state = grounded_state(quiet_tuning());
        state.speed = 6.5;
        state.spawn_obstacle();
        assert_eq!(state.obstacles[0].speed, 6.5);
    }

    #[test]
    fn test_jump_and_land() {
        let mut state = grounded_state(quiet_tuning());
        let ground = state.player.ground_y(&state.surface);

        assert!(state.jump());
        assert_eq!(state.player.vy, -12.0);

        let mut landed_at = None;
        for step in 1..=60 {
            idle(&mut state, 1);
            assert!(state.player.pos.y <= ground);
            if state.player.on_ground(&state.surface) {
                landed_at = Some(step);
                break;
            }
        }
        let landed_at = landed_at.expect("player never landed");
        assert!((39..=40).contains(&landed_at), "landed at {landed_at}");
        assert_eq!(state.player.pos.y, ground);
    }

    #[test]
    fn test_no_double_jump() {
        let mut state = grounded_state(quiet_tuning());
        assert!(state.jump());
        idle(&mut state, 5);
        let vy = state.player.vy;
        assert!(!state.jump());
        assert_eq!(state.player.vy, vy);
    }

    #[test]
    fn test_jump_via_input() {
        let mut state = grounded_state(quiet_tuning());
        let ground = state.player.ground_y(&state.surface);
        tick(
            &mut state,
            &TickInput {
                jump: true,
                ..Default::default()
            },
            DT,
        );
        assert!(state.player.pos.y < ground);
        assert!(state.drain_events().contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_player_falls_to_ground_at_start() {
        let mut state = GameState::new(1, quiet_tuning(), SurfaceSize::default());
        assert_eq!(state.player.pos.y, 0.0);
        idle(&mut state, 200);
        assert_eq!(state.player.pos.y, 350.0);
        assert_eq!(state.player.vy, 0.0);
    }

    #[test]
    fn test_crash_is_idempotent() {
        let mut state = grounded_state(quiet_tuning());
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(80.0, 370.0),
            size: Vec2::new(20.0, 30.0),
            speed: 4.0,
        });

        idle(&mut state, 1);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.particles.len(), 20);
        assert!(state.obstacles.is_empty());
        let events = state.drain_events();
        assert_eq!(game_over_count(&events), 1);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::Crashed { .. }))
                .count(),
            1
        );

        // Frozen afterwards: no new bursts, no more events, speed fixed
        let speed = state.speed;
        let particles = state.particles.len();
        for _ in 0..10 {
            idle(&mut state, 1);
            assert!(state.particles.len() <= particles);
        }
        assert_eq!(game_over_count(&state.drain_events()), 0);
        assert_eq!(state.speed, speed);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_powerup_collected_once() {
        let mut state = grounded_state(quiet_tuning());
        let id = state.next_entity_id();
        state.powerups.push(PowerUp {
            id,
            pos: Vec2::new(60.0, 360.0),
            size: Vec2::splat(20.0),
            speed: 4.0,
            collected: false,
        });

        idle(&mut state, 1);
        assert_eq!(state.score, 5);
        assert!(state.powerups[0].collected);

        // Still overlapping on the next frames, no further bonus
        idle(&mut state, 3);
        assert_eq!(state.score, 5);
        assert_eq!(
            state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::PowerUpCollected { .. }))
                .count(),
            1
        );

        // Collected pickups still leave through the left edge, without scoring
        idle(&mut state, 30);
        assert!(state.powerups.is_empty());
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_pause_freezes_world_but_not_particles() {
        let mut state = grounded_state(quiet_tuning());
        state.spawn_obstacle();
        state.obstacles[0].pos.y = 0.0;
        state.spawn_burst(Vec2::new(100.0, 100.0));

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, DT);
        assert_eq!(state.phase, GamePhase::Paused);

        let x = state.obstacles[0].pos.x;
        let life = state.particles[0].life;
        idle(&mut state, 5);
        assert_eq!(state.obstacles[0].pos.x, x);
        assert!(state.particles[0].life < life);
        assert_eq!(state.difficulty_ms, 0.0);

        // Jump ignored while paused
        assert!(!state.jump());

        tick(&mut state, &pause, DT);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.obstacles[0].pos.x < x);
    }

    #[test]
    fn test_pause_ignored_after_game_over() {
        let mut state = grounded_state(quiet_tuning());
        state.phase = GamePhase::GameOver;
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, DT);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_particles_expire() {
        let mut state = grounded_state(quiet_tuning());
        state.spawn_burst(Vec2::new(100.0, 100.0));
        // Longest life is under 60 frame units
        idle(&mut state, 60);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut state = grounded_state(quiet_tuning());
        tick(&mut state, &TickInput::default(), 60_000.0);
        assert_eq!(state.difficulty_ms, MAX_FRAME_MS);
        tick(&mut state, &TickInput::default(), f32::NAN);
        assert_eq!(state.difficulty_ms, MAX_FRAME_MS);
    }

    #[test]
    fn test_background_scrolls() {
        let mut state = grounded_state(quiet_tuning());
        idle(&mut state, 1);
        assert!((state.layers[0].offset + 1.2).abs() < 1e-4);
        assert!((state.layers[1].offset + 2.4).abs() < 1e-4);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999, Tuning::default(), SurfaceSize::default());
        let mut b = GameState::new(99999, Tuning::default(), SurfaceSize::default());
        let inputs = [
            TickInput::default(),
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for i in 0..400 {
            let input = &inputs[i % inputs.len()];
            tick(&mut a, input, DT);
            tick(&mut b, input, DT);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        for (oa, ob) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(oa.size, ob.size);
        }
    }

    proptest! {
        #[test]
        fn prop_frame_invariants(
            frames in prop::collection::vec((0.0f32..120.0, any::<bool>(), 0u8..20), 1..600),
        ) {
            let mut state = GameState::new(42, Tuning::default(), SurfaceSize::default());
            let mut last_speed = state.speed;
            let mut game_overs = 0;
            let mut burst_seen = false;
            let mut last_particles = 0;

            for (dt, jump, pause_roll) in frames {
                let input = TickInput { jump, pause: pause_roll == 0 };
                let was_over = state.phase == GamePhase::GameOver;
                tick(&mut state, &input, dt);

                let ground = state.player.ground_y(&state.surface);
                prop_assert!(state.player.pos.y <= ground);

                prop_assert!(state.speed >= last_speed);
                last_speed = state.speed;

                for o in &state.obstacles {
                    prop_assert!(o.pos.x + o.size.x >= 0.0);
                    prop_assert!(o.pos.x <= state.surface.width);
                }
                for p in &state.powerups {
                    prop_assert!(p.pos.x + p.size.x >= 0.0);
                    prop_assert!(p.pos.x <= state.surface.width);
                }
                prop_assert!(state.particles.iter().all(|p| p.life > 0.0));

                if was_over {
                    prop_assert_eq!(state.phase, GamePhase::GameOver);
                    prop_assert!(state.obstacles.is_empty());
                }

                game_overs += game_over_count(&state.drain_events());
                if burst_seen {
                    // Particles only ever come from the one crash burst
                    prop_assert!(state.particles.len() <= last_particles);
                }
                if state.phase == GamePhase::GameOver {
                    burst_seen = true;
                }
                last_particles = state.particles.len();
            }
            prop_assert!(game_overs <= 1);
        }

        #[test]
        fn prop_layer_offsets_stay_in_band(far in 0.0f32..=1.0, near in 0.0f32..=1.0) {
            let tuning = Tuning {
                parallax_factors: [far, near],
                ..quiet_tuning()
            };
            prop_assert!(tuning.validate().is_ok());
            let mut state = grounded_state(tuning);
            let width = state.surface.width;
            for _ in 0..1000 {
                tick(&mut state, &TickInput::default(), DT);
                for layer in &state.layers {
                    prop_assert!(layer.offset > -width && layer.offset <= 0.0);
                }
            }
        }
    }
}
