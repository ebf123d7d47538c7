//! Scene composition
//!
//! Back to front: background layers, HUD text, player, pickups, obstacles,
//! particles, phase overlays.

use super::{Canvas, colors, fonts};
use crate::consts::PARTICLE_RADIUS;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// Issue every draw call for one frame
pub fn draw_frame(state: &GameState, settings: &Settings, canvas: &mut impl Canvas) {
    let (w, h) = (state.surface.width, state.surface.height);
    canvas.clear(w, h);

    // Each layer is drawn twice so the wrap seam is never visible
    for (i, layer) in state.layers.iter().enumerate() {
        if !canvas.layer_ready(i) {
            continue;
        }
        let x = if settings.parallax { layer.offset } else { 0.0 };
        canvas.draw_layer(i, x, 0.0, w, h);
        canvas.draw_layer(i, x + w, 0.0, w, h);
    }

    if settings.show_hud {
        let snap = state.snapshot();
        canvas.fill_text(&format!("Score: {}", snap.score), 10.0, 30.0, fonts::HUD, colors::TEXT);
        canvas.fill_text(
            &format!("High Score: {}", snap.high_score),
            10.0,
            60.0,
            fonts::HUD,
            colors::TEXT,
        );
    }

    let p = &state.player;
    canvas.fill_rect(p.pos.x, p.pos.y, p.size.x, p.size.y, colors::PLAYER);

    for powerup in state.powerups.iter().filter(|p| !p.collected) {
        let (pos, size) = (powerup.pos, powerup.size);
        canvas.fill_rect(pos.x, pos.y, size.x, size.y, colors::POWERUP);
    }
    for obstacle in &state.obstacles {
        let (pos, size) = (obstacle.pos, obstacle.size);
        canvas.fill_rect(pos.x, pos.y, size.x, size.y, colors::OBSTACLE);
    }

    if settings.particles {
        for particle in &state.particles {
            canvas.fill_circle(
                particle.pos.x,
                particle.pos.y,
                PARTICLE_RADIUS,
                colors::PARTICLE.with_alpha(particle.alpha),
            );
        }
    }

    match state.phase {
        GamePhase::GameOver => {
            canvas.fill_rect(0.0, 0.0, w, h, colors::OVERLAY);
            canvas.fill_text("Game Over", w / 2.0 - 100.0, h / 2.0, fonts::BANNER, colors::TEXT);
        }
        GamePhase::Paused => {
            canvas.fill_text("Paused", w / 2.0 - 60.0, h / 2.0, fonts::BANNER, colors::TEXT);
        }
        GamePhase::Running => {}
    }
}
