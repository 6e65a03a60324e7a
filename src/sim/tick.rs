//! Per-frame simulation advance
//!
//! One call per display frame. Within a tick the order is fixed:
//! clock advance → slash pruning → spawn → physics/cull → game-over
//! trigger/fade evaluation. Collision runs separately, inside the
//! gesture-extend handler, strictly between ticks.
//!
//! The delayed game-over is an explicit deadline held in state and
//! compared against the logical clock here — there is no detached host
//! timer — so tests advance time by ticking.

use super::state::{GamePhase, GameState};
use super::{physics, spawner};
use crate::consts::*;

/// Advance the simulation by `dt` frame units (1.0 = 16 ms of real time).
///
/// `dt` is clamped to [`MAX_FRAME_SCALE`] so a stalled tab cannot step
/// the world through walls on resume.
pub fn tick(state: &mut GameState, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_SCALE);
    state.clock_ms += (dt * FRAME_MS) as f64;
    let now = state.clock_ms;

    // Slash points age out of the blade whether or not a gesture is active
    state.slash.retain(|p| now - p.at_ms < SLASH_WINDOW_MS);

    if state.phase == GamePhase::NotStarted {
        return;
    }

    spawner::maybe_spawn(state, dt);
    physics::step(state, dt);

    // Arm the delayed game-over once the triggering explosion matures.
    // Each explosion's flag is one-shot and the slot is single-owner, so
    // repeated evaluation (or a second flagged explosion) cannot arm twice.
    for explosion in &mut state.explosions {
        if explosion.triggers_game_over && explosion.age > EXPLOSION_TRIGGER_AGE {
            explosion.triggers_game_over = false;
            if state.game_over_at.is_none() {
                state.game_over_at = Some(now + GAME_OVER_DELAY_MS);
            }
        }
    }

    // Scheduled trigger fires: assert game over, begin the fade
    if let Some(deadline) = state.game_over_at {
        if now >= deadline && state.phase == GamePhase::BombArmed {
            state.game_over_at = None;
            state.phase = GamePhase::Fading;
            state.fade_start_ms = now;
            state.fade_progress = 0.0;
            log::info!("game over asserted (score {})", state.score);
        }
    }

    if state.phase == GamePhase::Fading {
        state.fade_progress = (((now - state.fade_start_ms) / FADE_DURATION_MS).min(1.0)) as f32;
        if state.fade_progress >= 1.0 {
            state.phase = GamePhase::GameOver;
            state.high_score = state.high_score.max(state.score);
            log::info!(
                "run finished: score {}, session best {}",
                state.score,
                state.high_score
            );
        }
    }
}
