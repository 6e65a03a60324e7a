//! Input router
//!
//! Translates raw pointer/touch positions into gesture start/extend/end
//! calls and the post-game-over hit tests. Side effects the sim cannot
//! perform itself (navigation) are returned as a `HostAction` for the
//! host to execute.

use glam::Vec2;

use super::collision;
use super::state::{GamePhase, GameState, SlashPoint, SurfaceBounds, action_regions};
use crate::consts::*;

/// Host-side effect requested by a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    /// Navigate to the score-sharing compose surface
    Share { score: u32 },
}

/// Pointer/touch down: action-region hit test, run start, or gesture start.
///
/// Events with non-finite coordinates are ignored without mutating state.
pub fn pointer_down(state: &mut GameState, x: f32, y: f32) -> Option<HostAction> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    let p = Vec2::new(x, y);

    // Post-game-over action regions, interactive once the fade has landed
    if matches!(state.phase, GamePhase::Fading | GamePhase::GameOver)
        && state.fade_progress > BUTTON_FADE_THRESHOLD
    {
        let regions = action_regions(&state.bounds);
        if regions.share.contains(p) {
            log::info!("share requested (score {})", state.score);
            return Some(HostAction::Share { score: state.score });
        }
        if regions.restart.contains(p) {
            log::info!("restart");
            state.start_run();
        }
        return None;
    }

    if state.phase == GamePhase::NotStarted {
        log::info!("run started");
        state.start_run();
        return None;
    }

    // Begin a new gesture
    state.slashing = true;
    state.slash.clear();
    state.slash.push(SlashPoint {
        pos: p,
        at_ms: state.clock_ms,
    });
    None
}

/// Pointer/touch move: extend the active gesture and check collisions.
///
/// No-op while no gesture is active or the blade is disabled.
pub fn pointer_move(state: &mut GameState, x: f32, y: f32) {
    if !state.slashing {
        return;
    }
    if !x.is_finite() || !y.is_finite() {
        return;
    }
    if state.blade_disabled() {
        return;
    }

    state.slash.push(SlashPoint {
        pos: Vec2::new(x, y),
        at_ms: state.clock_ms,
    });
    collision::check_slash(state);
}

/// Pointer up / leave / cancel: end the gesture. Existing points keep
/// aging out through the recency window.
pub fn pointer_up(state: &mut GameState) {
    state.slashing = false;
}

/// Surface resize: refresh the bounds used for spawning, culling, and
/// action-region layout.
pub fn resize(state: &mut GameState, width: f32, height: f32) {
    state.bounds = SurfaceBounds::new(width, height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{FallingObject, FruitKind, ObjectKind};
    use crate::sim::tick::tick;

    fn fresh_state() -> GameState {
        GameState::new(11, SurfaceBounds::new(400.0, 800.0))
    }

    fn fruit_at(x: f32, y: f32) -> FallingObject {
        FallingObject {
            pos: Vec2::new(x, y),
            vel: Vec2::new(1.5, -12.0),
            radius: OBJECT_RADIUS,
            rotation: 0.0,
            spin: 0.0,
            kind: ObjectKind::Fruit(FruitKind::Peach),
            sliced: false,
        }
    }

    #[test]
    fn test_down_starts_run_from_start_screen() {
        let mut state = fresh_state();
        assert_eq!(pointer_down(&mut state, 200.0, 400.0), None);
        assert_eq!(state.phase, GamePhase::Playing);
        // The starting tap is not a slash
        assert!(!state.slashing);
        assert!(state.slash.is_empty());
    }

    #[test]
    fn test_fruit_sliced_end_to_end() {
        let mut state = fresh_state();
        state.start_run();
        state.fruits.push(fruit_at(200.0, 400.0));

        pointer_down(&mut state, 100.0, 400.0);
        assert!(state.slashing);
        pointer_move(&mut state, 300.0, 400.0);

        assert!(state.fruits.is_empty());
        assert_eq!(state.score, 1);
        assert_eq!(state.fragments.len(), 2);
        // Halves deflect to opposite sides of the horizontal slash
        assert!(state.fragments[0].vel.y < -12.0);
        assert!(state.fragments[1].vel.y > -12.0);

        pointer_up(&mut state);
        assert!(!state.slashing);
    }

    #[test]
    fn test_bomb_sliced_end_to_end() {
        let mut state = fresh_state();
        state.start_run();
        state.score = 3;
        state.bombs.push(FallingObject {
            kind: ObjectKind::Bomb,
            ..fruit_at(200.0, 400.0)
        });

        pointer_down(&mut state, 100.0, 400.0);
        pointer_move(&mut state, 300.0, 400.0);

        assert!(state.bomb_hit);
        assert_eq!(state.phase, GamePhase::BombArmed);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].pos, Vec2::new(200.0, 400.0));

        // Further slashing through fruit scores nothing
        state.fruits.push(fruit_at(200.0, 300.0));
        pointer_move(&mut state, 200.0, 300.0);
        assert_eq!(state.score, 3);
        assert_eq!(state.fruits.len(), 1);

        // Advance through trigger, delay, and fade
        for _ in 0..250 {
            tick(&mut state, 1.0);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.fade_progress, 1.0);
        assert_eq!(state.high_score, 3);
    }

    #[test]
    fn test_restart_region_resets_run() {
        let mut state = fresh_state();
        state.start_run();
        state.score = 9;
        state.phase = GamePhase::GameOver;
        state.fade_progress = 1.0;

        let regions = action_regions(&state.bounds);
        let p = Vec2::new(
            regions.restart.x + regions.restart.w / 2.0,
            regions.restart.y + regions.restart.h / 2.0,
        );
        assert_eq!(pointer_down(&mut state, p.x, p.y), None);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 9);
    }

    #[test]
    fn test_share_region_reports_final_score() {
        let mut state = fresh_state();
        state.start_run();
        state.score = 21;
        state.phase = GamePhase::GameOver;
        state.fade_progress = 1.0;

        let regions = action_regions(&state.bounds);
        let action = pointer_down(
            &mut state,
            regions.share.x + 10.0,
            regions.share.y + 10.0,
        );
        assert_eq!(action, Some(HostAction::Share { score: 21 }));
        // Share is a read, not a transition
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 21);
    }

    #[test]
    fn test_regions_inert_below_fade_threshold() {
        let mut state = fresh_state();
        state.start_run();
        state.phase = GamePhase::Fading;
        state.fade_progress = 0.5;

        let regions = action_regions(&state.bounds);
        let action = pointer_down(
            &mut state,
            regions.restart.x + 10.0,
            regions.restart.y + 10.0,
        );
        assert_eq!(action, None);
        // Falls through to a (harmless) gesture start; no restart happened
        assert_eq!(state.phase, GamePhase::Fading);
        assert!(state.slashing);
    }

    #[test]
    fn test_malformed_coordinates_ignored() {
        let mut state = fresh_state();
        state.start_run();
        assert_eq!(pointer_down(&mut state, f32::NAN, 10.0), None);
        assert!(!state.slashing);
        assert!(state.slash.is_empty());

        pointer_down(&mut state, 10.0, 10.0);
        pointer_move(&mut state, 10.0, f32::INFINITY);
        assert_eq!(state.slash.len(), 1);
    }

    #[test]
    fn test_move_without_gesture_ignored() {
        let mut state = fresh_state();
        state.start_run();
        pointer_move(&mut state, 50.0, 50.0);
        assert!(state.slash.is_empty());
    }

    #[test]
    fn test_resize_updates_bounds() {
        let mut state = fresh_state();
        resize(&mut state, 1024.0, 768.0);
        assert_eq!(state.bounds.width, 1024.0);
        assert_eq!(state.bounds.height, 768.0);
    }
}
