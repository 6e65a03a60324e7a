//! Probabilistic object spawner
//!
//! Two independent Bernoulli trials per tick, scaled by elapsed frame
//! units so the spawn rate is frame-rate independent. Only the Playing
//! phase spawns.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use super::state::{FallingObject, FruitKind, GamePhase, GameState, ObjectKind, SurfaceBounds};
use crate::consts::*;

/// Construct a new object entering from below the surface with upward
/// velocity and a little horizontal drift.
pub fn launch_object(kind: ObjectKind, bounds: &SurfaceBounds, rng: &mut Pcg32) -> FallingObject {
    let spawn_span = (bounds.width - 2.0 * SPAWN_MARGIN_X).max(0.0);
    FallingObject {
        pos: Vec2::new(
            SPAWN_MARGIN_X + rng.random::<f32>() * spawn_span,
            bounds.height + SPAWN_BELOW,
        ),
        vel: Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0 * DRIFT_MAX,
            -rng.random_range(LAUNCH_SPEED_MIN..LAUNCH_SPEED_MAX),
        ),
        radius: OBJECT_RADIUS,
        rotation: rng.random_range(0.0..TAU),
        spin: (rng.random::<f32>() - 0.5) * 2.0 * SPIN_MAX,
        kind,
        sliced: false,
    }
}

/// Roll the per-tick spawn chances and push any new objects.
pub fn maybe_spawn(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    if state.rng.random::<f32>() < FRUIT_SPAWN_CHANCE * dt {
        let kind = FruitKind::ALL[state.rng.random_range(0..FruitKind::ALL.len())];
        let fruit = launch_object(ObjectKind::Fruit(kind), &state.bounds, &mut state.rng);
        state.fruits.push(fruit);
    }

    if state.rng.random::<f32>() < BOMB_SPAWN_CHANCE * dt {
        let bomb = launch_object(ObjectKind::Bomb, &state.bounds, &mut state.rng);
        state.bombs.push(bomb);
    }
}
