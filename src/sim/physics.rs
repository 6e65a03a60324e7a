//! Physics integration and entity lifecycle
//!
//! Explicit Euler: gravity into velocity, velocity into position,
//! spin into rotation, then cull anything out of bounds or expired.

use super::state::{FallingObject, GameState};
use crate::consts::*;

fn integrate(obj: &mut FallingObject, dt: f32) {
    obj.vel.y += GRAVITY * dt;
    obj.pos += obj.vel * dt;
    obj.rotation += obj.spin * dt;
}

/// Advance every live entity by `dt` frame units and remove the dead.
pub fn step(state: &mut GameState, dt: f32) {
    let floor = state.bounds.height + CULL_MARGIN;

    for fruit in &mut state.fruits {
        integrate(fruit, dt);
    }
    state.fruits.retain(|f| f.pos.y <= floor);

    for bomb in &mut state.bombs {
        integrate(bomb, dt);
    }
    state.bombs.retain(|b| b.pos.y <= floor);

    for frag in &mut state.fragments {
        frag.vel.y += GRAVITY * dt;
        frag.pos += frag.vel * dt;
        frag.rotation += frag.spin * dt;
        frag.age += dt;
    }
    state
        .fragments
        .retain(|f| f.age <= FRAGMENT_LIFETIME && f.pos.y <= floor);

    // Explosions only age; their game-over trigger is evaluated by the
    // tick loop, independent of this cull.
    for explosion in &mut state.explosions {
        explosion.age += dt;
    }
    state.explosions.retain(|e| e.age <= EXPLOSION_LIFETIME);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Explosion, Fragment, FruitKind, ObjectKind, SurfaceBounds};
    use glam::Vec2;

    fn test_state() -> GameState {
        GameState::new(1, SurfaceBounds::new(400.0, 800.0))
    }

    fn fruit_at(pos: Vec2, vel: Vec2) -> FallingObject {
        FallingObject {
            pos,
            vel,
            radius: OBJECT_RADIUS,
            rotation: 0.0,
            spin: 0.05,
            kind: ObjectKind::Fruit(FruitKind::Apple),
            sliced: false,
        }
    }

    #[test]
    fn test_euler_integration() {
        let mut state = test_state();
        state
            .fruits
            .push(fruit_at(Vec2::new(100.0, 500.0), Vec2::new(2.0, -15.0)));

        step(&mut state, 1.0);

        let fruit = &state.fruits[0];
        // Gravity applies before the position update
        assert_eq!(fruit.vel.y, -15.0 + GRAVITY);
        assert_eq!(fruit.pos.x, 102.0);
        assert_eq!(fruit.pos.y, 500.0 + (-15.0 + GRAVITY));
        assert_eq!(fruit.rotation, 0.05);
    }

    #[test]
    fn test_cull_below_surface_regardless_of_velocity() {
        let mut state = test_state();
        // Below the cull line but still moving upward fast
        state
            .fruits
            .push(fruit_at(Vec2::new(100.0, 901.0), Vec2::new(0.0, -50.0)));
        state
            .bombs
            .push(fruit_at(Vec2::new(100.0, 950.0), Vec2::new(0.0, -50.0)));

        step(&mut state, 0.001);

        assert!(state.fruits.is_empty());
        assert!(state.bombs.is_empty());
    }

    #[test]
    fn test_fragment_expires_by_age() {
        let mut state = test_state();
        state.fragments.push(Fragment {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            radius: OBJECT_RADIUS,
            rotation: 0.0,
            spin: 0.0,
            kind: FruitKind::Grape,
            age: FRAGMENT_LIFETIME - 0.5,
        });

        step(&mut state, 1.0);
        assert!(state.fragments.is_empty());
    }

    #[test]
    fn test_explosion_expires_independently() {
        let mut state = test_state();
        state.explosions.push(Explosion {
            pos: Vec2::new(100.0, 100.0),
            age: EXPLOSION_LIFETIME - 0.5,
            triggers_game_over: true,
        });

        step(&mut state, 1.0);
        // Removal does not depend on the trigger flag
        assert!(state.explosions.is_empty());
    }
}
