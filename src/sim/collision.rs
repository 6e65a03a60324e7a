//! Slash collision engine
//!
//! Runs once per gesture-extend event, not per render tick. Scans every
//! slash sub-segment against every live object; the first sub-segment to
//! hit an object wins and the object is removed from further
//! consideration within the same call.

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use super::geometry::segment_circle_hit;
use super::state::{
    Explosion, FallingObject, Fragment, FruitKind, GamePhase, GameState, ObjectKind,
};
use crate::consts::*;

/// Split a sliced fruit into two fragments deflected perpendicular to
/// the local slash direction, one to each side.
fn split_fruit(fruit: &FallingObject, kind: FruitKind, slash_angle: f32) -> [Fragment; 2] {
    let along = Vec2::new(slash_angle.cos(), slash_angle.sin());
    let perp = Vec2::new(
        (slash_angle + FRAC_PI_2).cos(),
        (slash_angle + FRAC_PI_2).sin(),
    );

    [
        Fragment {
            pos: fruit.pos - along * FRAGMENT_SPLIT_OFFSET,
            vel: fruit.vel - perp * FRAGMENT_SPLIT_SPEED,
            radius: fruit.radius,
            rotation: fruit.rotation,
            spin: fruit.spin - FRAGMENT_SPIN_DELTA,
            kind,
            age: 0.0,
        },
        Fragment {
            pos: fruit.pos + along * FRAGMENT_SPLIT_OFFSET,
            vel: fruit.vel + perp * FRAGMENT_SPLIT_SPEED,
            radius: fruit.radius,
            rotation: fruit.rotation,
            spin: fruit.spin + FRAGMENT_SPIN_DELTA,
            kind,
            age: 0.0,
        },
    ]
}

/// Check the current slash against all live objects.
///
/// Disabled entirely once a bomb has been hit or the death fade has
/// begun; this guarantees at most one bomb arms game over per run and
/// blocks slash-through scoring during the death animation.
pub fn check_slash(state: &mut GameState) {
    if state.slash.len() < 2 {
        return;
    }
    if state.blade_disabled() {
        return;
    }

    let segments: Vec<(Vec2, Vec2)> = state
        .slash
        .windows(2)
        .map(|pair| (pair[0].pos, pair[1].pos))
        .collect();

    // Fruit pass: first matching sub-segment slices, then the fruit is gone
    let mut new_fragments: Vec<Fragment> = Vec::new();
    let mut sliced = 0u32;
    state.fruits.retain_mut(|fruit| {
        let ObjectKind::Fruit(kind) = fruit.kind else {
            // Bombs never live in the fruit set
            return true;
        };
        for &(p1, p2) in &segments {
            if segment_circle_hit(p1, p2, fruit.pos, fruit.radius) {
                fruit.sliced = true;
                let angle = (p2.y - p1.y).atan2(p2.x - p1.x);
                new_fragments.extend(split_fruit(fruit, kind, angle));
                sliced += 1;
                return false;
            }
        }
        true
    });
    state.fragments.extend(new_fragments);
    state.score += sliced;

    // Bomb pass: independent of the fruit pass
    let mut exploded: Vec<Vec2> = Vec::new();
    state.bombs.retain_mut(|bomb| {
        for &(p1, p2) in &segments {
            if segment_circle_hit(p1, p2, bomb.pos, bomb.radius) {
                bomb.sliced = true;
                exploded.push(bomb.pos);
                return false;
            }
        }
        true
    });
    for pos in exploded {
        state.bomb_hit = true;
        state.phase = GamePhase::BombArmed;
        state.explosions.push(Explosion {
            pos,
            age: 0.0,
            triggers_game_over: true,
        });
        log::info!("bomb sliced at ({:.0}, {:.0})", pos.x, pos.y);
    }
}
