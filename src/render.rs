//! Render boundary
//!
//! `snapshot` composes a plain-data `Frame` from the live state — every
//! drawing backend consumes this and nothing else. Composing a frame
//! never mutates the simulation.

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::sim::state::{GamePhase, GameState, Rect, action_regions};

/// Glyph size for whole fruits and bombs (px)
pub const OBJECT_FONT_PX: f32 = 60.0;
/// Glyph size for sliced halves (px)
pub const FRAGMENT_FONT_PX: f32 = 45.0;
/// Glyph size for explosions before scaling (px)
pub const EXPLOSION_FONT_PX: f32 = 80.0;

/// A whole falling object to draw
#[derive(Debug, Clone, Serialize)]
pub struct Sprite {
    pub pos: Vec2,
    pub rotation: f32,
    pub emoji: &'static str,
}

/// A fading sliced half
#[derive(Debug, Clone, Serialize)]
pub struct FragmentSprite {
    pub pos: Vec2,
    pub rotation: f32,
    pub emoji: &'static str,
    pub opacity: f32,
}

/// An expanding, fading explosion
#[derive(Debug, Clone, Serialize)]
pub struct ExplosionSprite {
    pub pos: Vec2,
    pub opacity: f32,
    pub scale: f32,
}

/// One post-game-over action region with its current opacity
#[derive(Debug, Clone, Serialize)]
pub struct ActionButton {
    pub rect: Rect,
    pub label: &'static str,
    pub opacity: f32,
}

/// Game-over overlay contents, present while fading and after
#[derive(Debug, Clone, Serialize)]
pub struct Overlay {
    /// 0..1 darkness/fade-in of the whole overlay
    pub fade: f32,
    pub final_score: u32,
    pub share: ActionButton,
    pub restart: ActionButton,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub score: u32,
    pub fruits: Vec<Sprite>,
    pub bombs: Vec<Sprite>,
    pub fragments: Vec<FragmentSprite>,
    pub explosions: Vec<ExplosionSprite>,
    /// Blade trail polyline, oldest point first
    pub trail: Vec<Vec2>,
    pub overlay: Option<Overlay>,
    pub start_screen: bool,
}

fn button_opacity(fade: f32) -> f32 {
    ((fade - BUTTON_FADE_THRESHOLD) / (1.0 - BUTTON_FADE_THRESHOLD)).clamp(0.0, 1.0)
}

/// Compose the drawable snapshot for the current state.
pub fn snapshot(state: &GameState) -> Frame {
    let overlay = if matches!(state.phase, GamePhase::Fading | GamePhase::GameOver) {
        let regions = action_regions(&state.bounds);
        let opacity = button_opacity(state.fade_progress);
        Some(Overlay {
            fade: state.fade_progress,
            final_score: state.score,
            share: ActionButton {
                rect: regions.share,
                label: "CAST SCORE",
                opacity,
            },
            restart: ActionButton {
                rect: regions.restart,
                label: "PLAY AGAIN",
                opacity,
            },
        })
    } else {
        None
    };

    Frame {
        score: state.score,
        fruits: state
            .fruits
            .iter()
            .map(|f| Sprite {
                pos: f.pos,
                rotation: f.rotation,
                emoji: f.kind.emoji(),
            })
            .collect(),
        bombs: state
            .bombs
            .iter()
            .map(|b| Sprite {
                pos: b.pos,
                rotation: b.rotation,
                emoji: b.kind.emoji(),
            })
            .collect(),
        fragments: state
            .fragments
            .iter()
            .map(|f| FragmentSprite {
                pos: f.pos,
                rotation: f.rotation,
                emoji: f.kind.emoji(),
                opacity: f.opacity(),
            })
            .collect(),
        explosions: state
            .explosions
            .iter()
            .map(|e| ExplosionSprite {
                pos: e.pos,
                opacity: e.opacity(),
                scale: e.scale(),
            })
            .collect(),
        trail: state.slash.iter().map(|p| p.pos).collect(),
        overlay,
        start_screen: state.phase == GamePhase::NotStarted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Explosion, Fragment, FruitKind, SurfaceBounds};

    fn state_with(phase: GamePhase, fade: f32) -> GameState {
        let mut state = GameState::new(2, SurfaceBounds::new(400.0, 800.0));
        state.phase = phase;
        state.fade_progress = fade;
        state
    }

    #[test]
    fn test_start_screen_flag() {
        let frame = snapshot(&state_with(GamePhase::NotStarted, 0.0));
        assert!(frame.start_screen);
        assert!(frame.overlay.is_none());
    }

    #[test]
    fn test_overlay_button_opacity_ramp() {
        // Below the threshold the regions render fully transparent
        let frame = snapshot(&state_with(GamePhase::Fading, 0.5));
        let overlay = frame.overlay.expect("overlay while fading");
        assert_eq!(overlay.share.opacity, 0.0);

        // Half way through the ramp
        let frame = snapshot(&state_with(GamePhase::Fading, 0.85));
        let overlay = frame.overlay.unwrap();
        assert!((overlay.share.opacity - 0.5).abs() < 1e-3);

        // Fully landed
        let frame = snapshot(&state_with(GamePhase::GameOver, 1.0));
        let overlay = frame.overlay.unwrap();
        assert_eq!(overlay.restart.opacity, 1.0);
        assert_eq!(overlay.fade, 1.0);
    }

    #[test]
    fn test_entities_carry_draw_attributes() {
        let mut state = state_with(GamePhase::Playing, 0.0);
        state.fragments.push(Fragment {
            pos: glam::Vec2::new(10.0, 20.0),
            vel: glam::Vec2::ZERO,
            radius: 45.0,
            rotation: 1.0,
            spin: 0.0,
            kind: FruitKind::Lemon,
            age: 25.0,
        });
        state.explosions.push(Explosion {
            pos: glam::Vec2::new(50.0, 60.0),
            age: 15.0,
            triggers_game_over: false,
        });

        let frame = snapshot(&state);
        assert_eq!(frame.fragments.len(), 1);
        assert!((frame.fragments[0].opacity - 0.5).abs() < 1e-3);
        assert_eq!(frame.explosions.len(), 1);
        assert!((frame.explosions[0].scale - 2.0).abs() < 1e-3);
        assert!((frame.explosions[0].opacity - 0.7).abs() < 1e-3);
    }
}
