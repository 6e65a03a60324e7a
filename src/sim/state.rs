//! Entity model and session state
//!
//! Everything the simulation mutates lives here. State is advanced only
//! through `tick` and the input router, never from host callbacks directly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing spawns or moves
    NotStarted,
    /// Active gameplay, spawner and blade live
    Playing,
    /// A bomb was sliced; explosion animating, blade disabled
    BombArmed,
    /// Game over asserted, overlay fading in
    Fading,
    /// Fade complete, score frozen, action regions live
    GameOver,
}

/// The eight fruit variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FruitKind {
    Apple,
    Orange,
    Lemon,
    Watermelon,
    Grape,
    Strawberry,
    Peach,
    Pineapple,
}

impl FruitKind {
    pub const ALL: [FruitKind; 8] = [
        FruitKind::Apple,
        FruitKind::Orange,
        FruitKind::Lemon,
        FruitKind::Watermelon,
        FruitKind::Grape,
        FruitKind::Strawberry,
        FruitKind::Peach,
        FruitKind::Pineapple,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            FruitKind::Apple => "\u{1F34E}",
            FruitKind::Orange => "\u{1F34A}",
            FruitKind::Lemon => "\u{1F34B}",
            FruitKind::Watermelon => "\u{1F349}",
            FruitKind::Grape => "\u{1F347}",
            FruitKind::Strawberry => "\u{1F353}",
            FruitKind::Peach => "\u{1F351}",
            FruitKind::Pineapple => "\u{1F34D}",
        }
    }

    /// Accent color for glow tinting
    pub fn color(&self) -> &'static str {
        match self {
            FruitKind::Apple => "#ff0000",
            FruitKind::Orange => "#ffa500",
            FruitKind::Lemon => "#ffff00",
            FruitKind::Watermelon => "#ff6347",
            FruitKind::Grape => "#9370db",
            FruitKind::Strawberry => "#dc143c",
            FruitKind::Peach => "#ffdab9",
            FruitKind::Pineapple => "#ffd700",
        }
    }
}

/// Visual kind tag of a falling object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Fruit(FruitKind),
    Bomb,
}

impl ObjectKind {
    pub fn emoji(&self) -> &'static str {
        match self {
            ObjectKind::Fruit(kind) => kind.emoji(),
            ObjectKind::Bomb => "\u{1F4A3}",
        }
    }
}

/// A live falling object (fruit or bomb)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingObject {
    pub pos: Vec2,
    /// px per frame unit
    pub vel: Vec2,
    pub radius: f32,
    pub rotation: f32,
    /// radians per frame unit
    pub spin: f32,
    pub kind: ObjectKind,
    pub sliced: bool,
}

/// Half of a sliced fruit, alive for a short fade-out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub rotation: f32,
    pub spin: f32,
    pub kind: FruitKind,
    /// Frame units alive
    pub age: f32,
}

impl Fragment {
    /// Fades to zero well before the fragment is culled
    pub fn opacity(&self) -> f32 {
        (1.0 - self.age / FRAGMENT_FADE_AGE).max(0.0)
    }
}

/// Explosion left behind by a sliced bomb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    /// Frame units alive
    pub age: f32,
    /// One-shot: cleared when the delayed game-over trigger is armed
    pub triggers_game_over: bool,
}

impl Explosion {
    pub fn opacity(&self) -> f32 {
        (1.0 - self.age / EXPLOSION_LIFETIME).max(0.0)
    }

    pub fn scale(&self) -> f32 {
        1.0 + self.age / EXPLOSION_SCALE_AGE
    }
}

/// One sample of the active slash gesture
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlashPoint {
    pub pos: Vec2,
    /// Logical clock at creation (ms)
    pub at_ms: f64,
}

/// Visible surface dimensions (CSS pixels)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SurfaceBounds {
    pub width: f32,
    pub height: f32,
}

impl SurfaceBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }
}

/// Axis-aligned rectangle for hit tests and overlay layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// The two post-game-over action regions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActionRegions {
    pub share: Rect,
    pub restart: Rect,
}

/// Layout the action regions for the current surface size
pub fn action_regions(bounds: &SurfaceBounds) -> ActionRegions {
    let x = bounds.width / 2.0 - BUTTON_WIDTH / 2.0;
    let share_y = bounds.height * SHARE_BUTTON_Y_FRAC;
    ActionRegions {
        share: Rect {
            x,
            y: share_y,
            w: BUTTON_WIDTH,
            h: BUTTON_HEIGHT,
        },
        restart: Rect {
            x,
            y: share_y + BUTTON_HEIGHT + BUTTON_GAP,
            w: BUTTON_WIDTH,
            h: BUTTON_HEIGHT,
        },
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// Logical simulation clock (ms), advanced by tick
    pub clock_ms: f64,
    pub bounds: SurfaceBounds,
    /// Current run score
    pub score: u32,
    /// Session maximum across runs
    pub high_score: u32,
    /// Set on the first bomb slice of a run; disables all blade effects
    pub bomb_hit: bool,
    pub fruits: Vec<FallingObject>,
    pub bombs: Vec<FallingObject>,
    pub fragments: Vec<Fragment>,
    pub explosions: Vec<Explosion>,
    /// Recent gesture samples, oldest first
    pub slash: Vec<SlashPoint>,
    /// A gesture is currently active (pointer down)
    pub slashing: bool,
    /// The single pending game-over trigger: a clock_ms deadline.
    /// Armed only when empty; cancelled by restart.
    pub game_over_at: Option<f64>,
    pub fade_start_ms: f64,
    /// 0..1 once Fading begins
    pub fade_progress: f32,
    pub(crate) rng: Pcg32,
}

impl GameState {
    pub fn new(seed: u64, bounds: SurfaceBounds) -> Self {
        Self {
            seed,
            phase: GamePhase::NotStarted,
            clock_ms: 0.0,
            bounds,
            score: 0,
            high_score: 0,
            bomb_hit: false,
            fruits: Vec::new(),
            bombs: Vec::new(),
            fragments: Vec::new(),
            explosions: Vec::new(),
            slash: Vec::new(),
            slashing: false,
            game_over_at: None,
            fade_start_ms: 0.0,
            fade_progress: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Begin a fresh run: from the start screen or a post-game-over restart.
    ///
    /// Clears every live collection, zeroes the score, and cancels any
    /// pending game-over trigger so a stale deadline can never assert
    /// game over on the new run.
    pub fn start_run(&mut self) {
        self.high_score = self.high_score.max(self.score);
        self.fruits.clear();
        self.bombs.clear();
        self.fragments.clear();
        self.explosions.clear();
        self.slash.clear();
        self.slashing = false;
        self.score = 0;
        self.bomb_hit = false;
        self.game_over_at = None;
        self.fade_start_ms = 0.0;
        self.fade_progress = 0.0;
        self.phase = GamePhase::Playing;
    }

    /// Blade effects (scoring and bomb detection) are off once a bomb is
    /// hit and stay off through the death animation.
    pub fn blade_disabled(&self) -> bool {
        self.bomb_hit || matches!(self.phase, GamePhase::Fading | GamePhase::GameOver)
    }
}
