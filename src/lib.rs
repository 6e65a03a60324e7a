//! Fruit Slash - a fruit-slashing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, slash collisions, session state)
//! - `render`: Per-frame snapshot consumed by the drawing backend
//! - `share`: Share-score compose link
//! - `settings`: Display preferences

pub mod render;
pub mod settings;
pub mod share;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Reference frame duration the simulation is scaled against (ms)
    pub const FRAME_MS: f32 = 16.0;
    /// Upper bound on dt in frame units (prevents large jumps after a stall)
    pub const MAX_FRAME_SCALE: f32 = 1.0;

    /// Gravity (px per frame unit, applied to vertical velocity each frame unit)
    pub const GRAVITY: f32 = 0.5;

    /// Spawn probability per frame unit
    pub const FRUIT_SPAWN_CHANCE: f32 = 0.02;
    pub const BOMB_SPAWN_CHANCE: f32 = 0.005;

    /// Falling object defaults
    pub const OBJECT_RADIUS: f32 = 45.0;
    /// Horizontal margin kept clear of the surface edges at spawn
    pub const SPAWN_MARGIN_X: f32 = 25.0;
    /// Objects enter this far below the visible surface
    pub const SPAWN_BELOW: f32 = 30.0;
    /// Launch speed range (upward, px per frame unit)
    pub const LAUNCH_SPEED_MIN: f32 = 15.0;
    pub const LAUNCH_SPEED_MAX: f32 = 20.0;
    /// Maximum horizontal drift speed at spawn
    pub const DRIFT_MAX: f32 = 2.0;
    /// Maximum rotation speed at spawn (radians per frame unit)
    pub const SPIN_MAX: f32 = 0.1;

    /// Objects are culled once this far below the surface
    pub const CULL_MARGIN: f32 = 100.0;

    /// Slash points older than this are pruned (ms)
    pub const SLASH_WINDOW_MS: f64 = 200.0;

    /// Fragment lifetimes (frame units)
    pub const FRAGMENT_LIFETIME: f32 = 100.0;
    /// Fragment opacity reaches zero at this age
    pub const FRAGMENT_FADE_AGE: f32 = 50.0;
    /// Fragment offset along the slash direction at the split
    pub const FRAGMENT_SPLIT_OFFSET: f32 = 5.0;
    /// Separation impulse perpendicular to the slash
    pub const FRAGMENT_SPLIT_SPEED: f32 = 3.0;
    /// Spin delta between the two halves
    pub const FRAGMENT_SPIN_DELTA: f32 = 0.1;

    /// Explosion lifetime (frame units)
    pub const EXPLOSION_LIFETIME: f32 = 50.0;
    /// The game-over trigger arms once the explosion passes this age
    pub const EXPLOSION_TRIGGER_AGE: f32 = 30.0;
    /// Explosion scale growth divisor (scale = 1 + age / this)
    pub const EXPLOSION_SCALE_AGE: f32 = 15.0;

    /// Delay between the armed trigger and game over asserting (ms)
    pub const GAME_OVER_DELAY_MS: f64 = 1000.0;
    /// Game-over overlay fade-in duration (ms)
    pub const FADE_DURATION_MS: f64 = 1000.0;

    /// Post-game-over action regions
    pub const BUTTON_WIDTH: f32 = 220.0;
    pub const BUTTON_HEIGHT: f32 = 60.0;
    /// Vertical gap between the share and restart regions
    pub const BUTTON_GAP: f32 = 20.0;
    /// Share region top edge as a fraction of surface height
    pub const SHARE_BUTTON_Y_FRAC: f32 = 0.6;
    /// Fade progress above which the action regions are interactive
    pub const BUTTON_FADE_THRESHOLD: f32 = 0.7;
}
