//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic: logical clock only, seeded RNG only, no rendering or
//! platform dependencies. The host drives it through `tick` and the
//! input router and reads it back through `render::snapshot`.

pub mod collision;
pub mod geometry;
pub mod input;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use geometry::{closest_point_on_segment, segment_circle_hit};
pub use input::{HostAction, pointer_down, pointer_move, pointer_up, resize};
pub use state::{
    ActionRegions, Explosion, FallingObject, Fragment, FruitKind, GamePhase, GameState,
    ObjectKind, Rect, SlashPoint, SurfaceBounds, action_regions,
};
pub use tick::tick;
