//! gunmetal: a 2D top-down action game.
//!
//! The simulation core lives in this library so it can be driven headless by
//! the integration tests; `main.rs` only adds the window, input polling and
//! the fixed-step frame loop.

pub mod anim;
pub mod bullet;
pub mod collision;
pub mod enemy;
pub mod helpers;
pub mod input;
pub mod map;
pub mod math;
pub mod player;
pub mod session;
pub mod weapon;

pub use bullet::Bullet;
pub use enemy::{Enemy, EnemySprites, EnemyState};
pub use input::PlayerIntent;
pub use map::TileMap;
pub use player::{Player, PlayerSprites};
pub use session::{GameSession, LevelSpec, HIT_DAMAGE, LEVELS, TICK_DT};
pub use weapon::{Weapon, WeaponDb, WeaponKind};
