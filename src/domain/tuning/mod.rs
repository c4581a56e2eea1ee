// Gameplay tuning, separate from runtime configuration.

pub mod player;
pub mod weapon;

pub use player::{PLAYER_ONE_SPAWN, PLAYER_TWO_SPAWN, PlayerTuning};
pub use weapon::WeaponTuning;
