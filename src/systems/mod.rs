//! Game systems organized by domain.
//!
//! Systems run once the dungeon is carved:
//! - `movement`: player grid steps
//! - `ai`: skeleton chase behaviour
//! - `lockdown`: sealing rooms the player has entered

pub mod ai;
pub mod lockdown;
pub mod movement;

pub use ai::update_chase_ai;
pub use lockdown::update_lockdown;
pub use movement::{player_move, MoveResult};
