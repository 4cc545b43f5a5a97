//! # Battle Engine
//!
//! Turn-order model for a single battle.
//!
//! - [`setup`] - request/response flow that collects player initiatives and the enemy list
//! - [`initiative`] - enemy initiative assignment and the merged, sorted turn order
//! - [`state`] - the running battle and its current-turn cursor
//!
//! ## Lifecycle
//!
//! ```text
//! BattleSetup::new(players)
//!     │  pending() -> Initiative { .. }   (once per player, re-asked on bad input)
//!     │  pending() -> Enemies
//!     ▼
//! BattleSetup::finish(rng) ──► BattleState { in_battle, units, current_index: Some(0) }
//!                                   │ next_turn / set_current
//!                                   ▼
//!                              BattleState::stop(players)
//! ```
//!
//! ```rust
//! use initiative_host::battle::{BattleSetup, InputRequest};
//! use initiative_host::types::{Enemy, Player};
//!
//! let players = vec![Player::new("Aria", "Rogue", 12, 0)];
//! let mut setup = BattleSetup::new(&players).unwrap();
//! assert!(matches!(setup.pending(), Some(InputRequest::Initiative { .. })));
//! setup.supply_initiative(17).unwrap();
//! setup.supply_enemies(vec![Enemy::new("Goblin", 7, 0)]).unwrap();
//! let started = setup.finish(&mut rand::thread_rng()).unwrap();
//! assert_eq!(started.state.units().len(), 2);
//! assert_eq!(started.state.current_index(), Some(0));
//! ```

pub mod initiative;
pub mod setup;
pub mod state;

pub use initiative::{assign_enemy_initiatives, free_initiatives, turn_order};
pub use setup::{BattleSetup, InputRequest, StartedBattle};
pub use state::BattleState;

/// Lowest initiative a player may pick.
pub const INITIATIVE_MIN: i32 = 1;
/// Highest initiative a player may pick.
pub const INITIATIVE_MAX: i32 = 20;
