//! Enemy initiative assignment and turn ordering.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{INITIATIVE_MAX, INITIATIVE_MIN};
use crate::types::{CombatUnit, Enemy, Player};

/// Initiatives in 1..=20 not used by any player, ascending.
pub fn free_initiatives(player_inits: &[i32]) -> Vec<i32> {
    (INITIATIVE_MIN..=INITIATIVE_MAX)
        .filter(|v| !player_inits.contains(v))
        .collect()
}

/// Give each enemy a distinct initiative drawn at random from the free pool.
/// Enemies beyond the size of the pool get 0.
pub fn assign_enemy_initiatives<R: Rng + ?Sized>(
    enemies: &mut [Enemy],
    player_inits: &[i32],
    rng: &mut R,
) {
    let mut pool = free_initiatives(player_inits);
    pool.shuffle(rng);
    let mut draws = pool.into_iter();
    for enemy in enemies.iter_mut() {
        enemy.init = draws.next().unwrap_or(0);
    }
}

/// Players then enemies, stable-sorted by descending initiative.
pub fn turn_order(players: &[Player], enemies: &[Enemy]) -> Vec<CombatUnit> {
    let mut units: Vec<CombatUnit> = players
        .iter()
        .cloned()
        .map(CombatUnit::Player)
        .chain(enemies.iter().cloned().map(CombatUnit::Enemy))
        .collect();
    // sort_by is stable: ties keep insertion order
    units.sort_by(|a, b| b.init().cmp(&a.init()));
    units
}
