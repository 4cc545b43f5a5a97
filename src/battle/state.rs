//! Running battle: merged turn order and the current-turn cursor.

use log::debug;

use crate::errors::BattleError;
use crate::types::{CombatUnit, Enemy, Player};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattleState {
    in_battle: bool,
    units: Vec<CombatUnit>,
    enemies: Vec<Enemy>,
    current_index: Option<usize>,
}

impl BattleState {
    /// A started battle with the cursor on the first unit.
    pub fn start(units: Vec<CombatUnit>, enemies: Vec<Enemy>) -> Self {
        Self {
            in_battle: true,
            units,
            enemies,
            current_index: Some(0),
        }
    }

    pub fn in_battle(&self) -> bool {
        self.in_battle
    }

    pub fn units(&self) -> &[CombatUnit] {
        &self.units
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_unit(&self) -> Option<&CombatUnit> {
        self.current_index.and_then(|i| self.units.get(i))
    }

    /// Advance the cursor, wrapping at the end. No-op outside a battle.
    pub fn next_turn(&mut self) {
        if !self.in_battle || self.units.is_empty() {
            return;
        }
        let next = (self.current_index.unwrap_or(0) + 1) % self.units.len();
        debug!("turn {} -> {}", self.current_index.unwrap_or(0), next);
        self.current_index = Some(next);
    }

    /// Move the cursor to `index`. The index must address a unit of the
    /// current order, so this always fails outside a battle.
    pub fn set_current(&mut self, index: usize) -> Result<(), BattleError> {
        if index >= self.units.len() {
            return Err(BattleError::IndexOutOfRange {
                index,
                len: self.units.len(),
            });
        }
        self.current_index = Some(index);
        Ok(())
    }

    /// End the battle: reset the players' initiatives and drop all battle data.
    pub fn stop(&mut self, players: &mut [Player]) {
        for p in players.iter_mut() {
            p.init = 0;
        }
        self.enemies.clear();
        self.units.clear();
        self.current_index = None;
        self.in_battle = false;
    }
}
