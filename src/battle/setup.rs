//! Battle start as an explicit request/response exchange.
//!
//! The setup asks for one initiative per player, in roster order, and then for
//! the enemy list. A rejected answer leaves the same request pending so the
//! caller can ask again. Dropping the setup cancels the start without touching
//! any state.

use log::{debug, trace};
use rand::Rng;

use super::initiative::{assign_enemy_initiatives, turn_order};
use super::state::BattleState;
use crate::errors::BattleError;
use crate::types::{Enemy, Player};
use crate::validation::{check_initiative_range, check_unique_initiative, parse_initiative};

/// What the setup needs next from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputRequest {
    /// Initiative for the player at `index` in the roster.
    Initiative {
        index: usize,
        name: String,
        class: String,
    },
    /// The enemies taking part in this battle.
    Enemies,
}

/// Outcome of a completed setup.
#[derive(Debug, Clone)]
pub struct StartedBattle {
    /// Roster players with their chosen initiatives.
    pub players: Vec<Player>,
    pub state: BattleState,
}

#[derive(Debug, Clone)]
pub struct BattleSetup {
    players: Vec<Player>,
    next_player: usize,
    enemies: Option<Vec<Enemy>>,
}

impl BattleSetup {
    pub fn new(players: &[Player]) -> Result<Self, BattleError> {
        if players.is_empty() {
            return Err(BattleError::NoPlayers);
        }
        Ok(Self {
            players: players.to_vec(),
            next_player: 0,
            enemies: None,
        })
    }

    /// The outstanding request, or `None` once [`finish`](Self::finish) can run.
    pub fn pending(&self) -> Option<InputRequest> {
        if let Some(p) = self.players.get(self.next_player) {
            return Some(InputRequest::Initiative {
                index: self.next_player,
                name: p.name.clone(),
                class: p.class.clone(),
            });
        }
        if self.enemies.is_none() {
            return Some(InputRequest::Enemies);
        }
        None
    }

    /// Initiatives already chosen in this setup.
    pub fn chosen_initiatives(&self) -> Vec<i32> {
        self.players[..self.next_player]
            .iter()
            .map(|p| p.init)
            .collect()
    }

    /// Answer an [`InputRequest::Initiative`].
    pub fn supply_initiative(&mut self, value: i64) -> Result<(), BattleError> {
        if self.next_player >= self.players.len() {
            return Err(BattleError::UnexpectedInput("an initiative"));
        }
        let value = check_initiative_range(value)?;
        check_unique_initiative(value, &self.chosen_initiatives())?;
        let player = &mut self.players[self.next_player];
        trace!("initiative {} for {}", value, player.name);
        player.init = value;
        self.next_player += 1;
        Ok(())
    }

    /// Same as [`supply_initiative`](Self::supply_initiative) for raw user text.
    pub fn supply_initiative_text(&mut self, raw: &str) -> Result<(), BattleError> {
        let value = parse_initiative(raw)?;
        self.supply_initiative(i64::from(value))
    }

    /// Answer [`InputRequest::Enemies`]. An empty list is a valid answer.
    pub fn supply_enemies(&mut self, enemies: Vec<Enemy>) -> Result<(), BattleError> {
        if self.pending() != Some(InputRequest::Enemies) {
            return Err(BattleError::UnexpectedInput("the enemy list"));
        }
        self.enemies = Some(enemies);
        Ok(())
    }

    /// Assign enemy initiatives and build the started battle.
    pub fn finish<R: Rng + ?Sized>(self, rng: &mut R) -> Result<StartedBattle, BattleError> {
        if self.pending().is_some() {
            return Err(BattleError::SetupIncomplete);
        }
        let player_inits: Vec<i32> = self.players.iter().map(|p| p.init).collect();
        let mut enemies = self.enemies.unwrap_or_default();
        assign_enemy_initiatives(&mut enemies, &player_inits, rng);
        let units = turn_order(&self.players, &enemies);
        debug!(
            "battle ready: {} players, {} enemies",
            self.players.len(),
            enemies.len()
        );
        Ok(StartedBattle {
            players: self.players,
            state: BattleState::start(units, enemies),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn party() -> Vec<Player> {
        vec![
            Player::new("A", "Fighter", 10, 0),
            Player::new("B", "Wizard", 6, 2),
        ]
    }

    #[test]
    fn needs_players() {
        assert!(matches!(BattleSetup::new(&[]), Err(BattleError::NoPlayers)));
    }

    #[test]
    fn requests_follow_roster_order() {
        let mut setup = BattleSetup::new(&party()).unwrap();
        assert_eq!(
            setup.pending(),
            Some(InputRequest::Initiative {
                index: 0,
                name: "A".into(),
                class: "Fighter".into()
            })
        );
        setup.supply_initiative(20).unwrap();
        assert!(matches!(
            setup.pending(),
            Some(InputRequest::Initiative { index: 1, .. })
        ));
        setup.supply_initiative(15).unwrap();
        assert_eq!(setup.pending(), Some(InputRequest::Enemies));
        setup.supply_enemies(Vec::new()).unwrap();
        assert_eq!(setup.pending(), None);
    }

    #[test]
    fn duplicate_keeps_request_pending() {
        let mut setup = BattleSetup::new(&party()).unwrap();
        setup.supply_initiative(12).unwrap();
        let err = setup.supply_initiative(12).unwrap_err();
        assert_eq!(
            err,
            BattleError::Invalid(ValidationError::DuplicateInitiative(12))
        );
        assert!(matches!(
            setup.pending(),
            Some(InputRequest::Initiative { index: 1, .. })
        ));
        assert!(setup.supply_initiative(0).is_err());
        assert!(setup.supply_initiative_text("abc").is_err());
        setup.supply_initiative_text(" 11 ").unwrap();
        assert_eq!(setup.chosen_initiatives(), vec![12, 11]);
    }

    #[test]
    fn answers_out_of_turn_are_rejected() {
        let mut setup = BattleSetup::new(&party()).unwrap();
        assert_eq!(
            setup.supply_enemies(Vec::new()),
            Err(BattleError::UnexpectedInput("the enemy list"))
        );
        setup.supply_initiative(1).unwrap();
        setup.supply_initiative(2).unwrap();
        assert_eq!(
            setup.supply_initiative(3),
            Err(BattleError::UnexpectedInput("an initiative"))
        );
    }

    #[test]
    fn finish_requires_all_answers() {
        let mut setup = BattleSetup::new(&party()).unwrap();
        setup.supply_initiative(5).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            setup.finish(&mut rng),
            Err(BattleError::SetupIncomplete)
        ));
    }

    #[test]
    fn finish_builds_sorted_battle() {
        let mut setup = BattleSetup::new(&party()).unwrap();
        setup.supply_initiative(20).unwrap();
        setup.supply_initiative(15).unwrap();
        setup
            .supply_enemies(vec![Enemy::new("E", 7, 0)])
            .unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let started = setup.finish(&mut rng).unwrap();

        assert_eq!(started.players[0].init, 20);
        assert_eq!(started.players[1].init, 15);
        let state = &started.state;
        assert!(state.in_battle());
        assert_eq!(state.current_index(), Some(0));
        assert_eq!(state.units().len(), 3);
        let enemy_init = state.enemies()[0].init;
        assert!(enemy_init != 20 && enemy_init != 15 && (1..=20).contains(&enemy_init));
        let inits: Vec<i32> = state.units().iter().map(|u| u.init()).collect();
        assert!(inits.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(state.units()[0].name(), "A");
    }
}
