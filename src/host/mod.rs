//! # Host
//!
//! Ties the roster, the battle engine and the command sender together. Each
//! public async method is one user action: it mutates local state first and then
//! tells the display device about it.
//!
//! - [`commands`] - parser for console command lines
//! - [`console`] - interactive line-oriented front-end
//!
//! Local state is never rolled back when a send fails: the action returns the
//! [`SendError`](crate::errors::SendError) while the roster or battle already
//! reflects the change. Re-sending (`send`, `set <n>`) resynchronizes the device.

pub mod commands;
pub mod console;

use log::{info, warn};
use rand::Rng;

use crate::battle::{BattleSetup, BattleState};
use crate::config::Config;
use crate::errors::HostResult;
use crate::protocol::{Command, CommandSender, DeviceAddress};
use crate::roster::Roster;
use crate::types::{CombatUnit, Player};

pub use commands::{ConsoleCommand, ConsoleCommandParser};
pub use console::Console;

pub struct Host {
    roster: Roster,
    battle: BattleState,
    sender: CommandSender,
}

impl Host {
    /// Load the configured roster and prepare the sender.
    pub async fn new(config: &Config) -> HostResult<Self> {
        let roster = Roster::load(&config.roster.file).await?;
        let sender = CommandSender::new(config.device.address(), config.device.connect_timeout());
        Ok(Self::with_parts(roster, sender))
    }

    pub fn with_parts(roster: Roster, sender: CommandSender) -> Self {
        Self {
            roster,
            battle: BattleState::default(),
            sender,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn battle(&self) -> &BattleState {
        &self.battle
    }

    pub fn address(&self) -> Option<&DeviceAddress> {
        self.sender.address()
    }

    pub fn set_address(&mut self, host: &str, port: u16) {
        let address = DeviceAddress::new(host, port);
        info!("Device address set to {}", address);
        self.sender.set_address(address);
    }

    /// Check that the device accepts connections.
    pub async fn test_connect(&self) -> HostResult<()> {
        self.sender.probe().await?;
        Ok(())
    }

    pub async fn save_roster(&self) -> HostResult<()> {
        self.roster.save().await?;
        Ok(())
    }

    pub fn add_player(&mut self, player: Player) {
        info!("Added player {}", player.name);
        self.roster.add(player);
    }

    pub fn edit_player(&mut self, index: usize, player: Player) -> HostResult<()> {
        self.roster.update(index, player)?;
        Ok(())
    }

    pub fn remove_player(&mut self, index: usize) -> HostResult<Player> {
        let removed = self.roster.remove(index)?;
        info!("Removed player {}", removed.name);
        Ok(removed)
    }

    /// Push the unit list to the device: the battle order while a battle runs,
    /// the roster otherwise. Returns the number of units sent.
    pub async fn send_players(&self) -> HostResult<usize> {
        let count = if self.battle.in_battle() {
            self.battle.units().len()
        } else {
            self.roster.len()
        };
        self.sender.send(&self.players_command()).await?;
        Ok(count)
    }

    fn players_command(&self) -> Command {
        if self.battle.in_battle() {
            Command::init_players(self.battle.units())
        } else {
            Command::init_players(self.roster.players())
        }
    }

    /// First step of a battle start; drive the returned setup to completion and
    /// pass it to [`start_battle`](Self::start_battle).
    pub fn begin_battle(&self) -> HostResult<BattleSetup> {
        Ok(BattleSetup::new(self.roster.players())?)
    }

    /// Install the battle described by `setup`, replacing any running one, then
    /// send the order followed by `start_battle`.
    pub async fn start_battle<R: Rng + ?Sized>(
        &mut self,
        setup: BattleSetup,
        rng: &mut R,
    ) -> HostResult<()> {
        let started = setup.finish(rng)?;
        if self.battle.in_battle() {
            warn!("Replacing the running battle");
        }
        self.roster.apply_initiatives(&started.players);
        self.battle = started.state;
        info!(
            "Battle started with {} units",
            self.battle.units().len()
        );

        self.sender.send(&self.players_command()).await?;
        self.sender.send(&Command::StartBattle).await?;
        Ok(())
    }

    pub async fn stop_battle(&mut self) -> HostResult<()> {
        self.battle.stop(self.roster.players_mut());
        info!("Battle stopped, initiatives reset");
        self.sender.send(&Command::StopBattle).await?;
        Ok(())
    }

    /// Advance the cursor and send `next_turn`. Outside a battle the local
    /// order is untouched but the command still goes out.
    pub async fn next_turn(&mut self) -> HostResult<()> {
        if self.battle.in_battle() {
            self.battle.next_turn();
        } else {
            warn!("No battle running; sending next_turn without a local order");
        }
        self.sender.send(&Command::NextTurn).await?;
        Ok(())
    }

    /// Move the cursor to `index` (0-based). Nothing is sent when the index is
    /// out of range.
    pub async fn set_current(&mut self, index: usize) -> HostResult<()> {
        self.battle.set_current(index)?;
        self.sender.send(&Command::SetCurrent { index }).await?;
        Ok(())
    }

    pub fn current_unit(&self) -> Option<&CombatUnit> {
        self.battle.current_unit()
    }
}
