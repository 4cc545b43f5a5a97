//! # Display Device Protocol
//!
//! Commands are JSON objects keyed by `cmd`, one per TCP connection, terminated
//! by a single `\n`. The device never answers.
//!
//! | cmd            | extra fields          |
//! |----------------|-----------------------|
//! | `init_players` | `players`: unit array |
//! | `start_battle` |                       |
//! | `stop_battle`  |                       |
//! | `next_turn`    |                       |
//! | `set_current`  | `index`: integer      |
//!
//! ```rust
//! use initiative_host::protocol::Command;
//!
//! let line = Command::SetCurrent { index: 2 }.encode_line().unwrap();
//! assert_eq!(line, "{\"cmd\":\"set_current\",\"index\":2}\n");
//! ```

pub mod sender;

use serde::{Deserialize, Serialize};

use crate::types::{CombatUnit, Player};

pub use sender::{CommandSender, DeviceAddress};

/// Default TCP port of the display device.
pub const DEFAULT_PORT: u16 = 5000;
/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 3;

/// Unit entry of an `init_players` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub name: String,
    pub class: String,
    pub hp: i32,
    pub cd: i32,
    pub init: i32,
}

impl From<&Player> for UnitRecord {
    fn from(p: &Player) -> Self {
        Self {
            name: p.name.clone(),
            class: p.class.clone(),
            hp: p.hp,
            cd: p.cd,
            init: p.init,
        }
    }
}

impl From<&CombatUnit> for UnitRecord {
    fn from(u: &CombatUnit) -> Self {
        Self {
            name: u.name().to_string(),
            class: u.class().to_string(),
            hp: u.hp(),
            cd: u.cd(),
            init: u.init(),
        }
    }
}

/// The closed set of commands understood by the display device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    InitPlayers { players: Vec<UnitRecord> },
    StartBattle,
    StopBattle,
    NextTurn,
    SetCurrent { index: usize },
}

impl Command {
    pub fn init_players<'a, I, T>(units: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
        UnitRecord: From<&'a T>,
    {
        Command::InitPlayers {
            players: units.into_iter().map(UnitRecord::from).collect(),
        }
    }

    /// Wire name of the command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::InitPlayers { .. } => "init_players",
            Command::StartBattle => "start_battle",
            Command::StopBattle => "stop_battle",
            Command::NextTurn => "next_turn",
            Command::SetCurrent { .. } => "set_current",
        }
    }

    /// JSON encoding plus the terminating newline.
    pub fn encode_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}
