//! Core record types: roster players, battle enemies and the merged combat unit.

use serde::{Deserialize, Serialize};

/// Class label carried by enemies on the wire and in listings.
pub const ENEMY_CLASS: &str = "Enemy";

/// A roster player. Every field falls back to its default when missing from the
/// roster file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    pub name: String,
    pub class: String,
    pub hp: i32,
    /// Cooldown counter.
    pub cd: i32,
    /// Initiative; 0 outside of a battle.
    pub init: i32,
}

impl Player {
    pub fn new(name: impl Into<String>, class: impl Into<String>, hp: i32, cd: i32) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            hp,
            cd,
            init: 0,
        }
    }

    pub fn with_init(mut self, init: i32) -> Self {
        self.init = init;
        self
    }
}

/// An enemy entered for a single battle. Its initiative is assigned by the
/// battle engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enemy {
    pub name: String,
    pub hp: i32,
    pub cd: i32,
    pub init: i32,
}

impl Enemy {
    pub fn new(name: impl Into<String>, hp: i32, cd: i32) -> Self {
        Self {
            name: name.into(),
            hp,
            cd,
            init: 0,
        }
    }
}

/// One entry of the merged turn order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatUnit {
    Player(Player),
    Enemy(Enemy),
}

impl CombatUnit {
    pub fn name(&self) -> &str {
        match self {
            CombatUnit::Player(p) => &p.name,
            CombatUnit::Enemy(e) => &e.name,
        }
    }

    /// The player's class, or [`ENEMY_CLASS`].
    pub fn class(&self) -> &str {
        match self {
            CombatUnit::Player(p) => &p.class,
            CombatUnit::Enemy(_) => ENEMY_CLASS,
        }
    }

    pub fn hp(&self) -> i32 {
        match self {
            CombatUnit::Player(p) => p.hp,
            CombatUnit::Enemy(e) => e.hp,
        }
    }

    pub fn cd(&self) -> i32 {
        match self {
            CombatUnit::Player(p) => p.cd,
            CombatUnit::Enemy(e) => e.cd,
        }
    }

    pub fn init(&self) -> i32 {
        match self {
            CombatUnit::Player(p) => p.init,
            CombatUnit::Enemy(e) => e.init,
        }
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self, CombatUnit::Enemy(_))
    }

    /// Single-line listing used by the console.
    pub fn describe(&self) -> String {
        format!(
            "{} ({}) HP:{} CD:{} Init:{}",
            self.name(),
            self.class(),
            self.hp(),
            self.cd(),
            self.init()
        )
    }
}
