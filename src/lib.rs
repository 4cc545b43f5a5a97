//! # initiative-host - turn-order tracker for a tabletop display device
//!
//! The game master keeps a roster of players, starts a battle by giving each
//! player an initiative and listing the enemies, and steps through the turn
//! order. Every step is pushed to a small display device as a newline-terminated
//! JSON command over a one-shot TCP connection.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use initiative_host::config::Config;
//! use initiative_host::host::Host;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default("config.toml").await?;
//!     let mut host = Host::new(&config).await?;
//!     host.set_address("192.168.4.1", 5000);
//!     host.send_players().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`battle`] - turn-order model: setup, initiative assignment, current-turn cursor
//! - [`protocol`] - display device commands and the TCP sender
//! - [`roster`] - player roster and its JSON file
//! - [`host`] - user actions and the interactive console
//! - [`config`] - TOML configuration
//! - [`errors`] - error types
//! - [`types`] - player, enemy and combat unit records
//! - [`validation`] - checks on values typed by the user
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ Console / CLI   │ ← user input
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │ Host            │ ← one method per user action
//! └─────────────────┘
//!     │         │
//! ┌────────┐ ┌───────────────┐
//! │ Battle │ │ CommandSender │ ──► display device (TCP, JSON + \n)
//! └────────┘ └───────────────┘
//!     │
//! ┌────────┐
//! │ Roster │ ← players.json
//! └────────┘
//! ```

pub mod battle;
pub mod config;
pub mod errors;
pub mod host;
pub mod protocol;
pub mod roster;
pub mod types;
pub mod validation;
