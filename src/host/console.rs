//! Interactive console: reads command lines, runs the matching [`Host`] action
//! and prints the outcome. Input and output are generic so tests can drive a
//! session from a byte buffer.

use anyhow::Result;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::commands::{parse_enemy, ConsoleCommand, ConsoleCommandParser, HELP_TEXT};
use super::Host;
use crate::battle::InputRequest;
use crate::errors::HostError;

pub struct Console<R, W> {
    host: Host,
    input: R,
    output: W,
    parser: ConsoleCommandParser,
    rng: StdRng,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(host: Host, input: R, output: W) -> Self {
        Self::with_rng(host, input, output, StdRng::from_entropy())
    }

    /// Console with a fixed RNG, for reproducible enemy initiatives.
    pub fn with_rng(host: Host, input: R, output: W, rng: StdRng) -> Self {
        Self {
            host,
            input,
            output,
            parser: ConsoleCommandParser::new(),
            rng,
        }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn into_parts(self) -> (Host, W) {
        (self.host, self.output)
    }

    /// Process commands until `quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        self.say("Initiative host ready. Type `help` for commands.").await?;
        self.print_roster().await?;
        loop {
            self.write("> ").await?;
            let Some(line) = self.read_line().await? else {
                debug!("Console input closed");
                break;
            };
            let command = self.parser.parse(&line);
            if command == ConsoleCommand::Quit {
                break;
            }
            self.execute(command).await?;
        }
        Ok(())
    }

    /// Run a single parsed command. Action failures are reported, not returned;
    /// only console I/O errors propagate.
    pub async fn execute(&mut self, command: ConsoleCommand) -> Result<()> {
        match command {
            ConsoleCommand::Empty | ConsoleCommand::Quit => {}
            ConsoleCommand::Help => self.say(HELP_TEXT).await?,
            ConsoleCommand::List => self.print_roster().await?,
            ConsoleCommand::Add(player) => {
                self.host.add_player(player);
                self.print_roster().await?;
            }
            ConsoleCommand::Edit { index, player } => {
                match self.host.edit_player(index, player) {
                    Ok(()) => self.print_roster().await?,
                    Err(e) => self.report(&e).await?,
                }
            }
            ConsoleCommand::Delete(index) => match self.host.remove_player(index) {
                Ok(p) => {
                    self.say(&format!("Deleted {}", p.name)).await?;
                    self.print_roster().await?;
                }
                Err(e) => self.report(&e).await?,
            },
            ConsoleCommand::Save => match self.host.save_roster().await {
                Ok(()) => {
                    let path = self.host.roster().path().display().to_string();
                    self.say(&format!("Players saved to {}", path)).await?;
                }
                Err(e) => self.report(&e).await?,
            },
            ConsoleCommand::Connect { host, port } => {
                self.host.set_address(&host, port);
                let shown = self
                    .host
                    .address()
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "(none)".to_string());
                self.say(&format!("Device address: {}", shown)).await?;
            }
            ConsoleCommand::Ping => match self.host.test_connect().await {
                Ok(()) => self.say("Connected to device (accepted).").await?,
                Err(e) => self.report(&e).await?,
            },
            ConsoleCommand::Send => match self.host.send_players().await {
                Ok(n) => self.say(&format!("Sent {} units to device", n)).await?,
                Err(e) => self.report(&e).await?,
            },
            ConsoleCommand::Start => self.start_battle().await?,
            ConsoleCommand::Stop => {
                let result = self.host.stop_battle().await;
                self.after_action(result, "Battle stopped (initiative reset)").await?;
                self.print_roster().await?;
            }
            ConsoleCommand::Next => {
                if !self.host.battle().in_battle() {
                    self.say("No battle running; only the device is told to advance.")
                        .await?;
                }
                let result = self.host.next_turn().await;
                self.after_action(result, "Next turn").await?;
                self.print_order().await?;
            }
            ConsoleCommand::Set(index) => match self.host.set_current(index).await {
                Err(HostError::Battle(e)) => self.report(&e).await?,
                result => {
                    self.after_action(result, &format!("Current set to {}", index + 1))
                        .await?;
                    self.print_order().await?;
                }
            },
            ConsoleCommand::Order => self.print_order().await?,
            ConsoleCommand::Unknown(word) => {
                self.say(&format!("Unknown command '{}'. Type `help`.", word))
                    .await?
            }
            ConsoleCommand::Invalid(msg) => self.say(&msg).await?,
        }
        Ok(())
    }

    async fn start_battle(&mut self) -> Result<()> {
        let mut setup = match self.host.begin_battle() {
            Ok(s) => s,
            Err(e) => return self.report(&e).await,
        };
        while let Some(request) = setup.pending() {
            match request {
                InputRequest::Initiative { name, class, .. } => {
                    self.write(&format!("Initiative for {} ({}) [1-20]: ", name, class))
                        .await?;
                    let Some(line) = self.read_line().await? else {
                        return self.say("Battle start cancelled.").await;
                    };
                    if line.eq_ignore_ascii_case("cancel") {
                        return self.say("Battle start cancelled.").await;
                    }
                    if let Err(e) = setup.supply_initiative_text(&line) {
                        self.report(&e).await?;
                    }
                }
                InputRequest::Enemies => {
                    self.say("Enemies, one per line as `<name> [hp] [cd]`; empty line or `done` to finish, `cancel` to abort.")
                        .await?;
                    let mut enemies = Vec::new();
                    loop {
                        self.write("enemy> ").await?;
                        let Some(line) = self.read_line().await? else {
                            return self.say("Battle start cancelled.").await;
                        };
                        if line.eq_ignore_ascii_case("cancel") {
                            return self.say("Battle start cancelled.").await;
                        }
                        if line.is_empty() || line.eq_ignore_ascii_case("done") {
                            break;
                        }
                        match parse_enemy(&line) {
                            Ok(enemy) => enemies.push(enemy),
                            Err(e) => self.report(&e).await?,
                        }
                    }
                    if let Err(e) = setup.supply_enemies(enemies) {
                        return self.report(&e).await;
                    }
                }
            }
        }
        let result = self.host.start_battle(setup, &mut self.rng).await;
        self.after_action(result, "Battle started on device").await?;
        self.print_order().await
    }

    /// Report the outcome of an action whose local effect has already happened.
    async fn after_action(&mut self, result: Result<(), HostError>, ok_msg: &str) -> Result<()> {
        match result {
            Ok(()) => self.say(ok_msg).await,
            Err(HostError::Send(e)) => {
                warn!("Device not updated: {}", e);
                self.say(&format!("Send error: {} (local state already updated)", e))
                    .await
            }
            Err(e) => self.report(&e).await,
        }
    }

    async fn print_roster(&mut self) -> Result<()> {
        let lines: Vec<String> = self
            .host
            .roster()
            .players()
            .iter()
            .enumerate()
            .map(|(i, p)| {
                format!(
                    "{}. {} ({}) HP:{} CD:{} Init:{}",
                    i + 1,
                    p.name,
                    p.class,
                    p.hp,
                    p.cd,
                    p.init
                )
            })
            .collect();
        if lines.is_empty() {
            return self.say("(no players)").await;
        }
        self.say(&lines.join("\n")).await
    }

    async fn print_order(&mut self) -> Result<()> {
        let battle = self.host.battle();
        if !battle.in_battle() {
            return self.say("(no battle running)").await;
        }
        let current = battle.current_index();
        let lines: Vec<String> = battle
            .units()
            .iter()
            .enumerate()
            .map(|(i, u)| {
                let marker = if Some(i) == current { ">" } else { " " };
                format!("{} {}. {}", marker, i + 1, u.describe())
            })
            .collect();
        self.say(&lines.join("\n")).await
    }

    async fn report(&mut self, err: &dyn std::error::Error) -> Result<()> {
        self.say(&format!("Error: {}", err)).await
    }

    /// Next input line, trimmed; `None` at end of input. Bytes that are not
    /// UTF-8 are replaced so a garbled line fails as a command, not the session.
    async fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        let n = self.input.read_until(b'\n', &mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        if let std::borrow::Cow::Owned(_) = line {
            debug!("Replaced invalid UTF-8 in console input");
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.write(text).await?;
        self.write("\n").await
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}
