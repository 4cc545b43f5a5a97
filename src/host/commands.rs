//! Console command parsing.
//!
//! Keywords are case-insensitive. List positions are typed 1-based, as shown by
//! `list` and `order`, and come out of the parser 0-based. Names and classes are
//! single words in `add`/`edit`; enemy names may contain spaces.

use log::trace;

use crate::errors::ValidationError;
use crate::protocol::DEFAULT_PORT;
use crate::types::{Enemy, Player};
use crate::validation::{parse_stat, validate_name};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Help,
    List,
    Add(Player),
    Edit { index: usize, player: Player },
    Delete(usize),
    Save,
    Connect { host: String, port: u16 },
    Ping,
    Send,
    Start,
    Stop,
    Next,
    Set(usize),
    Order,
    Quit,
    Empty,
    Unknown(String),
    Invalid(String),
}

pub const HELP_TEXT: &str = "\
Commands:
  list                                   show the roster
  add <name> <class> <hp> <cd> [init]    add a player
  edit <n> <name> <class> <hp> <cd> <init>
  del <n>                                delete player n
  save                                   write the roster file
  connect <host> [port]                  set the device address
  ping                                   test the device connection
  send                                   push players to the device
  start | stop                           start or stop a battle
  next                                   advance to the next turn
  set <n>                                make unit n current
  order                                  show the battle order
  quit";

/// Parser for console lines
pub struct ConsoleCommandParser;

impl ConsoleCommandParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, raw: &str) -> ConsoleCommand {
        let mut words = raw.split_whitespace();
        let Some(keyword) = words.next() else {
            return ConsoleCommand::Empty;
        };
        let args: Vec<&str> = words.collect();
        let keyword = keyword.to_ascii_lowercase();
        trace!("Parsed '{}' with {} args", keyword, args.len());
        match keyword.as_str() {
            "help" | "?" | "h" => ConsoleCommand::Help,
            "list" | "ls" | "l" => ConsoleCommand::List,
            "add" => match parse_player(&args) {
                Ok(p) => ConsoleCommand::Add(p),
                Err(e) => ConsoleCommand::Invalid(e.to_string()),
            },
            "edit" => {
                let Some((first, rest)) = args.split_first() else {
                    return ConsoleCommand::Invalid("Usage: edit <n> <name> <class> <hp> <cd> <init>".into());
                };
                let index = match parse_position(first) {
                    Ok(i) => i,
                    Err(msg) => return ConsoleCommand::Invalid(msg),
                };
                if rest.len() < 5 {
                    return ConsoleCommand::Invalid("Usage: edit <n> <name> <class> <hp> <cd> <init>".into());
                }
                match parse_player(rest) {
                    Ok(player) => ConsoleCommand::Edit { index, player },
                    Err(e) => ConsoleCommand::Invalid(e.to_string()),
                }
            }
            "del" | "delete" | "rm" => match args.first().map(|a| parse_position(a)) {
                Some(Ok(i)) => ConsoleCommand::Delete(i),
                Some(Err(msg)) => ConsoleCommand::Invalid(msg),
                None => ConsoleCommand::Invalid("Usage: del <n>".into()),
            },
            "save" => ConsoleCommand::Save,
            "connect" => {
                let Some(host) = args.first() else {
                    return ConsoleCommand::Invalid("Usage: connect <host> [port]".into());
                };
                let port = match args.get(1) {
                    None => DEFAULT_PORT,
                    Some(p) => match p.parse::<u16>() {
                        Ok(port) if port > 0 => port,
                        _ => return ConsoleCommand::Invalid(format!("Invalid port '{}'", p)),
                    },
                };
                ConsoleCommand::Connect {
                    host: host.to_string(),
                    port,
                }
            }
            "ping" | "test" => ConsoleCommand::Ping,
            "send" => ConsoleCommand::Send,
            "start" => ConsoleCommand::Start,
            "stop" => ConsoleCommand::Stop,
            "next" | "n" => ConsoleCommand::Next,
            "set" => match args.first().map(|a| parse_position(a)) {
                Some(Ok(i)) => ConsoleCommand::Set(i),
                Some(Err(msg)) => ConsoleCommand::Invalid(msg),
                None => ConsoleCommand::Invalid("Usage: set <n>".into()),
            },
            "order" | "status" => ConsoleCommand::Order,
            "quit" | "exit" | "q" => ConsoleCommand::Quit,
            _ => ConsoleCommand::Unknown(keyword),
        }
    }
}

impl Default for ConsoleCommandParser {
    fn default() -> Self {
        Self::new()
    }
}

/// `<name> <class> <hp> <cd> [init]`
fn parse_player(args: &[&str]) -> Result<Player, ValidationError> {
    if let Some(extra) = args.get(5) {
        return Err(ValidationError::UnexpectedArgument(extra.to_string()));
    }
    let name = validate_name(args.first().copied().unwrap_or_default())?;
    let class = args
        .get(1)
        .map(|s| s.to_string())
        .ok_or(ValidationError::MissingArgument("class"))?;
    let hp = parse_stat("hp", args.get(2).copied().unwrap_or_default())?;
    let cd = parse_stat("cd", args.get(3).copied().unwrap_or_default())?;
    let init = parse_stat("init", args.get(4).copied().unwrap_or_default())?;
    Ok(Player::new(name, class, hp, cd).with_init(init))
}

/// 1-based position to 0-based index.
fn parse_position(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Invalid position '{}' (positions start at 1)", raw)),
    }
}

/// Parse an enemy line: `<name...> [hp] [cd]`. Up to two trailing integers are
/// taken as hp and cd; everything before them is the name.
pub fn parse_enemy(line: &str) -> Result<Enemy, ValidationError> {
    let mut words: Vec<&str> = line.split_whitespace().collect();
    let mut stats: Vec<i32> = Vec::new();
    while stats.len() < 2 && words.len() > 1 {
        match words.last().and_then(|w| w.parse::<i32>().ok()) {
            Some(v) => {
                stats.insert(0, v);
                words.pop();
            }
            None => break,
        }
    }
    let name = validate_name(&words.join(" "))?;
    let hp = stats.first().copied().unwrap_or(0);
    let cd = stats.get(1).copied().unwrap_or(0);
    Ok(Enemy::new(name, hp, cd))
}
