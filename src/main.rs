//! Binary entrypoint for the initiative-host CLI.
//!
//! Commands:
//! - `console [--host <ip>] [--port <n>]` - interactive tracker (default)
//! - `init` - write a starter `config.toml`
//! - `ping [--host <ip>] [--port <n>]` - check the display device accepts connections
//! - `push [--host <ip>] [--port <n>]` - send the saved roster to the device
//! - `roster` - print the saved roster
//!
//! See the library crate docs for module-level details: `initiative_host::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{error, info};

use initiative_host::config::Config;
use initiative_host::host::{Console, Host};
use initiative_host::roster::Roster;

#[derive(Parser)]
#[command(name = "initiative-host")]
#[command(about = "Initiative tracker host for a turn-order display device")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive tracker
    Console {
        /// Device IP or hostname
        #[arg(long)]
        host: Option<String>,
        /// Device TCP port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Write a default configuration file
    Init,
    /// Test the connection to the device
    Ping {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Send the saved roster to the device
    Push {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the saved roster
    Roster,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Console {
        host: None,
        port: None,
    });

    if let Commands::Init = command {
        init_logging(&None, cli.verbose);
        Config::create_default(&cli.config).await?;
        info!("Configuration file created at {}", cli.config);
        return Ok(());
    }

    let mut config = Config::load_or_default(&cli.config).await?;
    init_logging(&Some(config.clone()), cli.verbose);

    match command {
        Commands::Init => {}
        Commands::Console { host, port } => {
            config.override_device(host, port);
            info!("Starting initiative-host v{}", env!("CARGO_PKG_VERSION"));
            let host = Host::new(&config).await?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut console = Console::new(host, stdin, tokio::io::stdout());
            console.run().await?;
        }
        Commands::Ping { host, port } => {
            config.override_device(host, port);
            let host = Host::new(&config).await?;
            if let Err(e) = host.test_connect().await {
                error!("Cannot connect: {}", e);
                std::process::exit(1);
            }
            println!("Connected to device (accepted).");
        }
        Commands::Push { host, port } => {
            config.override_device(host, port);
            let host = Host::new(&config).await?;
            match host.send_players().await {
                Ok(n) => println!("Sent {} players to device", n),
                Err(e) => {
                    error!("Failed to send: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Roster => {
            let roster = Roster::load(&config.roster.file).await?;
            for (i, p) in roster.players().iter().enumerate() {
                println!(
                    "{}. {} ({}) HP:{} CD:{} Init:{}",
                    i + 1,
                    p.name,
                    p.class,
                    p.hp,
                    p.cd,
                    p.init
                );
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .map(|c| c.logging.level_filter())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.file.clone())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Echo to the console only when attached to a terminal
        let is_tty = atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }
    let _ = builder.try_init();
}
