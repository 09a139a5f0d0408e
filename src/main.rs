use bercon::client::Client;
use bercon::config;
use bercon::error::RconError;
use clap::Parser;
use log::{error, info, Level, LevelFilter, Metadata, Record};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::AsyncBufReadExt;

/// Remote console for game servers protected by the BattlEye anti-cheat.
#[derive(Parser)]
#[command(name = "bercon", version, about)]
struct Cli {
    /// Quiet mode (no extra client side output)
    #[arg(short, long)]
    quiet: bool,

    /// Interactive mode: read commands from stdin until 'quit' or 'exit'
    #[arg(short, long)]
    interactive: bool,

    /// Password file; its first token is the rcon password
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Server address
    host: String,

    /// Server rcon port
    port: u16,

    /// Command to run (required unless running interactively)
    command: Option<String>,
}

struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if record.level() == Level::Error {
                eprintln!("{}", record.args());
            } else {
                println!("{}", record.args());
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: SimpleLogger = SimpleLogger;

fn is_sentinel(command: &str) -> bool {
    matches!(command, "quit" | "exit")
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap renders its own usage text; help goes to stdout and
            // counts as success, actual usage mistakes exit with failure
            let is_usage_error = err.use_stderr();
            let _ = err.print();
            std::process::exit(if is_usage_error { 1 } else { 0 });
        }
    };

    if !cli.interactive && cli.command.is_none() {
        eprintln!("a command is required unless running with --interactive");
        std::process::exit(1);
    }

    let _ = log::set_logger(&LOGGER).map(|()| {
        log::set_max_level(if cli.quiet {
            LevelFilter::Error
        } else {
            LevelFilter::Info
        })
    });

    if let Err(err) = run(cli).await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), RconError> {
    let password = config::read_password(&cli.config)?;
    let address = format!("{}:{}", cli.host, cli.port);
    let mut client = Client::connect(&address, &password).await?;

    let quiet = cli.quiet;
    let mut emit = |line: &str| {
        if !quiet {
            println!("{line}");
        }
    };

    if cli.interactive {
        info!("Type 'exit' or 'quit' to exit interactive mode.");
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            let _ = std::io::stdout().flush();

            let Ok(Some(line)) = lines.next_line().await else {
                break;
            };
            let command = line.trim();
            if command.is_empty() {
                continue;
            }
            if is_sentinel(command) {
                break;
            }

            client.command(command, &mut emit).await?;
        }
    } else {
        // validated above: non-interactive mode always carries a command
        if let Some(command) = cli.command.as_deref() {
            if !is_sentinel(command) {
                client.command(command, &mut emit).await?;
            }
        }
    }

    Ok(())
}
