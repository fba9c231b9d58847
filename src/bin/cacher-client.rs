use std::io::{self, BufReader, Write};
use std::net::SocketAddr;
use std::process::exit;

use clap::Parser;
use crossbeam::channel;
use log::{debug, error};

use cacher::{spawn_input_reader, CacherClient, Dispatcher, InputReader, Result};

const DEFAULT_ADDR: &str = "127.0.0.1:9022";

#[derive(Parser)]
#[command(
    name = "cacher-client",
    version,
    about = "An interactive client for a remote key-value cache"
)]
struct Cli {
    /// Cache service address
    #[arg(long, default_value = DEFAULT_ADDR, value_name = "IP-PORT")]
    addr: SocketAddr,
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .target(env_logger::Target::Stderr)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let client = CacherClient::connect(cli.addr)?;
    debug!("Connected to {}", cli.addr);

    let (command_tx, command_rx) = channel::bounded(0);
    let (exit_tx, exit_rx) = channel::bounded(0);

    let mut stdout = io::stdout();
    writeln!(stdout, "Enter Command")?;
    stdout.flush()?;
    // The reader thread is not joined: it may be parked in a blocking read
    // when the loop ends.
    spawn_input_reader(InputReader::new(BufReader::new(io::stdin())), command_tx, exit_tx)?;

    Dispatcher::new(client, stdout).run(command_rx, exit_rx)
}
