//! Status command.

use super::load_config;
use clap::Args;
use console::{style, Emoji};
use std::net::TcpStream;
use std::path::Path;

static CHECK: Emoji = Emoji("✓", "+");
static CROSS: Emoji = Emoji("✗", "x");

/// Status command arguments.
#[derive(Args)]
pub struct StatusArgs {
    /// Port to probe (defaults to the configured port)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Run the status command.
pub async fn run(args: StatusArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let port = match args.port {
        Some(port) => port,
        None => load_config(config_path)?.gateway.port,
    };

    if is_listening(port) {
        println!("{} Server is running on port {}", style(CHECK).green(), port);
    } else {
        println!("{} Server is not running on port {}", style(CROSS).red(), port);
    }

    Ok(())
}

/// Whether something accepts TCP connections on loopback `port`.
fn is_listening(port: u16) -> bool {
    TcpStream::connect(("127.0.0.1", port)).is_ok()
}
