mod network;
mod registry;

use clap::Parser;
use log::info;
use network::Server;
use shared::transport::FailurePolicy;
use shared::{DEFAULT_PORT, MAX_PLAYERS};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Maximum number of simultaneous players
    #[arg(short, long, default_value_t = MAX_PLAYERS)]
    capacity: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    info!("Starting server on port {}...", args.port);

    // Setup failures are fatal, per-message failures are reported.
    let policy = FailurePolicy::default();
    let mut server = Server::new(args.port, args.capacity, policy)?;

    server.run().await?;

    Ok(())
}
