mod game;
mod input;
mod network;

use clap::Parser;
use game::LocalGame;
use input::ScriptedInput;
use log::{debug, info};
use network::Session;
use shared::transport::FailurePolicy;
use shared::{CharacterType, DEFAULT_PORT};
use tokio::time::{interval, Duration};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IPv4 address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1")]
    server: String,

    /// Server port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Character type: ghost, zombie, pumpkin or witch
    #[arg(short, long, default_value = "ghost")]
    character: String,

    /// Tick rate (updates per second), at least 1
    #[arg(short, long, default_value = "30", value_parser = clap::value_parser!(u32).range(1..))]
    tick_rate: u32,

    /// Number of ticks to run before exiting (0 = run forever)
    #[arg(short = 'n', long, default_value = "300")]
    frames: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();
    let character = CharacterType::from_name(&args.character);

    info!("Starting client as {}...", character.name());
    info!("Connecting to {}:{}", args.server, args.port);

    // Connection setup is fatal, per-message failures are reported.
    let policy = FailurePolicy::default();
    let mut session = Session::connect(&args.server, args.port, policy).await?;

    let mut game = LocalGame::new(character);
    let mut script = ScriptedInput::new();

    let mut tick_interval = interval(Duration::from_secs_f32(1.0 / args.tick_rate as f32));
    let mut tick: u64 = 0;

    loop {
        tick_interval.tick().await;
        tick += 1;

        let frame = script.next_frame();
        let fired = game.apply_frame(&frame);
        game.tick();

        session.send_position(&game.player).await?;
        if fired {
            session.send_shoot().await?;
        }

        if tick % 60 == 0 {
            debug!(
                "Tick {}: player at ({}, {}), bullet active: {}",
                tick, game.player.x, game.player.y, game.bullet.active
            );
        }

        if args.frames > 0 && tick >= args.frames {
            break;
        }
    }

    session.close().await?;
    info!("Client finished after {} ticks", tick);

    Ok(())
}
